use crate::filtering::ActiveFilters;
use crate::models::{permitted_subcategories, resolve_category, CatalogItem, Catalogs, CategoryMapEntry, Mode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A selectable value within a facet group
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Facet {
    pub name: String,
    pub count: usize,
    pub active: bool,
}

impl Facet {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
            active: false,
        }
    }
}

/// Attribute a facet group filters on
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FacetGroupKey {
    Category,
    Subcategories,
    Brand,
    Clinic,
}

impl FacetGroupKey {
    pub const ALL: [FacetGroupKey; 4] = [
        FacetGroupKey::Category,
        FacetGroupKey::Subcategories,
        FacetGroupKey::Brand,
        FacetGroupKey::Clinic,
    ];

    /// Radio groups allow at most one active facet
    pub fn is_radio(&self) -> bool {
        !matches!(self, FacetGroupKey::Subcategories)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetGroupKey::Category => "category",
            FacetGroupKey::Subcategories => "subcategories",
            FacetGroupKey::Brand => "brand",
            FacetGroupKey::Clinic => "clinic",
        }
    }
}

impl fmt::Display for FacetGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetGroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(FacetGroupKey::Category),
            "subcategories" | "subcategory" => Ok(FacetGroupKey::Subcategories),
            "brand" => Ok(FacetGroupKey::Brand),
            "clinic" => Ok(FacetGroupKey::Clinic),
            other => Err(format!("unknown facet group '{}'", other)),
        }
    }
}

/// Facet groups shown while browsing products
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ProductFacets {
    pub category: Vec<Facet>,
    pub subcategories: Vec<Facet>,
    pub brand: Vec<Facet>,
}

/// Facet groups shown while browsing services
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ServiceFacets {
    pub clinic: Vec<Facet>,
}

/// Complete filter state for one mode
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FacetGroupSet {
    Products(ProductFacets),
    Services(ServiceFacets),
}

impl FacetGroupSet {
    pub fn mode(&self) -> Mode {
        match self {
            FacetGroupSet::Products(_) => Mode::Products,
            FacetGroupSet::Services(_) => Mode::Services,
        }
    }

    /// Group keys carried by this mode, in display order
    pub fn keys(&self) -> &'static [FacetGroupKey] {
        match self {
            FacetGroupSet::Products(_) => &[
                FacetGroupKey::Category,
                FacetGroupKey::Subcategories,
                FacetGroupKey::Brand,
            ],
            FacetGroupSet::Services(_) => &[FacetGroupKey::Clinic],
        }
    }

    pub fn group(&self, key: FacetGroupKey) -> Option<&[Facet]> {
        match (self, key) {
            (FacetGroupSet::Products(p), FacetGroupKey::Category) => Some(&p.category),
            (FacetGroupSet::Products(p), FacetGroupKey::Subcategories) => Some(&p.subcategories),
            (FacetGroupSet::Products(p), FacetGroupKey::Brand) => Some(&p.brand),
            (FacetGroupSet::Services(s), FacetGroupKey::Clinic) => Some(&s.clinic),
            _ => None,
        }
    }

    pub fn group_mut(&mut self, key: FacetGroupKey) -> Option<&mut Vec<Facet>> {
        match (self, key) {
            (FacetGroupSet::Products(p), FacetGroupKey::Category) => Some(&mut p.category),
            (FacetGroupSet::Products(p), FacetGroupKey::Subcategories) => Some(&mut p.subcategories),
            (FacetGroupSet::Products(p), FacetGroupKey::Brand) => Some(&mut p.brand),
            (FacetGroupSet::Services(s), FacetGroupKey::Clinic) => Some(&mut s.clinic),
            _ => None,
        }
    }

    /// Names of the active facets in one group, in group order
    pub fn active_names(&self, key: FacetGroupKey) -> Vec<String> {
        self.group(key)
            .map(|facets| {
                facets
                    .iter()
                    .filter(|f| f.active)
                    .map(|f| f.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First active facet of a radio group
    pub fn active_name(&self, key: FacetGroupKey) -> Option<&str> {
        self.group(key)?
            .iter()
            .find(|f| f.active)
            .map(|f| f.name.as_str())
    }

    pub fn active_filters(&self) -> ActiveFilters {
        let mut filters = ActiveFilters::default();
        for key in self.keys() {
            filters.set(*key, self.active_names(*key));
        }
        filters
    }
}

/// Build the initial facet groups for a mode; every facet starts inactive
pub fn build_facet_groups(mode: Mode, catalogs: &Catalogs, category_map: &[CategoryMapEntry]) -> FacetGroupSet {
    match mode {
        Mode::Products => FacetGroupSet::Products(ProductFacets {
            category: count_values(
                catalogs
                    .products
                    .iter()
                    .filter_map(|item| item.tag())
                    .filter_map(|tag| resolve_category(category_map, tag)),
            ),
            subcategories: Vec::new(),
            brand: count_values(catalogs.products.iter().filter_map(|item| item.brand())),
        }),
        Mode::Services => FacetGroupSet::Services(ServiceFacets {
            clinic: count_values(catalogs.services.iter().filter_map(|item| item.clinic())),
        }),
    }
}

/// Rebuild the subcategory group for the active category
/// Facets keep their active flag when a facet of the same name was active in `previous`
pub fn build_subcategory_facets(
    active_category: Option<&str>,
    products: &[CatalogItem],
    category_map: &[CategoryMapEntry],
    previous: &[Facet],
) -> Vec<Facet> {
    let Some(category) = active_category else {
        return Vec::new();
    };

    let permitted = permitted_subcategories(category_map, category);
    let mut facets = count_values(
        products
            .iter()
            .filter_map(|item| item.tag())
            .filter(|tag| permitted.iter().any(|p| p == tag)),
    );

    for facet in &mut facets {
        facet.active = previous.iter().any(|p| p.active && p.name == facet.name);
    }

    facets
}

/// Count occurrences, keeping first-seen order
fn count_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<Facet> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut facets: Vec<Facet> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => facets[i].count += 1,
            None => {
                index.insert(value, facets.len());
                facets.push(Facet::new(value, 1));
            }
        }
    }

    facets
}
