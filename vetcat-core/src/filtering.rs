use crate::facets::FacetGroupKey;
use crate::models::{permitted_subcategories, CatalogItem, Catalogs, CategoryMapEntry, Mode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Active facet names per group
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ActiveFilters {
    groups: BTreeMap<FacetGroupKey, Vec<String>>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for tests and callers assembling filters by hand
    pub fn with(mut self, key: FacetGroupKey, names: &[&str]) -> Self {
        self.set(key, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn set(&mut self, key: FacetGroupKey, names: Vec<String>) {
        self.groups.insert(key, names);
    }

    pub fn get(&self, key: FacetGroupKey) -> &[String] {
        self.groups.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A radio group's selection
    pub fn first(&self, key: FacetGroupKey) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacetGroupKey, &[String])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// True when no group has an active facet
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

/// Filter the product catalog, returning the matching items in catalog order
/// AND logic between groups, OR logic within the subcategory group
pub fn filter_catalog(
    catalog: &[CatalogItem],
    filters: &ActiveFilters,
    category_map: &[CategoryMapEntry],
) -> Vec<CatalogItem> {
    if filters.is_empty() {
        return catalog.to_vec();
    }

    // Resolved once per call so every item sees the same permitted list
    let permitted = filters
        .first(FacetGroupKey::Category)
        .map(|category| permitted_subcategories(category_map, category));

    catalog
        .iter()
        .filter(|item| matches_filters(item, filters, permitted))
        .cloned()
        .collect()
}

/// Check one item against the category, subcategory and brand predicates
pub fn matches_filters(item: &CatalogItem, filters: &ActiveFilters, permitted: Option<&[String]>) -> bool {
    let tag = item.tag();

    if let Some(permitted) = permitted {
        let in_category = tag.is_some_and(|t| permitted.iter().any(|p| p == t));
        if !in_category {
            return false;
        }
    }

    let subcategories = filters.get(FacetGroupKey::Subcategories);
    if !subcategories.is_empty() {
        let in_subcategory = tag.is_some_and(|t| subcategories.iter().any(|s| s == t));
        if !in_subcategory {
            return false;
        }
    }

    if let Some(brand) = filters.first(FacetGroupKey::Brand) {
        if item.brand() != Some(brand) {
            return false;
        }
    }

    true
}

/// Evaluate the catalog for a mode
/// Services pass through unfiltered; clinic filtering belongs to the caller
pub fn filter_for_mode(
    mode: Mode,
    catalogs: &Catalogs,
    filters: &ActiveFilters,
    category_map: &[CategoryMapEntry],
) -> Vec<CatalogItem> {
    match mode {
        Mode::Products => filter_catalog(&catalogs.products, filters, category_map),
        Mode::Services => catalogs.services.clone(),
    }
}

/// Clinic filter used by views listing services
pub fn filter_services_by_clinic(services: &[CatalogItem], filters: &ActiveFilters) -> Vec<CatalogItem> {
    match filters.first(FacetGroupKey::Clinic) {
        Some(clinic) => services
            .iter()
            .filter(|item| item.clinic() == Some(clinic))
            .cloned()
            .collect(),
        None => services.to_vec(),
    }
}
