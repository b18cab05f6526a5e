use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A product or service record as it appears in the static catalogs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Subcategory tag; resolves to a category through the category map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CatalogItem {
    /// Brand, treating an empty string the same as a missing brand
    pub fn brand(&self) -> Option<&str> {
        non_empty(self.brand.as_deref())
    }

    /// Subcategory tag, treating an empty string as missing
    pub fn tag(&self) -> Option<&str> {
        non_empty(self.subcategories.as_deref())
    }

    /// Clinic name, treating an empty string as missing
    pub fn clinic(&self) -> Option<&str> {
        non_empty(self.clinic_name.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One category and the subcategory tags it permits
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapEntry {
    pub category_name: String,
    pub subcategories: Vec<String>,
}

/// Permitted subcategory names of a category; empty for a dangling name
pub fn permitted_subcategories<'a>(category_map: &'a [CategoryMapEntry], category: &str) -> &'a [String] {
    category_map
        .iter()
        .find(|entry| entry.category_name == category)
        .map(|entry| entry.subcategories.as_slice())
        .unwrap_or(&[])
}

/// Category a subcategory tag belongs to (first matching entry wins)
pub fn resolve_category<'a>(category_map: &'a [CategoryMapEntry], tag: &str) -> Option<&'a str> {
    category_map
        .iter()
        .find(|entry| entry.subcategories.iter().any(|s| s == tag))
        .map(|entry| entry.category_name.as_str())
}

/// The two static catalogs the engine filters
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Catalogs {
    #[serde(default)]
    pub products: Vec<CatalogItem>,
    #[serde(default)]
    pub services: Vec<CatalogItem>,
}

/// Everything a catalog file holds: both catalogs plus the category map
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CatalogBundle {
    #[serde(flatten)]
    pub catalogs: Catalogs,
    #[serde(default)]
    pub categories: Vec<CategoryMapEntry>,
}

/// Which catalog the sidebar is operating on
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Products,
    Services,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Products => "products",
            Mode::Services => "services",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" => Ok(Mode::Products),
            "services" => Ok(Mode::Services),
            other => Err(format!("unknown mode '{}' (expected products or services)", other)),
        }
    }
}
