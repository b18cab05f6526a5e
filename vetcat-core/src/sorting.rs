use crate::models::CatalogItem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Sort order selected next to the facet sidebar
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(SortKey::Default),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            other => Err(format!(
                "unknown sort key '{}' (expected default, price-asc or price-desc)",
                other
            )),
        }
    }
}

/// Sort items in place; `Default` keeps catalog order
/// Items without a price always go last; equal prices fall back to the name
pub fn sort_items(items: &mut [CatalogItem], key: SortKey) {
    let descending = match key {
        SortKey::Default => return,
        SortKey::PriceAsc => false,
        SortKey::PriceDesc => true,
    };

    items.sort_by(|a, b| {
        let by_price = match (a.price, b.price) {
            (Some(pa), Some(pb)) if descending => pb.total_cmp(&pa),
            (Some(pa), Some(pb)) => pa.total_cmp(&pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        by_price.then_with(|| normalize_for_sorting(&a.name).cmp(&normalize_for_sorting(&b.name)))
    });
}

/// Normalize a name for sorting
/// - Strip leading articles
/// - Unicode NFD then lowercase
/// - Collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let without_articles = strip_leading_articles(s);
    let normalized: String = without_articles.nfd().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a leading Spanish or English article
pub fn strip_leading_articles(s: &str) -> String {
    static ARTICLES: OnceLock<Regex> = OnceLock::new();
    let re = ARTICLES.get_or_init(|| {
        Regex::new(r"^(?i)(el|la|los|las|un|una|unos|unas|the|a|an)\s+")
            .expect("article pattern is valid")
    });
    re.replace(s, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<CatalogItem> {
        serde_json::from_value(json!([
            {"id": "1", "name": "Pienso", "price": 30.0},
            {"id": "2", "name": "Arena"},
            {"id": "3", "name": "La correa", "price": 12.5},
            {"id": "4", "name": "Collar", "price": 12.5}
        ]))
        .unwrap()
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_default_keeps_order() {
        let mut list = items();
        sort_items(&mut list, SortKey::Default);
        assert_eq!(ids(&list), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_price_ascending_ties_by_name() {
        let mut list = items();
        sort_items(&mut list, SortKey::PriceAsc);
        // "La correa" sorts as "correa", after "collar"
        assert_eq!(ids(&list), vec!["4", "3", "1", "2"]);
    }

    #[test]
    fn test_price_descending_missing_last() {
        let mut list = items();
        sort_items(&mut list, SortKey::PriceDesc);
        assert_eq!(ids(&list), vec!["1", "4", "3", "2"]);
    }

    #[test]
    fn test_normalize_for_sorting() {
        assert_eq!(normalize_for_sorting("Los  Gatos"), "gatos");
        assert_eq!(normalize_for_sorting("Élite"), "e\u{301}lite");
        assert_eq!(strip_leading_articles("Una vacuna"), "vacuna");
        assert_eq!(strip_leading_articles("Lasaña"), "Lasaña");
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("DEFAULT".parse::<SortKey>().unwrap(), SortKey::Default);
        assert!("name".parse::<SortKey>().is_err());
        assert_eq!(serde_json::to_value(SortKey::PriceDesc).unwrap(), json!("price-desc"));
    }
}
