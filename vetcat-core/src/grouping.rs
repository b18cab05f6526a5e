use crate::facets::FacetGroupKey;
use crate::models::{resolve_category, CatalogItem, CategoryMapEntry};
use crate::sorting::normalize_for_sorting;

/// Group name for items lacking the grouped attribute
pub const UNSPECIFIED_GROUP: &str = "_unspecified_";

/// Items sharing one facet value
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// Group items by a facet attribute, keeping first-seen group order
pub fn group_items_by_facet(
    items: &[CatalogItem],
    key: FacetGroupKey,
    category_map: &[CategoryMapEntry],
) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();

    for item in items {
        let value = match key {
            FacetGroupKey::Category => item.tag().and_then(|tag| resolve_category(category_map, tag)),
            FacetGroupKey::Subcategories => item.tag(),
            FacetGroupKey::Brand => item.brand(),
            FacetGroupKey::Clinic => item.clinic(),
        }
        .unwrap_or(UNSPECIFIED_GROUP);

        match groups.iter_mut().find(|g| g.name == value) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ItemGroup {
                name: value.to_string(),
                items: vec![item.clone()],
            }),
        }
    }

    groups
}

/// Group names in normalized alphabetical order, unspecified last
pub fn get_sorted_group_names(groups: &[ItemGroup]) -> Vec<String> {
    let mut names: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
    names.sort_by(|a, b| {
        (a == UNSPECIFIED_GROUP)
            .cmp(&(b == UNSPECIFIED_GROUP))
            .then_with(|| normalize_for_sorting(a).cmp(&normalize_for_sorting(b)))
    });
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<CatalogItem> {
        serde_json::from_value(json!([
            {"id": "1", "name": "Pienso", "brand": "Royal Canin", "subcategories": "Perros"},
            {"id": "2", "name": "Correa", "subcategories": "Correas"},
            {"id": "3", "name": "Arena", "brand": "Catsan", "subcategories": "Gatos"},
            {"id": "4", "name": "Snack", "brand": "Royal Canin", "subcategories": "Perros"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_group_by_brand_first_seen() {
        let groups = group_items_by_facet(&items(), FacetGroupKey::Brand, &[]);
        let summary: Vec<_> = groups.iter().map(|g| (g.name.as_str(), g.items.len())).collect();
        assert_eq!(summary, vec![("Royal Canin", 2), (UNSPECIFIED_GROUP, 1), ("Catsan", 1)]);
    }

    #[test]
    fn test_group_by_category_resolves_tags() {
        let map: Vec<CategoryMapEntry> = serde_json::from_value(json!([
            {"categoryName": "Alimentos", "subcategories": ["Perros", "Gatos"]}
        ]))
        .unwrap();
        let groups = group_items_by_facet(&items(), FacetGroupKey::Category, &map);
        let summary: Vec<_> = groups.iter().map(|g| (g.name.as_str(), g.items.len())).collect();
        assert_eq!(summary, vec![("Alimentos", 3), (UNSPECIFIED_GROUP, 1)]);
    }

    #[test]
    fn test_sorted_group_names_put_unspecified_last() {
        let groups = group_items_by_facet(&items(), FacetGroupKey::Brand, &[]);
        assert_eq!(
            get_sorted_group_names(&groups),
            vec!["Catsan", "Royal Canin", UNSPECIFIED_GROUP]
        );
    }
}
