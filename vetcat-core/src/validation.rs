use crate::models::{CatalogBundle, CatalogItem, CategoryMapEntry};
use std::collections::HashSet;

/// Semantic checks the JSON Schema cannot express
/// Returns Ok(()) if valid, or Err(Vec<String>) with validation errors
pub fn validate_bundle(bundle: &CatalogBundle) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_items("Product", &bundle.catalogs.products, &mut errors);
    validate_items("Service", &bundle.catalogs.services, &mut errors);
    validate_category_map(&bundle.categories, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_items(kind: &str, items: &[CatalogItem], errors: &mut Vec<String>) {
    let mut ids = HashSet::new();

    for (idx, item) in items.iter().enumerate() {
        let item_ref = format!("{} #{} ('{}')", kind, idx + 1, item.name);

        if item.id.trim().is_empty() {
            errors.push(format!("{}: id cannot be empty", item_ref));
        } else if !ids.insert(item.id.as_str()) {
            errors.push(format!("{}: duplicate id '{}'", item_ref, item.id));
        }

        if item.name.trim().is_empty() {
            errors.push(format!("{}: name cannot be empty", item_ref));
        }

        if let Some(price) = item.price {
            if !price.is_finite() || price < 0.0 {
                errors.push(format!("{}: price must be a non-negative number, found {}", item_ref, price));
            }
        }
    }
}

pub fn validate_category_map(categories: &[CategoryMapEntry], errors: &mut Vec<String>) {
    let mut names = HashSet::new();

    for entry in categories {
        if entry.category_name.trim().is_empty() {
            errors.push("Category names cannot be empty".to_string());
        } else if !names.insert(entry.category_name.as_str()) {
            errors.push(format!("Duplicate category '{}'", entry.category_name));
        }

        let mut seen = HashSet::new();
        for subcategory in &entry.subcategories {
            if subcategory.trim().is_empty() {
                errors.push(format!("Category '{}' contains empty subcategory", entry.category_name));
            } else if !seen.insert(subcategory.as_str()) {
                errors.push(format!(
                    "Category '{}' has duplicate subcategory: '{}'",
                    entry.category_name, subcategory
                ));
            }
        }
    }
}
