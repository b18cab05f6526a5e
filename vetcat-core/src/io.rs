use crate::error::CatalogError;
use crate::models::CatalogBundle;
use crate::schema::bundle_json_schema;
use crate::schema_validation::validate_against_schema;
use crate::validation::validate_bundle;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a catalog bundle from JSON text
/// Checks the JSON Schema first, then the semantic rules
pub fn parse_bundle(contents: &str) -> Result<CatalogBundle, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    validate_against_schema(&bundle_json_schema(), &value).map_err(CatalogError::Schema)?;

    let bundle: CatalogBundle = serde_json::from_value(value)?;
    validate_bundle(&bundle).map_err(CatalogError::Validation)?;
    Ok(bundle)
}

/// Load a catalog bundle from a JSON file
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<CatalogBundle, CatalogError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let bundle = parse_bundle(&contents)?;
    debug!(
        path = %path.display(),
        products = bundle.catalogs.products.len(),
        services = bundle.catalogs.services.len(),
        categories = bundle.categories.len(),
        "loaded catalog bundle"
    );
    Ok(bundle)
}

/// Save a catalog bundle to a JSON file with pretty printing
pub fn save_bundle<P: AsRef<Path>>(bundle: &CatalogBundle, path: P) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(bundle)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let bundle: CatalogBundle = serde_json::from_value(json!({
            "products": [{"id": "p1", "name": "Pienso", "brand": "Royal Canin", "subcategories": "Perros"}],
            "services": [{"id": "s1", "name": "Consulta", "clinicName": "Norte"}],
            "categories": [{"categoryName": "Alimentos", "subcategories": ["Perros"]}]
        }))
        .unwrap();

        save_bundle(&bundle, &path).unwrap();
        assert_eq!(load_bundle(&path).unwrap(), bundle);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bundle(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_schema_error_before_semantic_checks() {
        let err = parse_bundle(r#"{"products": [{"id": "p1"}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Schema(_)));
        assert_eq!(err.details().len(), 1);
    }

    #[test]
    fn test_semantic_error() {
        let err = parse_bundle(r#"{"products": [{"id": "p1", "name": ""}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed:"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_bundle("{products: ").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
