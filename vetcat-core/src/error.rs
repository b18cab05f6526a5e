use thiserror::Error;

/// Errors raised while loading or saving a catalog bundle
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema validation failed:\n{}", .0.join("\n"))]
    Schema(Vec<String>),

    #[error("Validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}

impl CatalogError {
    /// Individual messages for the two validation variants
    pub fn details(&self) -> &[String] {
        match self {
            CatalogError::Schema(errors) | CatalogError::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}
