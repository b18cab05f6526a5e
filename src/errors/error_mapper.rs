use colored::Colorize;
use std::io::ErrorKind;
use std::path::Path;
use vetcat_core::CatalogError;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_load_error(error: &CatalogError, path: &Path) -> (String, String, String) {
    match error {
        CatalogError::Io(io) if io.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        CatalogError::Io(io) if io.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        CatalogError::Json(err) => (
            "Invalid JSON".to_string(),
            "The catalog file is not valid JSON.".to_string(),
            err.to_string(),
        ),
        CatalogError::Schema(errors) => (
            "Schema Error".to_string(),
            "The catalog file does not match the catalog bundle schema.".to_string(),
            numbered(errors),
        ),
        CatalogError::Validation(errors) => (
            "Validation Error".to_string(),
            "The catalog file has validation errors.".to_string(),
            numbered(errors),
        ),
        other => (
            "Error Loading File".to_string(),
            "Failed to load catalog file.".to_string(),
            other.to_string(),
        ),
    }
}

fn numbered(errors: &[String]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a mapped error to stderr
pub fn print_error(title: &str, message: &str, details: &str) {
    eprintln!("{} {}", format!("{}:", title).red().bold(), message);
    if !details.is_empty() {
        eprintln!("\n{}", details);
    }
}
