use std::path::PathBuf;
use vetcat_core::*;

/// Application state: the loaded bundle and its filter session
#[derive(Debug)]
pub struct AppState {
    /// Path the bundle was loaded from
    pub bundle_path: PathBuf,
    /// Facet session over the bundle's catalogs
    pub session: FilterSession<RecordingListener>,
}

impl AppState {
    /// Load a catalog bundle and open a session in `mode`
    pub fn load(path: PathBuf, mode: Mode) -> Result<Self, CatalogError> {
        let bundle = load_bundle(&path)?;
        Ok(Self::from_bundle(path, bundle, mode))
    }

    pub fn from_bundle(bundle_path: PathBuf, bundle: CatalogBundle, mode: Mode) -> Self {
        let session = FilterSession::new(mode, bundle.catalogs, bundle.categories, RecordingListener::default());
        Self { bundle_path, session }
    }

    /// Most recent notification pushed by the session
    pub fn last_change(&self) -> Option<&FilterChange> {
        self.session.listener().last()
    }

    /// Bundle file name for headings
    pub fn bundle_name(&self) -> &str {
        self.bundle_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("catalog")
    }
}
