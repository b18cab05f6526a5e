use tracing::info;
use vetcat_core::{FacetGroupKey, FilterListener, FilterSession, SortKey};

/// Facet interactions requested on the command line
#[derive(Debug, Default, Clone)]
pub struct FilterActions {
    pub category: Option<String>,
    pub subcategories: Vec<String>,
    pub brand: Option<String>,
    pub clinic: Option<String>,
    pub remove: Vec<String>,
    pub sort: SortKey,
    pub service_count: Option<usize>,
}

/// Replay the actions through the session, as clicks would arrive from a sidebar
/// Returns a warning for each action that did not match a facet
pub fn apply_filter_actions<L: FilterListener>(session: &mut FilterSession<L>, actions: &FilterActions) -> Vec<String> {
    let mut warnings = Vec::new();

    // Category first so the subcategory group exists before it is toggled
    let toggles = actions
        .category
        .iter()
        .map(|name| (FacetGroupKey::Category, name))
        .chain(actions.subcategories.iter().map(|name| (FacetGroupKey::Subcategories, name)))
        .chain(actions.brand.iter().map(|name| (FacetGroupKey::Brand, name)))
        .chain(actions.clinic.iter().map(|name| (FacetGroupKey::Clinic, name)));

    for (key, name) in toggles {
        if session.toggle_facet(key, name) {
            info!(group = %key, facet = name.as_str(), "facet toggled");
        } else {
            warnings.push(format!(
                "No {} facet named '{}' in {} mode",
                key,
                name,
                session.store().mode()
            ));
        }
    }

    for name in &actions.remove {
        if !session.remove_facet_by_name(name) {
            warnings.push(format!("No active facet named '{}' to remove", name));
        }
    }

    if actions.service_count.is_some() {
        session.set_service_count(actions.service_count);
    }

    if actions.sort != session.sort() {
        session.set_sort(actions.sort);
    }

    warnings
}
