use crate::facets::{build_facet_groups, build_subcategory_facets, FacetGroupKey, FacetGroupSet};
use crate::filtering::ActiveFilters;
use crate::models::{CatalogItem, Catalogs, CategoryMapEntry, Mode};
use tracing::{debug, trace};

/// Owns the facet activation state for one catalog session
///
/// Every change builds a fresh `FacetGroupSet` and bumps `revision`, so a
/// view can detect change by comparing revisions.
#[derive(Debug, Clone)]
pub struct FilterStore {
    catalogs: Catalogs,
    category_map: Vec<CategoryMapEntry>,
    state: FacetGroupSet,
    revision: u64,
}

impl FilterStore {
    pub fn new(mode: Mode, catalogs: Catalogs, category_map: Vec<CategoryMapEntry>) -> Self {
        let state = build_facet_groups(mode, &catalogs, &category_map);
        Self {
            catalogs,
            category_map,
            state,
            revision: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn state(&self) -> &FacetGroupSet {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn category_map(&self) -> &[CategoryMapEntry] {
        &self.category_map
    }

    pub fn active_filters(&self) -> ActiveFilters {
        self.state.active_filters()
    }

    /// Switch catalogs, rebuilding every group; returns false if already in `mode`
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode() {
            return false;
        }
        debug!(%mode, "switching catalog mode");
        let next = build_facet_groups(mode, &self.catalogs, &self.category_map);
        self.commit(next);
        true
    }

    /// Toggle a facet; returns false when the group or facet does not exist
    pub fn toggle_facet(&mut self, key: FacetGroupKey, name: &str) -> bool {
        let mut next = self.state.clone();
        let previous_category = next.active_name(FacetGroupKey::Category).map(str::to_owned);

        {
            let Some(group) = next.group_mut(key) else {
                debug!(group = %key, mode = %self.mode(), "group not available in this mode");
                return false;
            };
            let Some(pos) = group.iter().position(|f| f.name == name) else {
                debug!(group = %key, facet = name, "no such facet");
                return false;
            };

            if key.is_radio() {
                let was_active = group[pos].active;
                for (i, facet) in group.iter_mut().enumerate() {
                    facet.active = i == pos && !was_active;
                }
            } else {
                group[pos].active = !group[pos].active;
            }
        }

        if key == FacetGroupKey::Category {
            clear_subcategories(&mut next);
        }

        self.refresh_subcategories(&mut next, previous_category.as_deref());
        self.commit(next);
        true
    }

    /// Deactivate the first active facet called `name`, whatever its group
    pub fn remove_facet_by_name(&mut self, name: &str) -> bool {
        let mut next = self.state.clone();
        let previous_category = next.active_name(FacetGroupKey::Category).map(str::to_owned);

        let mut removed_from = None;
        for key in next.keys() {
            if let Some(facet) = next
                .group_mut(*key)
                .and_then(|group| group.iter_mut().find(|f| f.active && f.name == name))
            {
                facet.active = false;
                removed_from = Some(*key);
                break;
            }
        }

        let Some(key) = removed_from else {
            debug!(facet = name, "no active facet to remove");
            return false;
        };

        if key == FacetGroupKey::Category {
            clear_subcategories(&mut next);
        }

        self.refresh_subcategories(&mut next, previous_category.as_deref());
        self.commit(next);
        true
    }

    /// Rebuild the current mode's groups from scratch, all inactive
    pub fn reset_all(&mut self) {
        let next = build_facet_groups(self.mode(), &self.catalogs, &self.category_map);
        self.commit(next);
    }

    /// Products currently matching the active filters
    pub fn filtered_products(&self) -> Vec<CatalogItem> {
        crate::filtering::filter_catalog(&self.catalogs.products, &self.active_filters(), &self.category_map)
    }

    fn refresh_subcategories(&self, next: &mut FacetGroupSet, previous_category: Option<&str>) {
        let active_category = next.active_name(FacetGroupKey::Category).map(str::to_owned);
        if active_category.as_deref() == previous_category {
            return;
        }

        if let FacetGroupSet::Products(products) = next {
            debug!(category = ?active_category, "recomputing subcategory facets");
            products.subcategories = build_subcategory_facets(
                active_category.as_deref(),
                &self.catalogs.products,
                &self.category_map,
                &products.subcategories,
            );
        }
    }

    fn commit(&mut self, next: FacetGroupSet) {
        self.state = next;
        self.revision += 1;
        trace!(revision = self.revision, "filter state replaced");
    }
}

fn clear_subcategories(state: &mut FacetGroupSet) {
    if let Some(group) = state.group_mut(FacetGroupKey::Subcategories) {
        for facet in group.iter_mut() {
            facet.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(mode: Mode) -> FilterStore {
        let catalogs: Catalogs = serde_json::from_value(json!({
            "products": [
                {"id": "1", "name": "Pienso", "brand": "Royal Canin", "subcategories": "Perros"},
                {"id": "2", "name": "Arena", "brand": "Catsan", "subcategories": "Gatos"},
                {"id": "3", "name": "Correa", "brand": "Kong", "subcategories": "Correas"},
                {"id": "4", "name": "Snack", "brand": "Royal Canin", "subcategories": "Perros"}
            ],
            "services": [
                {"id": "s1", "name": "Consulta", "clinicName": "Norte"},
                {"id": "s2", "name": "Baño", "clinicName": "Sur"}
            ]
        }))
        .unwrap();
        let map = serde_json::from_value(json!([
            {"categoryName": "Alimentos", "subcategories": ["Perros", "Gatos", "Aves"]},
            {"categoryName": "Accesorios", "subcategories": ["Correas"]}
        ]))
        .unwrap();
        FilterStore::new(mode, catalogs, map)
    }

    fn active(store: &FilterStore, key: FacetGroupKey) -> Vec<String> {
        store.state().active_names(key)
    }

    #[test]
    fn test_radio_toggle_selects_and_deselects() {
        let mut store = store(Mode::Products);

        assert!(store.toggle_facet(FacetGroupKey::Brand, "Catsan"));
        assert_eq!(active(&store, FacetGroupKey::Brand), ["Catsan"]);

        assert!(store.toggle_facet(FacetGroupKey::Brand, "Kong"));
        assert_eq!(active(&store, FacetGroupKey::Brand), ["Kong"]);

        assert!(store.toggle_facet(FacetGroupKey::Brand, "Kong"));
        assert!(active(&store, FacetGroupKey::Brand).is_empty());
    }

    #[test]
    fn test_category_selection_builds_subcategories() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Category, "Alimentos");

        let subcategories = store.state().group(FacetGroupKey::Subcategories).unwrap();
        let names: Vec<_> = subcategories.iter().map(|f| (f.name.as_str(), f.count)).collect();
        // "Aves" is permitted but no product carries it
        assert_eq!(names, vec![("Perros", 2), ("Gatos", 1)]);

        store.toggle_facet(FacetGroupKey::Category, "Alimentos");
        assert!(store.state().group(FacetGroupKey::Subcategories).unwrap().is_empty());
    }

    #[test]
    fn test_checkbox_toggle_is_independent() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Category, "Alimentos");
        store.toggle_facet(FacetGroupKey::Subcategories, "Perros");
        store.toggle_facet(FacetGroupKey::Subcategories, "Gatos");
        assert_eq!(active(&store, FacetGroupKey::Subcategories), ["Perros", "Gatos"]);

        store.toggle_facet(FacetGroupKey::Subcategories, "Perros");
        assert_eq!(active(&store, FacetGroupKey::Subcategories), ["Gatos"]);
    }

    #[test]
    fn test_unknown_group_or_facet_is_noop() {
        let mut store = store(Mode::Products);
        let before = store.revision();

        assert!(!store.toggle_facet(FacetGroupKey::Clinic, "Norte"));
        assert!(!store.toggle_facet(FacetGroupKey::Brand, "Acme"));
        assert!(!store.remove_facet_by_name("Acme"));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_every_change_bumps_revision() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Brand, "Kong");
        store.remove_facet_by_name("Kong");
        store.reset_all();
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_remove_brand_leaves_category() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Category, "Alimentos");
        store.toggle_facet(FacetGroupKey::Brand, "Catsan");

        assert!(store.remove_facet_by_name("Catsan"));
        assert!(active(&store, FacetGroupKey::Brand).is_empty());
        assert_eq!(active(&store, FacetGroupKey::Category), ["Alimentos"]);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Category, "Alimentos");
        store.toggle_facet(FacetGroupKey::Subcategories, "Gatos");
        store.toggle_facet(FacetGroupKey::Brand, "Catsan");

        store.reset_all();
        assert!(store.active_filters().is_empty());
        assert!(store.state().group(FacetGroupKey::Subcategories).unwrap().is_empty());
    }

    #[test]
    fn test_mode_switch_rebuilds() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Brand, "Kong");

        assert!(store.set_mode(Mode::Services));
        assert_eq!(store.mode(), Mode::Services);
        assert!(store.toggle_facet(FacetGroupKey::Clinic, "Sur"));
        assert_eq!(active(&store, FacetGroupKey::Clinic), ["Sur"]);

        assert!(!store.set_mode(Mode::Services));
        assert!(store.set_mode(Mode::Products));
        assert!(store.active_filters().is_empty());
    }

    #[test]
    fn test_filtered_products_follow_state() {
        let mut store = store(Mode::Products);
        store.toggle_facet(FacetGroupKey::Brand, "Royal Canin");
        let ids: Vec<_> = store.filtered_products().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }
}
