use crate::facets::FacetGroupKey;
use crate::filtering::{filter_for_mode, filter_services_by_clinic};
use crate::models::{CatalogItem, Catalogs, CategoryMapEntry, Mode};
use crate::notify::{FilterListener, Notifier};
use crate::sorting::{sort_items, SortKey};
use crate::store::FilterStore;

/// Filter store, notifier and sort state for one sidebar
///
/// Every operation emits exactly one `FilterChange` (or one sort change for
/// `set_sort`), whether or not the underlying state changed.
#[derive(Debug)]
pub struct FilterSession<L: FilterListener> {
    store: FilterStore,
    notifier: Notifier<L>,
    sort: SortKey,
    service_count: Option<usize>,
}

impl<L: FilterListener> FilterSession<L> {
    pub fn new(mode: Mode, catalogs: Catalogs, category_map: Vec<CategoryMapEntry>, listener: L) -> Self {
        let mut session = Self {
            store: FilterStore::new(mode, catalogs, category_map),
            notifier: Notifier::new(listener),
            sort: SortKey::default(),
            service_count: None,
        };
        session.notify();
        session
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn listener(&self) -> &L {
        self.notifier.listener()
    }

    pub fn into_listener(self) -> L {
        self.notifier.into_listener()
    }

    pub fn toggle_facet(&mut self, key: FacetGroupKey, name: &str) -> bool {
        let changed = self.store.toggle_facet(key, name);
        self.notify();
        changed
    }

    pub fn remove_facet_by_name(&mut self, name: &str) -> bool {
        let changed = self.store.remove_facet_by_name(name);
        self.notify();
        changed
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.notify();
    }

    /// Switch catalogs; a previously supplied service count is dropped
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let changed = self.store.set_mode(mode);
        if changed {
            self.service_count = None;
        }
        self.notify();
        changed
    }

    /// Forward a sort selection to the listener
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.notifier.emit_sort(sort);
    }

    /// Override the service total with a count computed by the view
    pub fn set_service_count(&mut self, count: Option<usize>) {
        self.service_count = count;
        self.notify();
    }

    /// Items the view should list: filtered for the mode, then sorted
    pub fn visible_items(&self) -> Vec<CatalogItem> {
        let mut items = self.matching_items();
        sort_items(&mut items, self.sort);
        items
    }

    /// Total reported to the listener for the current mode
    pub fn total_count(&self) -> usize {
        match self.store.mode() {
            Mode::Products => self.store.filtered_products().len(),
            Mode::Services => self
                .service_count
                .unwrap_or_else(|| self.matching_items().len()),
        }
    }

    fn matching_items(&self) -> Vec<CatalogItem> {
        let filters = self.store.active_filters();
        let items = filter_for_mode(
            self.store.mode(),
            self.store.catalogs(),
            &filters,
            self.store.category_map(),
        );
        match self.store.mode() {
            Mode::Products => items,
            Mode::Services => filter_services_by_clinic(&items, &filters),
        }
    }

    fn notify(&mut self) {
        let total_count = self.total_count();
        self.notifier
            .emit(self.store.active_filters(), self.store.mode(), total_count);
    }
}
