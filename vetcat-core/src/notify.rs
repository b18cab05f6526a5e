use crate::filtering::ActiveFilters;
use crate::models::Mode;
use crate::sorting::SortKey;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Payload pushed to the view after every filter or mode change
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterChange {
    pub filters: ActiveFilters,
    pub search_term: String,
    pub mode: Mode,
    pub total_count: usize,
}

/// Receives engine notifications; implemented for plain closures
pub trait FilterListener {
    fn on_filter_change(&mut self, change: &FilterChange);

    fn on_sort_change(&mut self, _sort: SortKey) {}
}

impl<F> FilterListener for F
where
    F: FnMut(&FilterChange),
{
    fn on_filter_change(&mut self, change: &FilterChange) {
        self(change)
    }
}

/// Listener that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl FilterListener for NoopListener {
    fn on_filter_change(&mut self, _change: &FilterChange) {}
}

/// Listener that keeps every notification, handy for views that poll
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub changes: Vec<FilterChange>,
    pub sorts: Vec<SortKey>,
}

impl RecordingListener {
    pub fn last(&self) -> Option<&FilterChange> {
        self.changes.last()
    }
}

impl FilterListener for RecordingListener {
    fn on_filter_change(&mut self, change: &FilterChange) {
        self.changes.push(change.clone());
    }

    fn on_sort_change(&mut self, sort: SortKey) {
        self.sorts.push(sort);
    }
}

/// Synchronous, unbatched emitter wrapping a listener
#[derive(Debug)]
pub struct Notifier<L> {
    listener: L,
}

impl<L: FilterListener> Notifier<L> {
    pub fn new(listener: L) -> Self {
        Self { listener }
    }

    pub fn emit(&mut self, filters: ActiveFilters, mode: Mode, total_count: usize) {
        let change = FilterChange {
            filters,
            search_term: String::new(),
            mode,
            total_count,
        };
        trace!(%mode, total_count, "emitting filter change");
        self.listener.on_filter_change(&change);
    }

    pub fn emit_sort(&mut self, sort: SortKey) {
        trace!(sort = sort.as_str(), "emitting sort change");
        self.listener.on_sort_change(sort);
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}
