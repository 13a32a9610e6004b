//! A list screen wired together: raw items → filter → sort → selection and
//! navigation.
//!
//! `ListView` adds no behaviour of its own. Every call that can change the
//! filtered or sorted view pipes the new view into the engines downstream,
//! which is exactly what a screen does by hand when it uses the engines on
//! their own.

use std::sync::Arc;

use crate::filter::{FilterEngine, FilterRules, FilterState};
use crate::navigation::{NavKey, NavigationEngine};
use crate::record::Record;
use crate::selection::{SelectionChange, SelectionEngine};
use crate::settings::Settings;
use crate::sort::{Comparators, SortDirection, SortEngine, SortState};
use crate::value::FilterValue;

pub struct ListView<R> {
    filter: FilterEngine<R>,
    sort: SortEngine<R>,
    selection: SelectionEngine<R>,
    navigation: NavigationEngine<R>,
}

impl<R: Record + Clone> ListView<R> {
    pub fn new(
        items: impl Into<Arc<[R]>>,
        rules: FilterRules<R>,
        initial_filters: FilterState,
        initial_sort: SortState,
        comparators: Comparators<R>,
        on_select: impl FnMut(&R) + 'static,
    ) -> Self {
        let filter = FilterEngine::new(items, rules, initial_filters);
        let sort = SortEngine::new(filter.filtered_items(), initial_sort, comparators);
        let visible = sort.sorted_items();
        Self {
            filter,
            sort,
            selection: SelectionEngine::new(Arc::clone(&visible)),
            navigation: NavigationEngine::new(visible, on_select),
        }
    }

    /// Applies collation and paging settings.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.sort = self.sort.with_collator(settings.collator());
        self.navigation = self.navigation.with_settings(&settings.navigation);
        self.repipe();
        self
    }

    pub fn with_selection_listener(mut self, listener: impl FnMut(&SelectionChange) + 'static) -> Self {
        self.selection.set_listener(listener);
        self
    }

    pub fn with_listener_hook(mut self, hook: impl FnMut(bool) + 'static) -> Self {
        self.navigation = self.navigation.on_listener_change(hook);
        self
    }

    pub fn set_items(&mut self, items: impl Into<Arc<[R]>>) {
        self.filter.set_items(items);
        self.repipe();
    }

    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.filter.set_filter(name, value);
        self.repipe();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset_filters();
        self.repipe();
    }

    pub fn sort_by(&mut self, key: &str) {
        self.sort.sort_by(key);
        self.repipe();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort.set_sort_direction(direction);
        self.repipe();
    }

    pub fn reset_sort(&mut self) {
        self.sort.reset_sort();
        self.repipe();
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.selection.toggle_selection(id);
    }

    pub fn toggle_select_all(&mut self) {
        self.selection.toggle_select_all();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    pub fn handle_key(&mut self, key: NavKey) -> bool {
        self.navigation.handle_key(key)
    }

    pub fn set_active(&mut self, active: bool) {
        self.navigation.set_active(active);
    }

    /// The filtered, sorted list the screen renders.
    pub fn visible_items(&self) -> Arc<[R]> {
        self.sort.sorted_items()
    }

    pub fn selected_items(&self) -> Arc<[R]> {
        self.selection.selected_items()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filter.active_filter_count()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.navigation.active_index()
    }

    pub fn filter(&self) -> &FilterEngine<R> {
        &self.filter
    }

    pub fn sort(&self) -> &SortEngine<R> {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionEngine<R> {
        &self.selection
    }

    /// Bulk selection calls (`select_items`, `deselect_items`) go through here.
    pub fn selection_mut(&mut self) -> &mut SelectionEngine<R> {
        &mut self.selection
    }

    pub fn navigation(&self) -> &NavigationEngine<R> {
        &self.navigation
    }

    fn repipe(&mut self) {
        self.sort.set_items(self.filter.filtered_items());
        let visible = self.sort.sorted_items();
        self.selection.set_items(Arc::clone(&visible));
        self.navigation.set_items(visible);
    }
}
