//! Selection engine: the set of selected record ids over the visible list.
//!
//! The reference list is whatever the screen currently shows, usually the
//! filtered and sorted view. "Select all" is always relative to that list.
//!
//! The set is never pruned when the reference list changes. Ids selected
//! under one filter stay selected while hidden and show up again in
//! [`SelectionEngine::selected_items`] when the filter lets them back in.
//! Callers that want stale ids gone call [`SelectionEngine::deselect_items`].
//!
//! Screens that confirm bulk actions (a toast, a counter) register a listener
//! and receive a [`SelectionChange`] after every call that changed the set.

use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

// ids are hashed a lot, the fast non-cryptographic hasher suits them
use seahash::SeaHasher;
use tracing::{debug, trace};

use crate::record::Record;

pub type IdHasher = BuildHasherDefault<SeaHasher>;
pub type IdSet = HashSet<String, IdHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionAction {
    Toggled,
    SelectedAll,
    ClearedAll,
    Cleared,
    Added,
    Removed,
}

/// What a mutating call did, handed to the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub action: SelectionAction,
    pub selected_count: usize,
}

pub type SelectionListener = Box<dyn FnMut(&SelectionChange)>;

pub struct SelectionEngine<R> {
    items: Arc<[R]>,
    selected: IdSet,
    listener: Option<SelectionListener>,
    item_ids: OnceCell<IdSet>,
    selected_view: OnceCell<Arc<[R]>>,
}

impl<R: Record + Clone> SelectionEngine<R> {
    pub fn new(items: impl Into<Arc<[R]>>) -> Self {
        Self {
            items: items.into(),
            selected: IdSet::default(),
            listener: None,
            item_ids: OnceCell::new(),
            selected_view: OnceCell::new(),
        }
    }

    pub fn with_listener(mut self, listener: impl FnMut(&SelectionChange) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&SelectionChange) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn items(&self) -> &Arc<[R]> {
        &self.items
    }

    /// Replaces the reference list. Selected ids are kept as they are.
    pub fn set_items(&mut self, items: impl Into<Arc<[R]>>) {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return;
        }
        self.items = items;
        self.item_ids = OnceCell::new();
        self.selected_view = OnceCell::new();
    }

    /// Flips membership of `id`. Ids that are not in the reference list can
    /// be deselected but not selected.
    pub fn toggle_selection(&mut self, id: &str) {
        if self.selected.remove(id) {
            self.changed(SelectionAction::Toggled);
        } else if self.ids().contains(id) {
            self.selected.insert(id.to_string());
            self.changed(SelectionAction::Toggled);
        }
    }

    /// Clears the set when it holds as many ids as the reference list has
    /// items, otherwise selects exactly the ids of the reference list.
    pub fn toggle_select_all(&mut self) {
        if !self.items.is_empty() && self.selected.len() == self.items.len() {
            self.selected.clear();
            self.changed(SelectionAction::ClearedAll);
            return;
        }
        let all: IdSet = self.items.iter().map(|item| item.id().to_string()).collect();
        if all != self.selected {
            self.selected = all;
            self.changed(SelectionAction::SelectedAll);
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.changed(SelectionAction::Cleared);
    }

    /// Adds every id that is in the reference list; the rest are ignored.
    pub fn select_items<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for id in ids {
            let id = id.as_ref();
            if !self.selected.contains(id) && self.ids().contains(id) {
                self.selected.insert(id.to_string());
                added += 1;
            }
        }
        if added > 0 {
            self.changed(SelectionAction::Added);
        }
    }

    pub fn deselect_items<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for id in ids {
            if self.selected.remove(id.as_ref()) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.changed(SelectionAction::Removed);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected records of the reference list, in its order.
    pub fn selected_items(&self) -> Arc<[R]> {
        self.selected_view
            .get_or_init(|| {
                let view: Arc<[R]> = self
                    .items
                    .iter()
                    .filter(|item| self.selected.contains(item.id()))
                    .cloned()
                    .collect();
                trace!(items = self.items.len(), selected = view.len(), "selected items recomputed");
                view
            })
            .clone()
    }

    /// Size of the selection set, hidden ids included.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| self.selected.contains(item.id()))
    }

    fn ids(&self) -> &IdSet {
        self.item_ids
            .get_or_init(|| self.items.iter().map(|item| item.id().to_string()).collect())
    }

    fn changed(&mut self, action: SelectionAction) {
        self.selected_view = OnceCell::new();
        let change = SelectionChange {
            action,
            selected_count: self.selected.len(),
        };
        debug!(action = ?change.action, selected = change.selected_count, "selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(&change);
        }
    }
}

impl<R> fmt::Debug for SelectionEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("items", &self.items.len())
            .field("selected", &self.selected.len())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
