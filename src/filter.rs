//! Filter engine: narrows a list of records with named predicate rules.
//!
//! A screen registers its rules once, when it mounts, and from then on only
//! changes the *values* the rules are evaluated against. An item is kept when
//! every rule that has a value in the current [`FilterState`] accepts it.
//! Values whose name has no rule are ignored, so the engine fails open.
//!
//! ```
//! use viewstate::filter::{FilterEngine, FilterRules, FilterState};
//! use viewstate::record::{Document, Record};
//! use viewstate::value::FilterValue;
//!
//! let items = Document::parse_list(r#"[
//!     {"id": "1", "status": "active"},
//!     {"id": "2", "status": "paused"}
//! ]"#).unwrap();
//! let rules = FilterRules::new().rule("status", |item: &Document, value: &FilterValue| {
//!     value.as_text() == Some("all") || item.field("status").as_text() == value.as_text()
//! });
//! let initial = FilterState::from([("status".to_string(), FilterValue::from("all"))]);
//! let mut engine = FilterEngine::new(items, rules, initial);
//! assert_eq!(engine.filtered_items().len(), 2);
//! engine.set_filter("status", "paused");
//! assert_eq!(engine.filtered_items()[0].id(), "2");
//! ```

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::value::FilterValue;

pub type Predicate<R> = Box<dyn Fn(&R, &FilterValue) -> bool>;

/// Current value per rule name.
pub type FilterState = BTreeMap<String, FilterValue>;

// ------------- FilterRules -------------
pub struct FilterRules<R> {
    rules: HashMap<String, Predicate<R>>,
}

impl<R> Default for FilterRules<R> {
    fn default() -> Self {
        Self { rules: HashMap::new() }
    }
}

impl<R> FilterRules<R> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers a predicate under `name`, replacing any earlier one.
    pub fn rule<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R, &FilterValue) -> bool + 'static,
    {
        self.rules.insert(name.into(), Box::new(predicate));
        self
    }
    pub fn get(&self, name: &str) -> Option<&Predicate<R>> {
        self.rules.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<R> fmt::Debug for FilterRules<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();
        f.debug_struct("FilterRules").field("rules", &names).finish()
    }
}

// ------------- FilterEngine -------------
pub struct FilterEngine<R> {
    items: Arc<[R]>,
    rules: FilterRules<R>,
    initial: FilterState,
    state: FilterState,
    filtered: OnceCell<Arc<[R]>>,
}

impl<R: Clone> FilterEngine<R> {
    pub fn new(items: impl Into<Arc<[R]>>, rules: FilterRules<R>, initial: FilterState) -> Self {
        Self {
            items: items.into(),
            rules,
            state: initial.clone(),
            initial,
            filtered: OnceCell::new(),
        }
    }

    pub fn items(&self) -> &Arc<[R]> {
        &self.items
    }

    /// Replaces the input list. Handing back the same `Arc` keeps the cached view.
    pub fn set_items(&mut self, items: impl Into<Arc<[R]>>) {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return;
        }
        self.items = items;
        self.filtered = OnceCell::new();
    }

    /// Replaces the value of one rule. The value is not validated; predicates
    /// decide what it means.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        let value = value.into();
        if self.state.get(&name) == Some(&value) {
            return;
        }
        debug!(rule = %name, value = %value, known = self.rules.contains(&name), "filter set");
        self.state.insert(name, value);
        self.filtered = OnceCell::new();
    }

    /// Restores the state the engine was created with.
    pub fn reset_filters(&mut self) {
        if self.state == self.initial {
            return;
        }
        debug!("filters reset");
        self.state = self.initial.clone();
        self.filtered = OnceCell::new();
    }

    pub fn filter_value(&self, name: &str) -> Option<&FilterValue> {
        self.state.get(name)
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn rules(&self) -> &FilterRules<R> {
        &self.rules
    }

    /// The items every ruled filter value accepts, in input order. When
    /// nothing is filtered out the input list itself is returned.
    pub fn filtered_items(&self) -> Arc<[R]> {
        self.filtered.get_or_init(|| self.compute()).clone()
    }

    /// Number of values that are set (not empty, null or undefined) and differ
    /// from their initial value. Only meant for badges.
    pub fn active_filter_count(&self) -> usize {
        self.state
            .iter()
            .filter(|(name, value)| !value.is_inactive() && self.initial.get(*name) != Some(*value))
            .count()
    }

    fn compute(&self) -> Arc<[R]> {
        let checks: Vec<(&Predicate<R>, &FilterValue)> = self
            .state
            .iter()
            .filter_map(|(name, value)| self.rules.get(name).map(|predicate| (predicate, value)))
            .collect();
        let kept: Vec<R> = self
            .items
            .iter()
            .filter(|&item| checks.iter().all(|&(predicate, value)| predicate(item, value)))
            .cloned()
            .collect();
        trace!(total = self.items.len(), kept = kept.len(), rules = checks.len(), "filtered items recomputed");
        if kept.len() == self.items.len() {
            return Arc::clone(&self.items);
        }
        kept.into()
    }
}

impl<R> fmt::Debug for FilterEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("items", &self.items.len())
            .field("rules", &self.rules)
            .field("state", &self.state)
            .finish()
    }
}
