//! Sort engine: orders a list of records by one key in one direction.
//!
//! Clicking a column header calls [`SortEngine::sort_by`]: the active column
//! flips direction, any other column becomes active in ascending order.
//!
//! Without a custom comparator the value at the key (a dotted path) is read
//! from every record and compared as follows:
//!
//! * null and undefined always go last, whichever the direction,
//! * text compares with the [`Collator`] (case and accent aware),
//! * numbers compare by value, booleans as `false < true`,
//! * a column that mixes kinds compares every present value by its text form.
//!
//! A comparator registered for a key receives the two records and replaces all
//! of the above; descending order reverses its result as well. Sorting is
//! stable, so records that compare equal keep their input order.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::collate::{CollationKey, Collator};
use crate::record::{FieldValue, Record};

// ------------- SortDirection -------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
    /// Applies the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

// ------------- SortState -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Asc)
    }
    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }
}

// ------------- Comparators -------------
pub type Comparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;

pub struct Comparators<R> {
    by_key: HashMap<String, Comparator<R>>,
}

impl<R> Default for Comparators<R> {
    fn default() -> Self {
        Self { by_key: HashMap::new() }
    }
}

impl<R> Comparators<R> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers the ascending comparison for `key`.
    pub fn key<F>(mut self, key: impl Into<String>, comparator: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + 'static,
    {
        self.by_key.insert(key.into(), Box::new(comparator));
        self
    }
    pub fn get(&self, key: &str) -> Option<&Comparator<R>> {
        self.by_key.get(key)
    }
    pub fn len(&self) -> usize {
        self.by_key.len()
    }
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl<R> fmt::Debug for Comparators<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut keys: Vec<&String> = self.by_key.keys().collect();
        keys.sort();
        f.debug_struct("Comparators").field("keys", &keys).finish()
    }
}

// ------------- SortEngine -------------
pub struct SortEngine<R> {
    items: Arc<[R]>,
    initial: SortState,
    state: SortState,
    comparators: Comparators<R>,
    collator: Collator,
    sorted: OnceCell<Arc<[R]>>,
}

impl<R: Record + Clone> SortEngine<R> {
    pub fn new(items: impl Into<Arc<[R]>>, initial: SortState, comparators: Comparators<R>) -> Self {
        Self {
            items: items.into(),
            state: initial.clone(),
            initial,
            comparators,
            collator: Collator::default(),
            sorted: OnceCell::new(),
        }
    }

    pub fn with_collator(mut self, collator: Collator) -> Self {
        self.collator = collator;
        self.sorted = OnceCell::new();
        self
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
        self.sorted = OnceCell::new();
    }

    /// Flips the direction when `key` is already active, otherwise makes `key`
    /// active in ascending order.
    pub fn sort_by(&mut self, key: &str) {
        if self.state.key == key {
            self.state.direction = self.state.direction.toggled();
        } else {
            self.state = SortState::ascending(key);
        }
        debug!(key = %self.state.key, direction = %self.state.direction, "sort changed");
        self.sorted = OnceCell::new();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        if self.state.direction == direction {
            return;
        }
        debug!(key = %self.state.key, %direction, "sort direction set");
        self.state.direction = direction;
        self.sorted = OnceCell::new();
    }

    pub fn reset_sort(&mut self) {
        if self.state == self.initial {
            return;
        }
        debug!(key = %self.initial.key, direction = %self.initial.direction, "sort reset");
        self.state = self.initial.clone();
        self.sorted = OnceCell::new();
    }

    pub fn sort_state(&self) -> &SortState {
        &self.state
    }

    /// Direction to show next to a column header; `None` for inactive keys.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.state.key == key).then_some(self.state.direction)
    }

    pub fn set_comparator<F>(&mut self, key: impl Into<String>, comparator: F)
    where
        F: Fn(&R, &R) -> Ordering + 'static,
    {
        self.comparators.by_key.insert(key.into(), Box::new(comparator));
        self.sorted = OnceCell::new();
    }

    pub fn remove_comparator(&mut self, key: &str) -> bool {
        let removed = self.comparators.by_key.remove(key).is_some();
        if removed {
            self.sorted = OnceCell::new();
        }
        removed
    }

    /// A new list in sorted order; the input list is never reordered.
    pub fn sorted_items(&self) -> Arc<[R]> {
        self.sorted.get_or_init(|| self.compute()).clone()
    }

    fn compute(&self) -> Arc<[R]> {
        let items = &self.items;
        let SortState { key, direction } = &self.state;
        let direction = *direction;
        let mut order: Vec<usize> = (0..items.len()).collect();
        match self.comparators.get(key) {
            Some(comparator) => {
                order.sort_by(|&a, &b| direction.apply(comparator(&items[a], &items[b])));
            }
            None => {
                let mut values: Vec<SortValue<'_>> = items
                    .iter()
                    .map(|item| SortValue::extract(item.field(key), &self.collator))
                    .collect();
                if is_mixed(&values) {
                    for value in &mut values {
                        value.key_as_text(&self.collator);
                    }
                }
                order.sort_by(|&a, &b| values[a].compare(&values[b], direction, &self.collator));
            }
        }
        trace!(items = items.len(), key = %key, %direction, "sorted items recomputed");
        order.into_iter().map(|i| items[i].clone()).collect()
    }
}

impl<R> fmt::Debug for SortEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SortEngine")
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("comparators", &self.comparators)
            .field("collator", &self.collator)
            .finish()
    }
}

// ------------- default comparison -------------
/// Compares two field values the way the sort engine does when no comparator
/// is registered for the key and the column holds a single kind of value.
/// Values of different kinds compare by their text form.
pub fn compare_field_values(
    a: &FieldValue<'_>,
    b: &FieldValue<'_>,
    direction: SortDirection,
    collator: &Collator,
) -> Ordering {
    compare_with_keys(a, None, b, None, direction, collator)
}

// a field value with its collation key, computed once per sort
struct SortValue<'a> {
    value: FieldValue<'a>,
    key: Option<CollationKey>,
}

impl<'a> SortValue<'a> {
    fn extract(value: FieldValue<'a>, collator: &Collator) -> Self {
        let key = match &value {
            FieldValue::Text(s) | FieldValue::Other(s) => Some(collator.key(s)),
            _ => None,
        };
        Self { value, key }
    }
    // every present value of a mixed column orders by its text form
    fn key_as_text(&mut self, collator: &Collator) {
        if self.key.is_none() && !self.value.is_nullish() {
            self.key = Some(collator.key(&self.value.to_text()));
        }
    }
    fn compare(&self, other: &Self, direction: SortDirection, collator: &Collator) -> Ordering {
        compare_with_keys(&self.value, self.key.as_ref(), &other.value, other.key.as_ref(), direction, collator)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Bool,
    Text,
}

fn kind(value: &FieldValue<'_>) -> Option<Kind> {
    match value {
        FieldValue::Undefined | FieldValue::Null => None,
        FieldValue::Number(_) => Some(Kind::Number),
        FieldValue::Bool(_) => Some(Kind::Bool),
        FieldValue::Text(_) | FieldValue::Other(_) => Some(Kind::Text),
    }
}

// a column is mixed when its present values are of more than one kind
fn is_mixed(values: &[SortValue<'_>]) -> bool {
    let mut kinds = values.iter().filter_map(|v| kind(&v.value));
    match kinds.next() {
        None => false,
        Some(first) => kinds.any(|k| k != first),
    }
}

fn compare_with_keys(
    a: &FieldValue<'_>,
    a_key: Option<&CollationKey>,
    b: &FieldValue<'_>,
    b_key: Option<&CollationKey>,
    direction: SortDirection,
    collator: &Collator,
) -> Ordering {
    // missing data sits at the bottom in both directions
    match (a.is_nullish(), b.is_nullish()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = match (a_key, b_key, a, b) {
        (Some(x), Some(y), _, _) => x.cmp(y),
        (_, _, FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (_, _, FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => collator.compare(&a.to_text(), &b.to_text()),
    };
    direction.apply(ordering)
}
