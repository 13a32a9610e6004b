//! Viewstate – the view state behind list and table screens.
//!
//! Every list screen of a marketplace dashboard (orders, jobs, transactions,
//! teams, services) turns a raw, unordered list of records into something a
//! person can work with: narrowed by a few filters, ordered by a column,
//! with some rows checked and one row under the keyboard cursor. This crate
//! holds that state in four small engines, one per axis:
//!
//! * [`filter::FilterEngine`] – named predicate rules and their current values.
//! * [`sort::SortEngine`] – one active key and direction, optional comparators per key.
//! * [`selection::SelectionEngine`] – the set of selected record ids.
//! * [`navigation::NavigationEngine`] – an active index moved by arrow keys.
//!
//! The engines share nothing. A screen pipes the output of one into the next,
//! usually raw items → filter → sort → selection / navigation, and
//! [`view::ListView`] does exactly that wiring for screens that want all four.
//!
//! ## Records
//! Anything implementing [`record::Record`] can be listed: it needs a stable
//! string id and fields addressable by (dotted) name. [`record::Document`]
//! implements it for JSON objects.
//!
//! ## Derived views
//! `filtered_items`, `sorted_items` and `selected_items` are never stored as
//! state of their own. They are computed from the current state on first
//! read, cached until an input changes, and handed out as `Arc<[R]>` so the
//! next engine can take them without copying. Handing an engine the same
//! `Arc` again counts as "unchanged".
//!
//! ## Errors
//! The engines do not fail: unknown filter names are ignored, missing sort
//! values go last, ids outside the list are ignored and an empty list is
//! simply empty. Errors ([`ViewStateError`]) only come from the edges:
//! parsing records, loading [`settings::Settings`] and installing logging.
//! A predicate or comparator that panics panics in the caller.
//!
//! ## Quick Start
//! ```
//! use viewstate::filter::{FilterRules, FilterState};
//! use viewstate::record::{Document, Record};
//! use viewstate::rules;
//! use viewstate::sort::{Comparators, SortState};
//! use viewstate::view::ListView;
//!
//! let orders = Document::parse_list(r#"[
//!     {"id": "o1", "status": "pending",   "price": 30, "customer": {"name": "Noor"}},
//!     {"id": "o2", "status": "completed", "price": 12, "customer": {"name": "Ada"}},
//!     {"id": "o3", "status": "pending",   "price": 18}
//! ]"#).unwrap();
//!
//! let rules = FilterRules::new()
//!     .rule("status", rules::field_equals_unless_all("status"))
//!     .rule("search", rules::text_search(&["id", "customer.name"]));
//! let filters = FilterState::from([("status".to_string(), "all".into())]);
//! let mut view = ListView::new(orders, rules, filters, SortState::ascending("price"), Comparators::new(), |_| {});
//!
//! view.set_filter("status", "pending");
//! let visible = view.visible_items();
//! let ids: Vec<&str> = visible.iter().map(|o| o.id()).collect();
//! assert_eq!(ids, ["o3", "o1"]);
//!
//! view.toggle_select_all();
//! assert_eq!(view.selection().selected_count(), 2);
//! ```

pub mod collate;
pub mod error;
pub mod filter;
pub mod logging;
pub mod navigation;
pub mod record;
pub mod rules;
pub mod selection;
pub mod settings;
pub mod sort;
pub mod value;
pub mod view;

pub use error::{Result, ViewStateError};
pub use record::{Document, FieldValue, Record};
pub use value::FilterValue;
