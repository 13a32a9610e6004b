use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::json;
use viewstate::collate::Collator;
use viewstate::sort::{Comparators, SortDirection, SortEngine, SortState};
use viewstate::{Document, FieldValue, Record};

fn docs(values: serde_json::Value) -> Vec<Document> {
    serde_json::from_value(values).expect("fixture")
}

fn setup() -> SortEngine<Document> {
    let products = docs(json!([
        {"id": "p1", "name": "Zebra lamp",  "price": 40, "in_stock": true,  "priority": "low"},
        {"id": "p2", "name": "apple crate", "price": 9,  "in_stock": false, "priority": "high"},
        {"id": "p3", "name": "Äpfel press", "price": 40, "priority": "medium"},
        {"id": "p4", "name": "Banana hook", "price": 100, "in_stock": true, "priority": "high"},
        {"id": "p5", "name": null,          "price": 12, "in_stock": false, "priority": "low"}
    ]));
    let comparators = Comparators::new().key("priority", |a: &Document, b: &Document| {
        rank(a).cmp(&rank(b))
    });
    SortEngine::new(products, SortState::ascending("price"), comparators)
}

fn rank(item: &Document) -> u8 {
    match item.field("priority").as_text() {
        Some("high") => 0,
        Some("medium") => 1,
        _ => 2,
    }
}

fn ids(items: &[Document]) -> Vec<&str> {
    items.iter().map(|o| o.id()).collect()
}

#[test]
fn numbers_sort_by_value_and_ties_keep_input_order() {
    let mut engine = setup();
    assert_eq!(ids(&engine.sorted_items()), ["p2", "p5", "p1", "p3", "p4"]);
    engine.set_sort_direction(SortDirection::Desc);
    // p1 and p3 tie on price and stay in input order
    assert_eq!(ids(&engine.sorted_items()), ["p4", "p1", "p3", "p5", "p2"]);
}

#[test]
fn sort_by_toggles_the_active_key() {
    let mut engine = setup();
    engine.sort_by("name");
    assert_eq!(engine.sort_state(), &SortState::ascending("name"));
    engine.sort_by("name");
    assert_eq!(engine.sort_state(), &SortState::descending("name"));
    engine.sort_by("name");
    assert_eq!(engine.sort_state(), &SortState::ascending("name"));
    // switching keys always starts ascending
    engine.sort_by("name");
    engine.sort_by("price");
    assert_eq!(engine.sort_state(), &SortState::ascending("price"));
}

#[test]
fn missing_values_go_last_in_both_directions() {
    let items = docs(json!([{"id": "a", "v": 5}, {"id": "b"}, {"id": "c", "v": 1}]));
    let mut engine = SortEngine::new(items, SortState::ascending("v"), Comparators::new());
    assert_eq!(ids(&engine.sorted_items()), ["c", "a", "b"]);
    engine.sort_by("v");
    assert_eq!(ids(&engine.sorted_items()), ["a", "c", "b"]);
}

#[test]
fn text_is_case_and_accent_aware() {
    let mut engine = setup();
    engine.sort_by("name");
    assert_eq!(ids(&engine.sorted_items()), ["p3", "p2", "p4", "p1", "p5"]);
    engine.sort_by("name");
    // null names stay at the bottom
    assert_eq!(ids(&engine.sorted_items()), ["p1", "p4", "p2", "p3", "p5"]);
}

#[test]
fn booleans_order_false_before_true() {
    let mut engine = setup();
    engine.sort_by("in_stock");
    assert_eq!(ids(&engine.sorted_items()), ["p2", "p5", "p1", "p4", "p3"]);
    engine.sort_by("in_stock");
    assert_eq!(ids(&engine.sorted_items()), ["p1", "p4", "p2", "p5", "p3"]);
}

#[test]
fn mixed_types_compare_as_text() {
    let items = docs(json!([{"id": "a", "v": "9"}, {"id": "b", "v": 10}, {"id": "c", "v": true}]));
    let engine = SortEngine::new(items, SortState::ascending("v"), Comparators::new());
    assert_eq!(ids(&engine.sorted_items()), ["b", "a", "c"]);
}

#[test]
fn numbers_next_to_numeric_text_sort_as_text() {
    let items = docs(json!([{"id": "a", "v": 9}, {"id": "b", "v": 10}, {"id": "c", "v": "5"}, {"id": "d"}]));
    let mut engine = SortEngine::new(items, SortState::ascending("v"), Comparators::new());
    assert_eq!(ids(&engine.sorted_items()), ["b", "c", "a", "d"]);
    engine.sort_by("v");
    assert_eq!(ids(&engine.sorted_items()), ["a", "c", "b", "d"]);
}

#[test]
fn large_mixed_columns_sort_by_text() {
    let rows: Vec<serde_json::Value> = (0..2000usize)
        .map(|i| {
            let n = (i * 7919) % 100;
            match i % 5 {
                0 => json!({"id": format!("r{i}"), "v": n.to_string()}),
                1 => json!({"id": format!("r{i}")}),
                _ => json!({"id": format!("r{i}"), "v": n}),
            }
        })
        .collect();
    let mut engine = SortEngine::new(docs(json!(rows)), SortState::ascending("v"), Comparators::new());
    let collator = Collator::default();
    for _ in 0..2 {
        let sorted = engine.sorted_items();
        assert_eq!(sorted.len(), 2000);
        let texts: Vec<Option<String>> = sorted
            .iter()
            .map(|r| r.field("v").as_number().map(|n| n.to_string()).or(r.field("v").as_text().map(String::from)))
            .collect();
        let present = texts.iter().take_while(|t| t.is_some()).count();
        assert_eq!(present, 1600);
        assert!(texts[present..].iter().all(Option::is_none));
        let direction = engine.sort_state().direction;
        for pair in texts[..present].windows(2) {
            let (a, b) = (pair[0].as_deref().unwrap_or_default(), pair[1].as_deref().unwrap_or_default());
            assert_ne!(direction.apply(collator.compare(a, b)), Ordering::Greater);
        }
        engine.sort_by("v");
    }
}

struct Reading {
    id: String,
    value: Option<f64>,
}

impl Record for Reading {
    fn id(&self) -> &str {
        &self.id
    }
    fn field(&self, _: &str) -> FieldValue<'_> {
        self.value.map_or(FieldValue::Undefined, FieldValue::Number)
    }
}

#[test]
fn nan_sorts_after_every_number() {
    let readings: Vec<Arc<Reading>> = [Some(3.0), Some(f64::NAN), None, Some(-1.0), Some(f64::NAN), Some(2.5)]
        .into_iter()
        .enumerate()
        .map(|(i, value)| Arc::new(Reading { id: format!("m{i}"), value }))
        .collect();
    let mut engine = SortEngine::new(readings, SortState::ascending("value"), Comparators::new());
    let order: Vec<String> = engine.sorted_items().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(order, ["m3", "m5", "m0", "m1", "m4", "m2"]);
    engine.sort_by("value");
    let order: Vec<String> = engine.sorted_items().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(order, ["m1", "m4", "m0", "m5", "m3", "m2"]);
}

#[test]
fn custom_comparators_are_reversed_too() {
    let mut engine = setup();
    engine.sort_by("priority");
    assert_eq!(ids(&engine.sorted_items()), ["p2", "p4", "p3", "p1", "p5"]);
    engine.sort_by("priority");
    assert_eq!(ids(&engine.sorted_items()), ["p1", "p5", "p3", "p2", "p4"]);
}

#[test]
fn comparators_can_be_swapped_at_runtime() {
    let mut engine = setup();
    engine.set_comparator("price", |a: &Document, b: &Document| {
        // cheap first, but everything above 20 counts as one bracket
        let bracket = |d: &Document| d.field("price").as_number().map(|p| p > 20.0);
        bracket(a).cmp(&bracket(b))
    });
    assert_eq!(ids(&engine.sorted_items()), ["p2", "p5", "p1", "p3", "p4"]);
    assert!(engine.remove_comparator("price"));
    assert!(!engine.remove_comparator("price"));
    assert_eq!(ids(&engine.sorted_items()), ["p2", "p5", "p1", "p3", "p4"]);
    engine.set_comparator("price", |_: &Document, _: &Document| Ordering::Equal);
    assert_eq!(ids(&engine.sorted_items()), ["p1", "p2", "p3", "p4", "p5"]);
}

#[test]
fn reset_returns_to_the_initial_sort() {
    let mut engine = setup();
    engine.sort_by("name");
    engine.sort_by("name");
    engine.reset_sort();
    assert_eq!(engine.sort_state(), &SortState::ascending("price"));
    assert_eq!(engine.direction_for("price"), Some(SortDirection::Asc));
    assert_eq!(engine.direction_for("name"), None);
}

#[test]
fn input_list_is_never_reordered() {
    let engine = setup();
    let before = ids(engine.items()).join(",");
    let sorted = engine.sorted_items();
    assert!(!Arc::ptr_eq(&sorted, engine.items()));
    assert_eq!(ids(engine.items()).join(","), before);
}

#[test]
fn nested_keys_and_numeric_collation() {
    let items = docs(json!([
        {"id": "a", "meta": {"code": "item10"}},
        {"id": "b", "meta": {"code": "item2"}},
        {"id": "c", "meta": {}}
    ]));
    let engine = SortEngine::new(items.clone(), SortState::ascending("meta.code"), Comparators::new());
    assert_eq!(ids(&engine.sorted_items()), ["a", "b", "c"]);
    let engine = SortEngine::new(items, SortState::ascending("meta.code"), Comparators::new())
        .with_collator(Collator::numeric(true));
    assert_eq!(ids(&engine.sorted_items()), ["b", "a", "c"]);
}

#[test]
fn empty_lists_sort_to_empty_lists() {
    let mut engine: SortEngine<Document> = SortEngine::new(Vec::<Document>::new(), SortState::ascending("price"), Comparators::new());
    assert!(engine.sorted_items().is_empty());
    engine.sort_by("price");
    assert!(engine.sorted_items().is_empty());
}
