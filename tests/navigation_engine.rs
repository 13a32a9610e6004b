use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use viewstate::navigation::{Cursor, NavKey, NavigationEngine};
use viewstate::{Document, Record};

fn records(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| Document::from_value(json!({"id": format!("r{i}")})).expect("fixture"))
        .collect()
}

// engine over `count` records plus the ids handed to on_select
fn setup(count: usize) -> (NavigationEngine<Document>, Rc<RefCell<Vec<String>>>) {
    let committed: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&committed);
    let engine = NavigationEngine::new(records(count), move |item: &Document| {
        sink.borrow_mut().push(item.id().to_string())
    });
    (engine, committed)
}

#[test]
fn starts_at_the_first_row() {
    let (engine, _) = setup(3);
    assert_eq!(engine.cursor(), Cursor::Positioned(0));
    assert_eq!(engine.active_item().map(|r| r.id()), Some("r0"));
    assert!(engine.is_active());
}

#[test]
fn moves_clamp_at_both_ends() {
    let (mut engine, _) = setup(3);
    for _ in 0..3 {
        engine.handle_key(NavKey::ArrowUp);
    }
    assert_eq!(engine.active_index(), Some(0));
    engine.handle_key(NavKey::End);
    assert_eq!(engine.active_index(), Some(2));
    engine.handle_key(NavKey::ArrowDown);
    assert_eq!(engine.active_index(), Some(2));
    engine.handle_key(NavKey::ArrowUp);
    assert_eq!(engine.active_index(), Some(1));
    engine.handle_key(NavKey::Home);
    assert_eq!(engine.active_index(), Some(0));
}

#[test]
fn enter_commits_without_moving() {
    let (mut engine, committed) = setup(3);
    engine.handle_key(NavKey::End);
    assert!(engine.handle_key(NavKey::Enter));
    assert_eq!(engine.active_index(), Some(2));
    assert_eq!(*committed.borrow(), ["r2"]);
}

#[test]
fn page_keys_move_by_page_size() {
    let (engine, _) = setup(10);
    let mut engine = engine.with_page_size(4);
    engine.handle_key(NavKey::PageDown);
    assert_eq!(engine.active_index(), Some(4));
    engine.handle_key(NavKey::PageDown);
    engine.handle_key(NavKey::PageDown);
    assert_eq!(engine.active_index(), Some(9));
    engine.handle_key(NavKey::PageUp);
    assert_eq!(engine.active_index(), Some(5));
}

#[test]
fn inactive_engines_ignore_keys() {
    let (mut engine, committed) = setup(3);
    engine.set_active(false);
    assert!(!engine.handle_key(NavKey::ArrowDown));
    assert!(!engine.handle_key(NavKey::Enter));
    assert_eq!(engine.active_index(), Some(0));
    assert!(committed.borrow().is_empty());
    engine.set_active(true);
    assert!(engine.handle_key(NavKey::ArrowDown));
    assert_eq!(engine.active_index(), Some(1));
}

#[test]
fn empty_lists_are_idle() {
    let (mut engine, committed) = setup(0);
    assert_eq!(engine.cursor(), Cursor::Idle);
    for key in [NavKey::ArrowDown, NavKey::ArrowUp, NavKey::Home, NavKey::End, NavKey::Enter] {
        assert!(!engine.handle_key(key));
    }
    assert_eq!(engine.active_index(), None);
    assert!(committed.borrow().is_empty());
}

#[test]
fn shrinking_the_list_clamps_the_cursor() {
    let (mut engine, _) = setup(5);
    engine.handle_key(NavKey::End);
    engine.set_items(records(2));
    assert_eq!(engine.active_index(), Some(1));
    engine.set_items(Vec::<Document>::new());
    assert_eq!(engine.cursor(), Cursor::Idle);
    engine.set_items(records(4));
    assert_eq!(engine.active_index(), Some(0));
}

#[test]
fn key_names() {
    let (mut engine, _) = setup(3);
    assert!(engine.handle_key_name("ArrowDown"));
    assert!(!engine.handle_key_name("Tab"));
    assert_eq!(engine.active_index(), Some(1));
    assert_eq!(NavKey::from_name("PageUp"), Some(NavKey::PageUp));
    assert_eq!(NavKey::from_name("arrowdown"), None);
}

#[test]
fn listener_follows_activity_and_contents() {
    let events: Rc<RefCell<Vec<bool>>> = Rc::default();
    let sink = Rc::clone(&events);
    let (engine, _) = setup(2);
    let mut engine = engine.on_listener_change(move |attached| sink.borrow_mut().push(attached));
    assert!(engine.is_listening());

    engine.set_active(false);
    engine.set_active(false);
    engine.set_active(true);
    engine.set_items(Vec::<Document>::new());
    engine.set_items(records(1));
    assert_eq!(*events.borrow(), [true, false, true, false, true]);

    drop(engine);
    assert_eq!(events.borrow().last(), Some(&false));
    assert_eq!(events.borrow().len(), 6);
}

#[test]
fn idle_engines_attach_once_rows_arrive() {
    let events: Rc<RefCell<Vec<bool>>> = Rc::default();
    let sink = Rc::clone(&events);
    let (engine, _) = setup(0);
    let mut engine = engine.on_listener_change(move |attached| sink.borrow_mut().push(attached));
    assert!(!engine.is_listening());
    assert!(events.borrow().is_empty());
    engine.set_items(records(3));
    assert_eq!(*events.borrow(), [true]);
    engine.set_active(false);
    drop(engine);
    // already detached, nothing more on drop
    assert_eq!(*events.borrow(), [true, false]);
}
