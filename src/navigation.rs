//! Keyboard navigation: a single cursor over a list, moved by arrow keys.
//!
//! The engine is a two state machine. It is `Idle` while the list is empty
//! and `Positioned` at some index `0 <= index < len` otherwise, starting at
//! index 0. Moves clamp at the ends of the list and `Enter` hands the record
//! under the cursor to the commit callback without moving.
//!
//! Keys are only processed while the engine is active. The presentation layer
//! usually installs one global key handler per engine; the listener hook
//! tells it when to attach (active and non-empty) and when to detach.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::record::Record;
use crate::settings::NavigationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    PageDown,
    PageUp,
}

impl NavKey {
    /// Parses DOM style key names (`"ArrowDown"`, `"Enter"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Enter" => Some(Self::Enter),
            "PageDown" => Some(Self::PageDown),
            "PageUp" => Some(Self::PageUp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Idle,
    Positioned(usize),
}

pub type OnSelect<R> = Box<dyn FnMut(&R)>;
pub type ListenerHook = Box<dyn FnMut(bool)>;

pub struct NavigationEngine<R> {
    items: Arc<[R]>,
    cursor: Cursor,
    active: bool,
    page_size: usize,
    on_select: OnSelect<R>,
    listener_hook: Option<ListenerHook>,
    listening: bool,
}

impl<R: Record> NavigationEngine<R> {
    /// Creates an active engine positioned at the first item, if any.
    pub fn new(items: impl Into<Arc<[R]>>, on_select: impl FnMut(&R) + 'static) -> Self {
        let items = items.into();
        let cursor = if items.is_empty() { Cursor::Idle } else { Cursor::Positioned(0) };
        Self {
            listening: !items.is_empty(),
            items,
            cursor,
            active: true,
            page_size: NavigationSettings::default().page_size,
            on_select: Box::new(on_select),
            listener_hook: None,
        }
    }

    pub fn with_settings(self, settings: &NavigationSettings) -> Self {
        self.with_page_size(settings.page_size)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Registers the attach/detach hook. It is called right away with `true`
    /// when the engine is already listening.
    pub fn on_listener_change(mut self, hook: impl FnMut(bool) + 'static) -> Self {
        let mut hook: ListenerHook = Box::new(hook);
        if self.listening {
            hook(true);
        }
        self.listener_hook = Some(hook);
        self
    }

    /// Replaces the list and clamps the cursor into it.
    pub fn set_items(&mut self, items: impl Into<Arc<[R]>>) {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return;
        }
        self.cursor = match (self.cursor, items.len()) {
            (_, 0) => Cursor::Idle,
            (Cursor::Idle, _) => Cursor::Positioned(0),
            (Cursor::Positioned(index), len) => Cursor::Positioned(index.min(len - 1)),
        };
        self.items = items;
        self.sync_listener();
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.sync_listener();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn items(&self) -> &Arc<[R]> {
        &self.items
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Idle => None,
            Cursor::Positioned(index) => Some(index),
        }
    }

    pub fn active_item(&self) -> Option<&R> {
        self.active_index().and_then(|index| self.items.get(index))
    }

    /// Processes one key. Returns whether the key was consumed, which is
    /// never the case while inactive or idle.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.active {
            return false;
        }
        let Cursor::Positioned(index) = self.cursor else {
            return false;
        };
        let last = self.items.len() - 1;
        let next = match key {
            NavKey::ArrowDown => (index + 1).min(last),
            NavKey::ArrowUp => index.saturating_sub(1),
            NavKey::Home => 0,
            NavKey::End => last,
            NavKey::PageDown => index.saturating_add(self.page_size).min(last),
            NavKey::PageUp => index.saturating_sub(self.page_size),
            NavKey::Enter => {
                let item = &self.items[index];
                debug!(index, id = item.id(), "navigation commit");
                (self.on_select)(item);
                return true;
            }
        };
        if next != index {
            debug!(?key, from = index, to = next, "cursor moved");
            self.cursor = Cursor::Positioned(next);
        }
        true
    }

    /// Like [`handle_key`](Self::handle_key) for a key name; unknown names are not consumed.
    pub fn handle_key_name(&mut self, name: &str) -> bool {
        NavKey::from_name(name).is_some_and(|key| self.handle_key(key))
    }

    fn sync_listener(&mut self) {
        let listening = self.active && !self.items.is_empty();
        if listening == self.listening {
            return;
        }
        self.listening = listening;
        debug!(listening, "navigation listener {}", if listening { "attached" } else { "detached" });
        if let Some(hook) = self.listener_hook.as_mut() {
            hook(listening);
        }
    }
}

impl<R> Drop for NavigationEngine<R> {
    fn drop(&mut self) {
        if self.listening {
            self.listening = false;
            if let Some(hook) = self.listener_hook.as_mut() {
                hook(false);
            }
        }
    }
}

impl<R> fmt::Debug for NavigationEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("items", &self.items.len())
            .field("cursor", &self.cursor)
            .field("active", &self.active)
            .field("page_size", &self.page_size)
            .field("listening", &self.listening)
            .finish()
    }
}
