//! Router state: navigation history and intent tracking.

use crate::route::Route;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Something that asks the router to show a different view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Navigate to a path (link activation, address bar, initial load).
    Path(String),
    /// Navigate to a route by name.
    Named(String),
}

/// One history slot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Path shown to the user.
    pub path: String,
    /// Route rendered at this entry; `None` when the forbidden view was shown.
    pub route: Option<Arc<Route>>,
}

/// Navigation history stack.
#[derive(Debug, Clone, Default)]
pub struct RouterState {
    history: Vec<HistoryEntry>,
    current: usize,
}

impl RouterState {
    /// Create empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current entry
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.history.get(self.current)
    }

    /// Get current path
    pub fn current_path(&self) -> Option<&str> {
        self.current().map(|entry| entry.path.as_str())
    }

    /// Get the route rendered at the current entry
    pub fn current_route(&self) -> Option<&Arc<Route>> {
        self.current().and_then(|entry| entry.route.as_ref())
    }

    /// Number of history entries
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if no navigation was recorded yet
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Append an entry, dropping any forward history.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.history.is_empty() {
            self.history.push(entry);
            self.current = 0;
            return;
        }
        self.history.truncate(self.current + 1);
        self.history.push(entry);
        self.current += 1;
    }

    /// Overwrite the current entry (or push the first one).
    pub fn replace(&mut self, entry: HistoryEntry) {
        match self.history.get_mut(self.current) {
            Some(slot) => *slot = entry,
            None => self.push(entry),
        }
    }

    /// Move one entry back and overwrite it with `entry`.
    ///
    /// The entry is overwritten because the guard may have redirected or
    /// rejected the stored path since it was recorded.
    pub fn back(&mut self, entry: HistoryEntry) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current -= 1;
        self.replace(entry);
        true
    }

    /// Move one entry forward and overwrite it with `entry`.
    pub fn forward(&mut self, entry: HistoryEntry) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current += 1;
        self.replace(entry);
        true
    }

    /// Check if back navigation is possible
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if forward navigation is possible
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Path `back()` would navigate to.
    pub fn peek_back_path(&self) -> Option<&str> {
        if self.can_go_back() {
            Some(&self.history[self.current - 1].path)
        } else {
            None
        }
    }

    /// Path `forward()` would navigate to.
    pub fn peek_forward_path(&self) -> Option<&str> {
        self.history
            .get(self.current + 1)
            .map(|entry| entry.path.as_str())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.history.clear();
        self.current = 0;
    }
}

/// Cloneable handle for issuing navigation intents while the router is busy.
///
/// Every intent issued through a handle bumps the shared navigation id, so
/// an in-flight navigation can tell it has been superseded. Only the latest
/// pending intent is kept: issuing a second one before the router picks the
/// first up replaces it.
#[derive(Debug, Clone, Default)]
pub struct NavigationHandle {
    navigation_id: Arc<AtomicUsize>,
    pending: Arc<Mutex<Option<NavigationIntent>>>,
}

impl NavigationHandle {
    /// Create a handle with no pending intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a navigation to `path`.
    pub fn navigate(&self, path: impl Into<String>) {
        self.request(NavigationIntent::Path(path.into()));
    }

    /// Ask for a navigation to the route named `name`.
    pub fn navigate_named(&self, name: impl Into<String>) {
        self.request(NavigationIntent::Named(name.into()));
    }

    /// Store `intent` as the pending intent and supersede the running navigation.
    pub fn request(&self, intent: NavigationIntent) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(intent);
        self.navigation_id.fetch_add(1, Ordering::SeqCst);
    }

    /// Current navigation id.
    pub fn navigation_id(&self) -> usize {
        self.navigation_id.load(Ordering::SeqCst)
    }

    /// Start a navigation and return its id.
    pub(crate) fn start_navigation(&self) -> usize {
        self.navigation_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether navigation `nav_id` is still the latest one.
    pub fn is_navigation_current(&self, nav_id: usize) -> bool {
        self.navigation_id() == nav_id
    }

    pub(crate) fn take_pending(&self) -> Option<NavigationIntent> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Check if an intent is waiting to run
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
