//! Selection Tracker for bulk actions
//!
//! Set semantics over record ids, independent of filtering. Selections are
//! not purged when filters change; callers reset them with [`SelectionTracker::clear`]
//! or [`SelectionTracker::select_all`].

use indexmap::IndexSet;

/// Record ids currently chosen for a bulk action, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    ids: IndexSet<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Replace the selection with exactly `visible_ids`
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = visible_ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Whether every visible id is selected (the "select all" checkbox state)
    pub fn all_selected<'a, I>(&self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in visible_ids {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }
}
