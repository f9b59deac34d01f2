//! Change detection between polling cycles.

use crate::core::monitor::items::Item;

/// Items present in `current` but absent from `previous`.
///
/// Full-value equality: a changed description or timestamp on the same
/// underlying problem counts as a new item. Multiset semantics, each
/// previous element cancels at most one current element. Result order
/// follows `current`.
pub fn new_items(current: &[Item], previous: &[Item]) -> Vec<Item> {
    let mut remaining: Vec<&Item> = previous.iter().collect();
    let mut fresh = Vec::new();

    for item in current {
        match remaining.iter().position(|prev| *prev == item) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => fresh.push(item.clone()),
        }
    }

    fresh
}

/// Snapshot rotation across poll cycles.
///
/// Owns the current item collection and, between fetch and diff, the
/// previous one. The first rotation stores no previous snapshot, which is
/// what keeps the very first poll from being reported as all-new.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    items: Vec<Item>,
    previous: Option<Vec<Item>>,
    fetched_once: bool,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently fetched item collection.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Replace the current snapshot with a freshly fetched collection.
    pub fn rotate(&mut self, fetched: Vec<Item>) {
        if self.fetched_once {
            self.previous = Some(std::mem::replace(&mut self.items, fetched));
        } else {
            self.items = fetched;
            self.fetched_once = true;
        }
    }

    /// Surrender the previous snapshot for diffing; it is not retained.
    pub fn take_previous(&mut self) -> Option<Vec<Item>> {
        self.previous.take()
    }
}
