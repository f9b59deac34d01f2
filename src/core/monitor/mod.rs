//! The poll-diff-notify core of the dashboard.

pub mod diff;
pub mod fetcher;
pub mod items;
pub mod notify;

pub use diff::{new_items, SnapshotTracker};
pub use fetcher::{assemble, fetch_hosts, fetch_items, fetch_triggers};
pub use items::{Availability, Item, Severity};
pub use notify::notify_new_items;
