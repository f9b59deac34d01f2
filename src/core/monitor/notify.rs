//! Desktop notifications for newly appeared items.

use log::{debug, warn};
use notify_rust::Notification;

use crate::core::monitor::diff::new_items;
use crate::core::monitor::items::Item;

/// Diff against the previous snapshot and raise one desktop notification
/// per new item.
///
/// Delivery failures are logged and skipped; a broken notification daemon
/// must not take a working dashboard down. Callers only invoke this when
/// notifications are enabled and a previous snapshot exists.
pub fn notify_new_items(current: &[Item], previous: &[Item]) {
    for item in new_items(current, previous) {
        debug!("type=new_item item={:?}", item);

        let result = Notification::new()
            .summary(&format!("{} - {}", item.status, item.host))
            .body(&item.description)
            .show();

        if let Err(e) = result {
            warn!("scope=sending_notification error={}", e);
        }
    }
}
