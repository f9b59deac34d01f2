use zbxmon::core::monitor::diff::{new_items, SnapshotTracker};
use zbxmon::core::monitor::items::Item;

fn item(host: &str, status: &str, time: &str) -> Item {
    Item {
        host: host.to_string(),
        status: status.to_string(),
        description: format!("problem on {}", host),
        time: time.to_string(),
        ack: false,
        url: format!("https://zabbix.example.com/tr_events.php?triggerid={}", host),
    }
}

#[test]
fn test_equal_collections_produce_empty_diff() {
    let current = vec![
        item("web-1", "HIGH", "2024-05-01 10:30"),
        item("db-1", "CRITICAL", "2024-05-01 10:31"),
    ];

    assert!(new_items(&current, &current.clone()).is_empty());
}

#[test]
fn test_diff_returns_only_appeared_items() {
    let a = item("web-1", "HIGH", "2024-05-01 10:30");
    let b = item("web-2", "AVERAGE", "2024-05-01 10:32");
    let c = item("db-1", "CRITICAL", "2024-05-01 10:31");

    let current = vec![a.clone(), b.clone(), c.clone()];
    let previous = vec![a, c];

    assert_eq!(new_items(&current, &previous), vec![b]);
}

#[test]
fn test_timestamp_change_is_reported_as_new() {
    // full-value equality: a re-fired trigger with a fresh event time
    // re-notifies even though the logical problem is the same
    let current = vec![item("web-1", "HIGH", "2024-05-01 11:00")];
    let previous = vec![item("web-1", "HIGH", "2024-05-01 10:30")];

    assert_eq!(new_items(&current, &previous).len(), 1);
}

#[test]
fn test_first_cycle_never_yields_a_diff() {
    let mut tracker = SnapshotTracker::new();
    tracker.rotate(vec![
        item("web-1", "HIGH", "2024-05-01 10:30"),
        item("web-2", "AVERAGE", "2024-05-01 10:31"),
        item("db-1", "CRITICAL", "2024-05-01 10:32"),
    ]);

    // no previous snapshot exists, so there is nothing to diff against
    assert!(tracker.take_previous().is_none());
}

#[test]
fn test_second_cycle_diffs_against_first() {
    let first = vec![item("web-1", "HIGH", "2024-05-01 10:30")];
    let second = vec![
        item("web-1", "HIGH", "2024-05-01 10:30"),
        item("db-1", "CRITICAL", "2024-05-01 10:45"),
    ];

    let mut tracker = SnapshotTracker::new();
    tracker.rotate(first);
    tracker.rotate(second);

    let previous = tracker.take_previous().unwrap();
    let fresh = new_items(tracker.items(), &previous);

    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].host, "db-1");
}
