use regex::Regex;
use zbxmon::core::monitor::fetcher::assemble;
use zbxmon::core::monitor::items::Item;

fn item(host: &str, status: &str, ack: bool) -> Item {
    Item {
        host: host.to_string(),
        status: status.to_string(),
        description: format!("problem on {}", host),
        time: "-".to_string(),
        ack,
        url: String::new(),
    }
}

fn all_types() -> Vec<String> {
    ["unack", "ack", "down", "unknown"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_assemble_category_order_and_lengths() {
    let items = assemble(
        vec![item("u1", "HIGH", false)],
        vec![item("a1", "AVERAGE", true), item("a2", "HIGH", true)],
        vec![],
        vec![item("k1", "UNKNOWN", false)],
        &all_types(),
        None,
    );

    assert_eq!(items.len(), 4);
    let hosts: Vec<&str> = items.iter().map(|i| i.host.as_str()).collect();
    assert_eq!(hosts, vec!["u1", "a1", "a2", "k1"]);
}

#[test]
fn test_assemble_disabling_ack_removes_exactly_that_segment() {
    let types: Vec<String> = ["unack", "down", "unknown"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let items = assemble(
        vec![item("u1", "HIGH", false)],
        vec![item("a1", "AVERAGE", true), item("a2", "HIGH", true)],
        vec![],
        vec![item("k1", "UNKNOWN", false)],
        &types,
        None,
    );

    assert_eq!(items.len(), 2);
    let hosts: Vec<&str> = items.iter().map(|i| i.host.as_str()).collect();
    assert_eq!(hosts, vec!["u1", "k1"]);
}

#[test]
fn test_assemble_preserves_order_within_category() {
    let items = assemble(
        vec![
            item("first", "CRITICAL", false),
            item("second", "HIGH", false),
            item("third", "AVERAGE", false),
        ],
        vec![],
        vec![],
        vec![],
        &all_types(),
        None,
    );

    let hosts: Vec<&str> = items.iter().map(|i| i.host.as_str()).collect();
    assert_eq!(hosts, vec!["first", "second", "third"]);
}

#[test]
fn test_assemble_host_filter_semantics() {
    let pattern = Regex::new("^web-").unwrap();
    let items = assemble(
        vec![
            item("web-1", "HIGH", false),
            item("web-2", "HIGH", false),
            item("db-1", "HIGH", false),
        ],
        vec![],
        vec![],
        vec![],
        &all_types(),
        Some(&pattern),
    );

    let hosts: Vec<&str> = items.iter().map(|i| i.host.as_str()).collect();
    assert_eq!(hosts, vec!["web-1", "web-2"]);
}

#[test]
fn test_json_output_shape() {
    let items = vec![item("web-1", "HIGH", true)];
    let json = serde_json::to_string(&items).unwrap();

    // one line, fixed keys
    assert!(!json.contains('\n'));
    assert!(json.contains("\"host\":\"web-1\""));
    assert!(json.contains("\"desc\":\"problem on web-1\""));
    assert!(json.contains("\"ack\":true"));
    assert!(json.contains("\"time\":\"-\""));
    assert!(json.contains("\"status\":\"HIGH\""));
    assert!(json.contains("\"url\":\"\""));
}
