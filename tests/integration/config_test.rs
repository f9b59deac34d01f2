use std::fs;

use tempfile::TempDir;
use zbxmon::core::config::{read_config_file, Config, PartialConfig};
use zbxmon::core::monitor::items::Severity;

fn minimal() -> PartialConfig {
    PartialConfig {
        server: Some("https://zabbix.example.com".to_string()),
        username: Some("monitor".to_string()),
        password: Some("secret".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
server = "https://zabbix.example.com"
username = "monitor"
password = "secret"
min_severity = "warning"
refresh = 15
notify = true
item_types = ["unack", "down"]
grep = "^web-"
"#,
    )
    .unwrap();

    let partial = read_config_file(&path).unwrap();
    let config = Config::validate(partial).unwrap();

    assert_eq!(config.server, "https://zabbix.example.com");
    assert_eq!(config.min_severity, Severity::Warning);
    assert_eq!(config.refresh, 15);
    assert!(config.notify);
    assert_eq!(config.item_types, vec!["unack", "down"]);
    assert!(config.grep.unwrap().is_match("web-3"));
}

#[test]
fn test_config_file_with_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "serverr = \"https://zabbix.example.com\"\n").unwrap();

    assert!(read_config_file(&path).is_err());
}

#[test]
fn test_config_file_missing_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    assert!(read_config_file(&path).is_err());
}

#[test]
fn test_flag_overrides_file_value() {
    let file = PartialConfig {
        refresh: Some(60),
        min_severity: Some("average".to_string()),
        ..minimal()
    };
    let flags = PartialConfig {
        refresh: Some(5),
        ..Default::default()
    };

    let config = Config::validate(file.overlay(flags)).unwrap();
    assert_eq!(config.refresh, 5);
    // untouched fields keep the file value
    assert_eq!(config.min_severity, Severity::Average);
}

#[test]
fn test_mandatory_fields_enforced_after_merge() {
    let file = PartialConfig {
        server: Some("https://zabbix.example.com".to_string()),
        username: Some("monitor".to_string()),
        ..Default::default()
    };
    let flags = PartialConfig::default();

    let err = Config::validate(file.overlay(flags)).unwrap_err();
    assert!(err.to_string().contains("'password' is not set"));
}

#[test]
fn test_invalid_host_filter_fails_at_startup() {
    let partial = PartialConfig {
        grep: Some("(unbalanced".to_string()),
        ..minimal()
    };

    let err = Config::validate(partial).unwrap_err();
    assert!(err.to_string().contains("invalid grep pattern"));
}

#[test]
fn test_invalid_min_severity_fails_at_startup() {
    let partial = PartialConfig {
        min_severity: Some("catastrophic".to_string()),
        ..minimal()
    };

    assert!(Config::validate(partial).is_err());
}
