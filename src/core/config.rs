//! Configuration resolution.
//!
//! Settings come from a TOML config file, `ZBXMON_*` environment variables
//! and CLI flags, in increasing precedence. The result is resolved once at
//! startup into an immutable [`Config`] that is passed by reference into
//! the fetcher and the dashboard.

use std::env;
use std::fs;
use std::path::PathBuf;

use log::debug;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::core::monitor::items::Severity;
use crate::error::{Result, ZbxmonError};

/// Item categories that can be enabled for display.
pub const ITEM_TYPES: [&str; 4] = ["unack", "ack", "down", "unknown"];

const DEFAULT_ITEM_TYPES: [&str; 4] = ["down", "unack", "ack", "unknown"];
const DEFAULT_MIN_SEVERITY: &str = "average";
const DEFAULT_REFRESH: u64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_PREFIX: &str = "ZBXMON_";

/// Partial settings as read from one source (file, env or flags).
///
/// `None` means "not set here"; later sources overlay earlier ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: Option<bool>,
    pub item_types: Option<Vec<String>>,
    pub min_severity: Option<String>,
    pub refresh: Option<u64>,
    pub notify: Option<bool>,
    pub grep: Option<String>,
    pub log_level: Option<String>,
}

impl PartialConfig {
    /// Overlay `other` on top of `self`; set fields of `other` win.
    pub fn overlay(mut self, other: PartialConfig) -> PartialConfig {
        if other.server.is_some() {
            self.server = other.server;
        }
        if other.username.is_some() {
            self.username = other.username;
        }
        if other.password.is_some() {
            self.password = other.password;
        }
        if other.insecure.is_some() {
            self.insecure = other.insecure;
        }
        if other.item_types.is_some() {
            self.item_types = other.item_types;
        }
        if other.min_severity.is_some() {
            self.min_severity = other.min_severity;
        }
        if other.refresh.is_some() {
            self.refresh = other.refresh;
        }
        if other.notify.is_some() {
            self.notify = other.notify;
        }
        if other.grep.is_some() {
            self.grep = other.grep;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self
    }
}

/// Fully resolved, validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub username: String,
    pub password: String,
    pub insecure: bool,
    pub item_types: Vec<String>,
    pub min_severity: Severity,
    pub refresh: u64,
    pub notify: bool,
    /// Host-name filter, compiled once at startup.
    pub grep: Option<Regex>,
    pub log_level: log::LevelFilter,
}

impl Config {
    /// Resolve the configuration: config file, then environment, then CLI
    /// flags, then validate the merged result.
    pub fn resolve(cli: PartialConfig) -> Result<Config> {
        let file = load_config_file()?.unwrap_or_default();
        let merged = file.overlay(env_overrides()?).overlay(cli);
        Config::validate(merged)
    }

    /// Validate a merged partial config and fill in defaults.
    pub fn validate(partial: PartialConfig) -> Result<Config> {
        let server = partial
            .server
            .ok_or_else(|| ZbxmonError::config("'server' is not set"))?;
        let username = partial
            .username
            .ok_or_else(|| ZbxmonError::config("'username' is not set"))?;
        let password = partial
            .password
            .ok_or_else(|| ZbxmonError::config("'password' is not set"))?;

        let parsed = Url::parse(&server)
            .map_err(|e| ZbxmonError::config(format!("invalid server url '{}': {}", server, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ZbxmonError::config(format!(
                "server url '{}' must be http or https",
                server
            )));
        }

        let item_types = partial
            .item_types
            .unwrap_or_else(|| DEFAULT_ITEM_TYPES.iter().map(|s| s.to_string()).collect());
        for item_type in &item_types {
            if !ITEM_TYPES.contains(&item_type.as_str()) {
                return Err(ZbxmonError::config(format!(
                    "unknown item type '{}', not in {:?}",
                    item_type, ITEM_TYPES
                )));
            }
        }

        let min_severity = Severity::from_name(
            partial
                .min_severity
                .as_deref()
                .unwrap_or(DEFAULT_MIN_SEVERITY),
        )?;

        let refresh = partial.refresh.unwrap_or(DEFAULT_REFRESH);
        if refresh == 0 {
            return Err(ZbxmonError::config("'refresh' must be at least 1 second"));
        }

        let grep = match partial.grep.as_deref() {
            None | Some("") => None,
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| {
                ZbxmonError::config(format!("invalid grep pattern '{}': {}", pattern, e))
            })?),
        };

        let log_level = parse_log_level(partial.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))?;

        Ok(Config {
            server: server.trim_end_matches('/').to_string(),
            username,
            password,
            insecure: partial.insecure.unwrap_or(false),
            item_types,
            min_severity,
            refresh,
            notify: partial.notify.unwrap_or(false),
            grep,
            log_level,
        })
    }
}

/// Parse a log level name, rejecting anything not in the known set.
fn parse_log_level(name: &str) -> Result<log::LevelFilter> {
    match name {
        "off" => Ok(log::LevelFilter::Off),
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        other => Err(ZbxmonError::config(format!(
            "unknown log level '{}', not in [\"off\", \"error\", \"warn\", \"info\", \"debug\", \"trace\"]",
            other
        ))),
    }
}

/// Candidate config file locations, first match wins.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("/etc/zbxmon/config.toml"));
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            paths.push(PathBuf::from(xdg).join("zbxmon").join("config.toml"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config").join("zbxmon").join("config.toml"));
        paths.push(home.join(".zbxmon").join("config.toml"));
    }
    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Read the first config file found on the search path.
///
/// A missing file is not an error; the mandatory-field check on the merged
/// result catches an unconfigured run. A file that fails to parse is fatal.
fn load_config_file() -> Result<Option<PartialConfig>> {
    for path in config_search_paths() {
        if !path.exists() {
            continue;
        }

        let parsed = read_config_file(&path)?;
        debug!("type=config file={}", path.display());
        return Ok(Some(parsed));
    }

    Ok(None)
}

/// Parse one TOML config file.
pub fn read_config_file(path: &std::path::Path) -> Result<PartialConfig> {
    let data = fs::read_to_string(path)?;
    toml::from_str(&data)
        .map_err(|e| ZbxmonError::config(format!("cannot parse {}: {}", path.display(), e)))
}

/// Collect `ZBXMON_*` environment variable overrides.
fn env_overrides() -> Result<PartialConfig> {
    let mut partial = PartialConfig {
        server: env::var(format!("{}SERVER", ENV_PREFIX)).ok(),
        username: env::var(format!("{}USERNAME", ENV_PREFIX)).ok(),
        password: env::var(format!("{}PASSWORD", ENV_PREFIX)).ok(),
        grep: env::var(format!("{}GREP", ENV_PREFIX)).ok(),
        min_severity: env::var(format!("{}MIN_SEVERITY", ENV_PREFIX)).ok(),
        log_level: env::var(format!("{}LOG_LEVEL", ENV_PREFIX)).ok(),
        ..Default::default()
    };

    if let Ok(raw) = env::var(format!("{}ITEM_TYPES", ENV_PREFIX)) {
        partial.item_types = Some(raw.split(',').map(|s| s.trim().to_string()).collect());
    }
    if let Ok(raw) = env::var(format!("{}REFRESH", ENV_PREFIX)) {
        let refresh = raw.parse::<u64>().map_err(|_| {
            ZbxmonError::config(format!("{}REFRESH is not a number: '{}'", ENV_PREFIX, raw))
        })?;
        partial.refresh = Some(refresh);
    }
    if let Ok(raw) = env::var(format!("{}NOTIFY", ENV_PREFIX)) {
        partial.notify = Some(parse_env_bool("NOTIFY", &raw)?);
    }
    if let Ok(raw) = env::var(format!("{}INSECURE", ENV_PREFIX)) {
        partial.insecure = Some(parse_env_bool("INSECURE", &raw)?);
    }

    Ok(partial)
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    match raw {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ZbxmonError::config(format!(
            "{}{} is not a boolean: '{}'",
            ENV_PREFIX, name, raw
        ))),
    }
}
