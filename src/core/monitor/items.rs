//! Normalized problem items.
//!
//! Both trigger problems and host availability problems are flattened into
//! [`Item`] before display, diffing and JSON output.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZbxmonError};

/// A single row of the dashboard: one trigger problem or one host in a bad
/// availability state.
///
/// Equality is full-value equality across all fields; the change detector
/// relies on this to decide which items are new between two polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub host: String,
    pub status: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub time: String,
    pub ack: bool,
    pub url: String,
}

/// Trigger severity classes, ordered least to most severe.
///
/// Discriminants match the numeric codes of the Zabbix API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Unknown = 0,
    Information = 1,
    Warning = 2,
    Average = 3,
    High = 4,
    Critical = 5,
}

impl Severity {
    pub const NAMES: [&'static str; 6] = [
        "unknown",
        "information",
        "warning",
        "average",
        "high",
        "critical",
    ];

    /// Map a raw API severity code, failing loudly on an unmapped value.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Severity::Unknown),
            1 => Ok(Severity::Information),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Average),
            4 => Ok(Severity::High),
            5 => Ok(Severity::Critical),
            other => Err(ZbxmonError::UnknownSeverity(other)),
        }
    }

    /// Parse a lower-case severity name as used in the configuration.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "unknown" => Ok(Severity::Unknown),
            "information" => Ok(Severity::Information),
            "warning" => Ok(Severity::Warning),
            "average" => Ok(Severity::Average),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(ZbxmonError::config(format!(
                "unknown severity '{}', not in {:?}",
                other,
                Severity::NAMES
            ))),
        }
    }

    /// Numeric code as sent to the API (`min_severity` filter).
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Upper-cased status label as shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Information => "INFORMATION",
            Severity::Warning => "WARNING",
            Severity::Average => "AVERAGE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// Host availability states as reported by the Zabbix poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unknown = 0,
    Available = 1,
    Unavailable = 2,
}

impl Availability {
    /// Map a raw API availability code, failing loudly on an unmapped value.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Availability::Unknown),
            1 => Ok(Availability::Available),
            2 => Ok(Availability::Unavailable),
            other => Err(ZbxmonError::UnknownAvailability(other)),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Upper-cased status label as shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Unknown => "UNKNOWN",
            Availability::Available => "AVAILABLE",
            Availability::Unavailable => "UNAVAILABLE",
        }
    }
}
