//! Minimal blocking client for the Zabbix JSON-RPC API.
//!
//! Covers exactly the two read operations the dashboard needs:
//! `trigger.get` and `host.get`, plus the `user.login` handshake.

use std::cell::Cell;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, ZbxmonError};

const API_PATH: &str = "/api_jsonrpc.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated handle to a Zabbix server.
///
/// Owns the HTTP client, the base server URL and the auth token obtained
/// from `user.login`. All queries are synchronous.
pub struct Session {
    client: Client,
    server: String,
    endpoint: String,
    token: String,
    request_id: Cell<u64>,
}

/// Error object of a JSON-RPC response.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Trigger record as returned by `trigger.get`.
///
/// Zabbix serializes numeric fields as JSON strings; they are kept as
/// strings here and parsed during item mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrigger {
    #[serde(rename = "triggerid")]
    pub trigger_id: String,
    pub description: String,
    pub priority: String,
    #[serde(default)]
    pub hosts: Vec<RawHostRef>,
    #[serde(rename = "lastEvent")]
    pub last_event: Option<RawEvent>,
}

/// Host reference embedded in a trigger via `selectHosts`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHostRef {
    pub host: String,
}

/// Event record embedded in a trigger via `selectLastEvent`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "eventid")]
    pub event_id: String,
    pub acknowledged: String,
    pub clock: String,
    pub value: String,
}

/// Host record as returned by `host.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHost {
    #[serde(rename = "hostid")]
    pub host_id: String,
    pub host: String,
    pub available: String,
}

impl Session {
    /// Authenticate against the Zabbix server and return a live session.
    ///
    /// `server` is the base web UI URL (no API path); `insecure` disables
    /// TLS certificate verification.
    pub fn connect(server: &str, username: &str, password: &str, insecure: bool) -> Result<Self> {
        let server = server.trim_end_matches('/').to_string();
        let endpoint = format!("{}{}", server, API_PATH);

        let client = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut session = Session {
            client,
            server,
            endpoint,
            token: String::new(),
            request_id: Cell::new(0),
        };

        let result = session.rpc(
            "user.login",
            json!({
                "username": username,
                "password": password,
            }),
            false,
        )?;

        match result.as_str() {
            Some(token) => {
                session.token = token.to_string();
                Ok(session)
            }
            None => Err(ZbxmonError::auth(
                "user.login did not return an auth token",
            )),
        }
    }

    /// Base server URL, used to build deep links into the web UI.
    pub fn server_url(&self) -> &str {
        &self.server
    }

    /// Query active, monitored triggers in problem state at or above
    /// `min_severity`, sorted by priority then last change, descending.
    pub fn trigger_get(&self, min_severity: u8) -> Result<Vec<RawTrigger>> {
        let result = self.rpc(
            "trigger.get",
            json!({
                "output": ["triggerid", "description", "priority", "value"],
                "filter": { "value": 1 },
                "sortfield": ["priority", "lastchange"],
                "sortorder": "DESC",
                "active": true,
                "monitored": true,
                "selectHosts": ["host"],
                "selectLastEvent": "extend",
                "expandDescription": true,
                "min_severity": min_severity,
            }),
            true,
        )?;

        Ok(serde_json::from_value(result)?)
    }

    /// Query hosts whose availability matches one of the given codes.
    pub fn host_get(&self, availability_in: &[u8]) -> Result<Vec<RawHost>> {
        let result = self.rpc(
            "host.get",
            json!({
                "output": ["hostid", "host", "available"],
                "filter": { "available": availability_in },
            }),
            true,
        )?;

        Ok(serde_json::from_value(result)?)
    }

    /// Issue one JSON-RPC call and unwrap its result.
    fn rpc(&self, method: &str, params: Value, authenticated: bool) -> Result<Value> {
        let id = self.request_id.get() + 1;
        self.request_id.set(id);

        let mut body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });
        if authenticated {
            body["auth"] = Value::String(self.token.clone());
        }

        debug!("type=rpc_request method={} id={}", method, id);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json-rpc")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZbxmonError::api(format!(
                "{} returned HTTP {} for {}",
                self.endpoint, status, method
            )));
        }

        let parsed: RpcResponse = response.json()?;

        if let Some(err) = parsed.error {
            let detail = err.data.unwrap_or_default();
            if method == "user.login" {
                return Err(ZbxmonError::auth(format!(
                    "{} (code {}) {}",
                    err.message, err.code, detail
                )));
            }
            return Err(ZbxmonError::api(format!(
                "{} failed: {} (code {}) {}",
                method, err.message, err.code, detail
            )));
        }

        parsed
            .result
            .ok_or_else(|| ZbxmonError::api(format!("{} returned no result", method)))
    }
}
