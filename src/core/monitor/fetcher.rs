//! Per-cycle data acquisition.
//!
//! Fetches triggers and hosts from the API, normalizes both into [`Item`]s
//! and assembles the final ordered collection for one poll cycle.

use chrono::{Local, TimeZone};
use log::debug;
use regex::Regex;

use crate::core::config::Config;
use crate::core::monitor::items::{Availability, Item, Severity};
use crate::core::zabbix::{RawHost, RawTrigger, Session};
use crate::error::{Result, ZbxmonError};

/// Host availability items carry no discrete event time.
const HOST_TIME_PLACEHOLDER: &str = "-";

/// Query triggers with unresolved problems and map them into items,
/// partitioned into (unacknowledged, acknowledged).
pub fn fetch_triggers(session: &Session, min_severity: Severity) -> Result<(Vec<Item>, Vec<Item>)> {
    let triggers = session.trigger_get(min_severity.code())?;
    debug!("type=triggers_raw scope=all triggers={:?}", triggers);

    partition_triggers(session.server_url(), triggers, min_severity)
}

/// Query hosts in a bad availability state and map them into items,
/// partitioned into (unavailable, unknown).
pub fn fetch_hosts(session: &Session) -> Result<(Vec<Item>, Vec<Item>)> {
    let hosts = session.host_get(&[
        Availability::Unknown.code(),
        Availability::Unavailable.code(),
    ])?;
    debug!("type=hosts_raw scope=all hosts={:?}", hosts);

    partition_hosts(session.server_url(), hosts)
}

/// Map raw triggers to items and split them by acknowledgement.
///
/// Drops triggers whose most recent event is no longer in problem state:
/// the API-level filter and the current event value can disagree by the
/// time results arrive. Also re-applies the severity floor client-side.
fn partition_triggers(
    server: &str,
    triggers: Vec<RawTrigger>,
    min_severity: Severity,
) -> Result<(Vec<Item>, Vec<Item>)> {
    let mut unack = Vec::new();
    let mut ack = Vec::new();

    for trigger in &triggers {
        let event = match trigger.last_event.as_ref() {
            Some(event) => event,
            None => continue,
        };
        if !parse_flag(&event.value, "event value")? {
            continue;
        }

        let severity = parse_severity(&trigger.priority)?;
        if severity < min_severity {
            continue;
        }

        let host = trigger
            .hosts
            .first()
            .ok_or_else(|| {
                ZbxmonError::api(format!("trigger {} has no host", trigger.trigger_id))
            })?
            .host
            .clone();
        let acknowledged = parse_flag(&event.acknowledged, "event acknowledged")?;

        let item = Item {
            host,
            status: severity.label().to_string(),
            description: trigger.description.clone(),
            time: format_event_time(&event.clock)?,
            ack: acknowledged,
            url: format!(
                "{}/tr_events.php?triggerid={}&eventid={}",
                server, trigger.trigger_id, event.event_id
            ),
        };

        if acknowledged {
            ack.push(item);
        } else {
            unack.push(item);
        }
    }

    debug!("type=triggers scope=unack items={:?}", unack);
    debug!("type=triggers scope=ack items={:?}", ack);

    Ok((unack, ack))
}

/// Map raw hosts to items and split them by availability state.
fn partition_hosts(server: &str, hosts: Vec<RawHost>) -> Result<(Vec<Item>, Vec<Item>)> {
    let mut unavailable = Vec::new();
    let mut unknown = Vec::new();

    for host in &hosts {
        let code = host.available.parse::<u8>().map_err(|_| {
            ZbxmonError::api(format!(
                "host {} has non-numeric availability '{}'",
                host.host_id, host.available
            ))
        })?;
        let availability = Availability::from_code(code)?;

        let item = Item {
            host: host.host.clone(),
            status: availability.label().to_string(),
            description: format!("Host in {} state", availability.label()),
            time: HOST_TIME_PLACEHOLDER.to_string(),
            ack: false,
            url: format!("{}/hostinventories.php?hostid={}", server, host.host_id),
        };

        match availability {
            Availability::Unavailable => unavailable.push(item),
            Availability::Unknown => unknown.push(item),
            Availability::Available => {}
        }
    }

    debug!("type=hosts scope=unavailable items={:?}", unavailable);
    debug!("type=hosts scope=unknown items={:?}", unknown);

    Ok((unavailable, unknown))
}

/// Concatenate the enabled categories in fixed order and apply the
/// host-name filter.
///
/// Category order is always unack, ack, down, unknown; the order within
/// each category is the API's own sort.
pub fn assemble(
    unack: Vec<Item>,
    ack: Vec<Item>,
    down: Vec<Item>,
    unknown: Vec<Item>,
    item_types: &[String],
    grep: Option<&Regex>,
) -> Vec<Item> {
    let mut items = Vec::new();

    if item_types.iter().any(|t| t == "unack") {
        items.extend(unack);
    }
    if item_types.iter().any(|t| t == "ack") {
        items.extend(ack);
    }
    if item_types.iter().any(|t| t == "down") {
        items.extend(down);
    }
    if item_types.iter().any(|t| t == "unknown") {
        items.extend(unknown);
    }

    if let Some(pattern) = grep {
        items.retain(|item| pattern.is_match(&item.host));
    }

    items
}

/// Run one full acquisition cycle: triggers, hosts, assemble.
pub fn fetch_items(session: &Session, config: &Config) -> Result<Vec<Item>> {
    let (unack, ack) = fetch_triggers(session, config.min_severity)?;
    let (down, unknown) = fetch_hosts(session)?;

    let items = assemble(
        unack,
        ack,
        down,
        unknown,
        &config.item_types,
        config.grep.as_ref(),
    );
    debug!("type=items scope=cycle count={}", items.len());

    Ok(items)
}

/// Parse a Zabbix "0"/"1" string flag.
fn parse_flag(raw: &str, what: &str) -> Result<bool> {
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(ZbxmonError::api(format!(
            "unexpected {} '{}'",
            what, other
        ))),
    }
}

fn parse_severity(raw: &str) -> Result<Severity> {
    let code = raw
        .parse::<u8>()
        .map_err(|_| ZbxmonError::api(format!("non-numeric trigger priority '{}'", raw)))?;
    Severity::from_code(code)
}

/// Format a unix timestamp string as `YYYY-MM-DD HH:MM` local time.
fn format_event_time(clock: &str) -> Result<String> {
    let secs = clock
        .parse::<i64>()
        .map_err(|_| ZbxmonError::api(format!("non-numeric event clock '{}'", clock)))?;
    let timestamp = Local
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ZbxmonError::api(format!("event clock '{}' out of range", clock)))?;

    Ok(timestamp.format("%Y-%m-%d %H:%M").to_string())
}
