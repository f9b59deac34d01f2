use std::io::{self, IsTerminal};
use std::process;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use colored::*;
use log::debug;

use zbxmon::core::config::{Config, PartialConfig};
use zbxmon::core::monitor::fetcher::fetch_items;
use zbxmon::core::zabbix::Session;
use zbxmon::ui::dashboard::run_dashboard_app;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let config = Config::resolve(cli_overrides(&matches))?;
    zbxmon::init_logging(config.log_level);
    debug!("type=settings settings={:?}", config);

    let session = Session::connect(
        &config.server,
        &config.username,
        &config.password,
        config.insecure,
    )
    .context("cannot authenticate")?;

    // interactive capability is decided once; piped output gets a single
    // fetch cycle serialized as JSON
    if io::stdout().is_terminal() {
        run_dashboard_app(&session, &config)
    } else {
        dump_json(&session, &config)
    }
}

fn build_cli() -> Command {
    Command::new("zbxmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Zabbix Status Monitoring")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .value_name("URL")
                .help("zabbix server url"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("NAME")
                .help("zabbix username"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .help("zabbix password"),
        )
        .arg(
            Arg::new("refresh")
                .short('r')
                .long("refresh")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("data refreshing interval"),
        )
        .arg(
            Arg::new("notify")
                .short('n')
                .long("notify")
                .action(ArgAction::SetTrue)
                .help("enable desktop notifications"),
        )
        .arg(
            Arg::new("min-severity")
                .short('m')
                .long("min-severity")
                .value_name("SEVERITY")
                .help("minimum trigger severity"),
        )
        .arg(
            Arg::new("item-types")
                .short('i')
                .long("item-types")
                .value_name("TYPES")
                .value_delimiter(',')
                .help("items state types (unack, ack, down, unknown)"),
        )
        .arg(
            Arg::new("insecure")
                .short('k')
                .long("insecure")
                .action(ArgAction::SetTrue)
                .help("skip TLS certificate verification"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("logging level"),
        )
        .arg(
            Arg::new("grep")
                .short('g')
                .long("grep")
                .value_name("PATTERN")
                .help("regexp to filter items on hostname"),
        )
}

/// Turn present CLI flags into a partial config; absent flags stay unset so
/// they never mask file or environment values.
fn cli_overrides(matches: &clap::ArgMatches) -> PartialConfig {
    PartialConfig {
        server: matches.get_one::<String>("server").cloned(),
        username: matches.get_one::<String>("username").cloned(),
        password: matches.get_one::<String>("password").cloned(),
        insecure: matches.get_flag("insecure").then_some(true),
        item_types: matches
            .get_many::<String>("item-types")
            .map(|values| values.cloned().collect()),
        min_severity: matches.get_one::<String>("min-severity").cloned(),
        refresh: matches.get_one::<u64>("refresh").copied(),
        notify: matches.get_flag("notify").then_some(true),
        grep: matches.get_one::<String>("grep").cloned(),
        log_level: matches.get_one::<String>("log-level").cloned(),
    }
}

/// One fetch cycle serialized as a single-line JSON array.
fn dump_json(session: &Session, config: &Config) -> Result<()> {
    let items = fetch_items(session, config).context("cannot fetch items")?;
    let data = serde_json::to_string(&items).context("Failed to serialize items")?;
    println!("{}", data);
    Ok(())
}
