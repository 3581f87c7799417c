//! asnroutes - list the routes announced by AS numbers, minus overlapping subnets.
//!
//! This is the command-line interface for the asnroutes library. The main
//! use is generating ACL or firewall rules for a network operator.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use asnroutes::config::DEFAULT_QUERY_TIMEOUT_MS;
use asnroutes::{Asn, InvalidRoutePolicy, RegistryConfig, RouteLookup, RouteTable};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Get the version string for asnroutes
fn get_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(env!("CARGO_PKG_VERSION"), "-UNRELEASED")
    } else {
        env!("CARGO_PKG_VERSION")
    }
}

/// Command-line arguments for the route lookup tool.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Fetch routes announced by AS numbers and aggregate overlapping subnets", long_about = None)]
struct Args {
    /// List of AS numbers (comma separated), e.g. 15169,AS13335
    #[clap(short = 'a', long = "as", value_name = "ASN", value_delimiter = ',', required = true)]
    asns: Vec<Asn>,

    /// Whois server to query (default: whois.radb.net or $ASNROUTES_WHOIS_SERVER)
    #[clap(long)]
    server: Option<String>,

    /// Whois server port
    #[clap(short, long, default_value_t = 43)]
    port: u16,

    /// Timeout for each whois query in milliseconds
    #[clap(long, default_value_t = DEFAULT_QUERY_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Skip route lines that are not valid CIDR instead of failing
    #[clap(long)]
    skip_invalid: bool,

    /// Output results in JSON format
    #[clap(long)]
    json: bool,

    /// Enable verbose logging on stderr (use -vv for trace output)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// JSON output structure for the aggregated routes
#[derive(Debug, serde::Serialize)]
struct JsonOutput {
    version: String,
    asns: Vec<String>,
    ipv4: Vec<String>,
    ipv6: Vec<String>,
}

fn main() {
    // Quick check for version before clap enforces required arguments
    let raw: Vec<String> = std::env::args().collect();
    if raw.len() == 2 && (raw[1] == "--version" || raw[1] == "-V") {
        println!("asnroutes {}", get_version());
        return;
    }

    let args = Args::parse();
    init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    if let Err(e) = runtime.block_on(async_main(args)) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn async_main(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    tracing::debug!(server = %config.address(), asns = args.asns.len(), "starting lookup");

    let policy = if args.skip_invalid {
        InvalidRoutePolicy::Skip
    } else {
        InvalidRoutePolicy::Abort
    };
    let lookup = RouteLookup::new(config).invalid_route_policy(policy);

    let table = asnroutes::resolve(&lookup, &args.asns)
        .await
        .context("route lookup failed")?;

    if args.json {
        display_json_results(&args.asns, &table)?;
    } else {
        print!("{}", table.render_text());
    }
    Ok(())
}

/// Install the stderr tracing subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "asnroutes=warn",
        1 => "asnroutes=debug",
        _ => "asnroutes=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Map command-line options onto a registry configuration
fn build_config(args: &Args) -> Result<RegistryConfig> {
    let mut builder = RegistryConfig::builder()
        .port(args.port)
        .timeout(Duration::from_millis(args.timeout_ms));
    if let Some(server) = &args.server {
        builder = builder.server(server.as_str());
    }
    Ok(builder.build()?)
}

/// Build the JSON document for a route table
fn json_output(asns: &[Asn], table: &RouteTable) -> JsonOutput {
    JsonOutput {
        version: get_version().to_string(),
        asns: asns.iter().map(ToString::to_string).collect(),
        ipv4: table.ipv4.iter().map(ToString::to_string).collect(),
        ipv6: table.ipv6.iter().map(ToString::to_string).collect(),
    }
}

/// Display results in JSON format
fn display_json_results(asns: &[Asn], table: &RouteTable) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&json_output(asns, table))?);
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
