//! Integration tests for asnroutes CLI functionality

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Answer `connections` whois queries with `response`; returns the port
fn fake_whois(response: &'static str, connections: usize) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().take(connections) {
            let Ok(mut stream) = stream else { continue };
            let mut query = String::new();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let _ = reader.read_line(&mut query);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    port
}

const ROUTES: &str = "\
route:          10.0.0.0/8\r
origin:         AS64496\r
route:          10.1.0.0/16\r
route:          192.168.1.0/24\r
route6:         2001:db8:1::/48\r
route6:         2001:db8::/32\r
";

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("asnroutes").expect("Failed to find asnroutes binary");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("aggregate overlapping subnets"))
        .stdout(predicate::str::contains("--as"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--skip-invalid"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("asnroutes").expect("Failed to find asnroutes binary");
    cmd.arg("--version");

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("asnroutes "));
    if cfg!(debug_assertions) {
        assert!(stdout.contains("-UNRELEASED"));
    }
}

#[test]
fn test_missing_asn_prints_usage() {
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_asn_rejected() {
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--as", "15169,notanumber"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid AS number"));
}

#[test]
fn test_text_output_is_aggregated() {
    let port = fake_whois(ROUTES, 1);
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--as", "AS64496", "--server", "127.0.0.1", "--port"])
        .arg(port.to_string());

    cmd.assert()
        .success()
        .stdout("10.0.0.0/8\n192.168.1.0/24\n2001:db8::/32\n");
}

#[test]
fn test_json_output_format() {
    let port = fake_whois(ROUTES, 1);
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--json", "--as", "64496", "--server", "127.0.0.1", "--port"])
        .arg(port.to_string());

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(json["asns"], serde_json::json!(["AS64496"]));
    assert_eq!(
        json["ipv4"],
        serde_json::json!(["10.0.0.0/8", "192.168.1.0/24"])
    );
    assert_eq!(json["ipv6"], serde_json::json!(["2001:db8::/32"]));
    assert!(json["version"].is_string());
}

#[test]
fn test_invalid_route_line_fails() {
    let port = fake_whois("route:          10.0.0.0/40\r\n", 1);
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--as", "64496", "--server", "127.0.0.1", "--port"])
        .arg(port.to_string());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected IP range format"));
}

#[test]
fn test_skip_invalid_route_line() {
    let port = fake_whois("route: 10.0.0.0/40\r\nroute: 192.0.2.0/24\r\n", 1);
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--skip-invalid", "--as", "64496", "--server", "127.0.0.1", "--port"])
        .arg(port.to_string());

    cmd.assert().success().stdout("192.0.2.0/24\n");
}

#[test]
fn test_unreachable_server_fails() {
    // Bind and release a port so nothing is listening on it
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut cmd = Command::cargo_bin("asnroutes").unwrap();
    cmd.args(["--as", "64496", "--server", "127.0.0.1", "--timeout-ms", "2000", "--port"])
        .arg(port.to_string());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
