//! Integration tests for the `risport` CLI binary.
//!
//! Argument parsing, help output, shell completions, offline catalogs and
//! error handling, plus one end-to-end query against a mock node.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `risport` binary with env isolation.
///
/// Clears all `RISPORT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn risport_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("risport");
    cmd.env("HOME", "/tmp/risport-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/risport-cli-test-nonexistent")
        .env_remove("RISPORT_PROFILE")
        .env_remove("RISPORT_HOST")
        .env_remove("RISPORT_USERNAME")
        .env_remove("RISPORT_PASSWORD")
        .env_remove("RISPORT_OUTPUT")
        .env_remove("RISPORT_INSECURE")
        .env_remove("RISPORT_TIMEOUT")
        .env_remove("RISPORT_AFFINITY")
        .env_remove("RISPORT_RETRIES")
        .env_remove("RISPORT_RETRIES_DELAY");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = risport_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    risport_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("RisPort70")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("cti"))
            .and(predicate::str::contains("status-reasons")),
    );
}

#[test]
fn test_version_flag() {
    risport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("risport"));
}

#[test]
fn test_invalid_subcommand() {
    risport_cmd()
        .arg("phones")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_output_format() {
    let output = risport_cmd().args(["-o", "xml", "models"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("invalid value"));
}

#[test]
fn test_invalid_device_status() {
    let output = risport_cmd()
        .args(["devices", "--status", "sleeping"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    risport_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    risport_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("risport"));
}

#[test]
fn test_completions_fish() {
    risport_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Offline catalogs ────────────────────────────────────────────────

#[test]
fn test_models_filter_plain() {
    risport_cmd()
        .args(["-o", "plain", "models", "cisco 7960"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));
}

#[test]
fn test_models_table() {
    risport_cmd()
        .args(["models", "7960"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cisco 7960").and(predicate::str::contains("Code")));
}

#[test]
fn test_status_reasons_json() {
    let output = risport_cmd()
        .args(["-o", "json", "status-reasons"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries[0].get("code").is_some());
    assert!(entries[0].get("name").is_some());
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_devices_without_config() {
    let output = risport_cmd().arg("devices").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No node configured"), "unexpected output:\n{text}");
}

#[test]
fn test_unknown_profile() {
    let output = risport_cmd()
        .args(["--profile", "prod", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Profile 'prod' not found"));
}

#[test]
fn test_host_without_credentials() {
    let output = risport_cmd()
        .args(["--host", "127.0.0.1", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("No credentials"));
}

#[test]
fn test_config_show() {
    risport_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path() {
    risport_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── End-to-end query ────────────────────────────────────────────────

const DEVICE_REPLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <ns1:selectCmDeviceResponse xmlns:ns1="http://schemas.cisco.com/ast/soap">
      <ns1:selectCmDeviceReturn>
        <ns1:SelectCmDeviceResult>
          <ns1:TotalDevicesFound>1</ns1:TotalDevicesFound>
          <ns1:CmNodes>
            <ns1:item>
              <ns1:ReturnCode>Ok</ns1:ReturnCode>
              <ns1:Name>cucm-pub</ns1:Name>
              <ns1:CmDevices>
                <ns1:item>
                  <ns1:Name>SEP001122334455</ns1:Name>
                  <ns1:Model>684</ns1:Model>
                  <ns1:Status>Registered</ns1:Status>
                  <ns1:StatusReason>0</ns1:StatusReason>
                </ns1:item>
              </ns1:CmDevices>
            </ns1:item>
          </ns1:CmNodes>
        </ns1:SelectCmDeviceResult>
        <ns1:StateInfo/>
      </ns1:selectCmDeviceReturn>
    </ns1:selectCmDeviceResponse>
  </soapenv:Body>
</soapenv:Envelope>"#;

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_query_against_mock_node() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/realtimeservice2/services/RISService70"))
        .and(header(
            "SOAPAction",
            "http://schemas.cisco.com/ast/soap/action/#RisPort#SelectCmDevice",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "JSESSIONIDSSO=abc123; Path=/")
                .set_body_raw(DEVICE_REPLY, "text/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        risport_cmd()
            .args(["--host", &uri, "-u", "axl", "--password", "secret", "-o", "plain", "devices"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "failed:\n{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "SEP001122334455");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_json_carries_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "JSESSIONIDSSO=abc123; Path=/")
                .set_body_raw(DEVICE_REPLY, "text/xml"),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        risport_cmd()
            .args(["--host", &uri, "-u", "axl", "--password", "secret", "-o", "json"])
            .args(["devices", "--describe-reasons"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "failed:\n{}", combined_output(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["session_token"], "JSESSIONIDSSO=abc123");
    assert_eq!(parsed["items"][0]["Name"], "cucm-pub");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rate_control_fault_exit_code() {
    let fault = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>soapenv:Server.RateControl</faultcode>
      <faultstring>Exceeded allowed rate for Reatime information</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(fault, "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        risport_cmd()
            .args(["--host", &uri, "-u", "axl", "--password", "secret", "devices"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(9), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Rate limited"));
}
