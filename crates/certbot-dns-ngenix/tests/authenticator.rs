//! End-to-end tests of the perform/cleanup lifecycle
//!
//! The NGENIX API is a wiremock server; DNS answers come from a scripted lookup.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use certbot_dns_ngenix::backup::ZoneBackup;
use certbot_dns_ngenix::{Authenticator, CleanupOutcome};
use ngenix_client::NgenixClient;
use ngenix_core::{Credentials, NgenixError, RecordId, Result};
use ngenix_propagation::{PropagationChecker, PropagationConfig, TxtLookup};

/// Serves the challenge value from the `visible_from`-th lookup on
struct ScriptedLookup {
    value: &'static str,
    visible_from: Option<u32>,
    calls: AtomicU32,
}

impl ScriptedLookup {
    fn new(value: &'static str, visible_from: Option<u32>) -> Arc<Self> {
        Arc::new(Self {
            value,
            visible_from,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TxtLookup for ScriptedLookup {
    async fn lookup_txt(&self, _name: &str) -> Result<Vec<String>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.visible_from {
            Some(n) if call >= n => Ok(vec![self.value.to_string()]),
            _ => Err(NgenixError::Dns("no records found".into())),
        }
    }
}

fn authenticator(
    server: &MockServer,
    lookup: Arc<ScriptedLookup>,
    backup_dir: &std::path::Path,
) -> Authenticator {
    let credentials = Credentials::new("12345", "ngenix_name", "ngenix_token123").unwrap();
    let client = NgenixClient::builder(credentials)
        .base_url(server.uri())
        .build()
        .unwrap();

    let config = PropagationConfig {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(30),
        nameservers: Vec::new(),
    };
    let checker = PropagationChecker::with_lookup(config, lookup).unwrap();

    Authenticator::new(client, checker, Some(ZoneBackup::new(backup_dir)))
}

fn challenge() -> serde_json::Value {
    json!({"name": "_acme-challenge", "type": "TXT", "data": "abc123"})
}

fn www() -> serde_json::Value {
    json!({"name": "www", "type": "CNAME", "data": "cdn.ngenix.net."})
}

/// Zone 42 (`example.com`) starts without the challenge record and holds it
/// after the first read.
async fn mount_zone(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/dns-zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [{"id": 42, "name": "example.com"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dns-zone/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": [www()]})))
        .up_to_n_times(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dns-zone/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"records": [www(), challenge()]})),
        )
        .mount(server)
        .await;
}

async fn mount_add(server: &MockServer) {
    let body = json!({"records": [www(), challenge()]});
    Mock::given(method("PATCH"))
        .and(path("/dns-zone/42"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_delete(server: &MockServer, status: u16) {
    let body = json!({"records": [www()]});
    Mock::given(method("PATCH"))
        .and(path("/dns-zone/42"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(status).set_body_json(&body))
        .expect(1)
        .mount(server)
        .await;
}

fn backup_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn record_resolves_on_second_poll_and_is_cleaned_up() {
    let server = MockServer::start().await;
    mount_zone(&server).await;
    mount_add(&server).await;
    mount_delete(&server, 200).await;

    let backups = tempfile::tempdir().unwrap();
    let lookup = ScriptedLookup::new("abc123", Some(2));
    let auth = authenticator(&server, lookup.clone(), backups.path());

    let record = auth.perform("example.com", "abc123").await.unwrap();
    assert_eq!(record.id.to_string(), "42/example.com/_acme-challenge/abc123");
    assert_eq!(record.fqdn, "_acme-challenge.example.com");
    assert_eq!(lookup.calls(), 2);

    let handle: RecordId = record.id.to_string().parse().unwrap();
    let outcome = auth.cleanup("example.com", "abc123", Some(&handle)).await;
    assert!(matches!(outcome, CleanupOutcome::Deleted(ref id) if *id == handle));

    let files = backup_files(backups.path());
    assert_eq!(files.len(), 2, "{files:?}");
    assert!(files.iter().any(|f| f.ends_with(".before.json")));
    assert!(files.iter().any(|f| f.ends_with(".after.json")));
}

#[tokio::test]
async fn propagation_timeout_still_allows_cleanup() {
    let server = MockServer::start().await;
    mount_zone(&server).await;
    mount_add(&server).await;
    mount_delete(&server, 200).await;

    let backups = tempfile::tempdir().unwrap();
    let lookup = ScriptedLookup::new("abc123", None);
    let auth = authenticator(&server, lookup.clone(), backups.path());

    let err = auth.perform("example.com", "abc123").await.unwrap_err();
    assert!(matches!(err, NgenixError::PropagationTimeout { .. }), "{err}");
    // At least the immediate check and the one at the deadline
    assert!(lookup.calls() >= 2);

    // No handle from the failed auth hook: the zone is looked up again
    let outcome = auth.cleanup("example.com", "abc123", None).await;
    assert!(matches!(outcome, CleanupOutcome::Deleted(_)), "{outcome:?}");
}

#[tokio::test]
async fn api_rejection_aborts_before_polling() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns-zone"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let backups = tempfile::tempdir().unwrap();
    let lookup = ScriptedLookup::new("abc123", Some(1));
    let auth = authenticator(&server, lookup.clone(), backups.path());

    let err = auth.perform("example.com", "abc123").await.unwrap_err();
    assert!(matches!(err, NgenixError::Unauthorized));
    assert_eq!(lookup.calls(), 0);
    assert!(backup_files(backups.path()).is_empty());
}

#[tokio::test]
async fn failed_update_still_leaves_a_before_backup() {
    let server = MockServer::start().await;
    mount_zone(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/dns-zone/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let backups = tempfile::tempdir().unwrap();
    let lookup = ScriptedLookup::new("abc123", Some(1));
    let auth = authenticator(&server, lookup.clone(), backups.path());

    let err = auth.perform("example.com", "abc123").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(lookup.calls(), 0);

    let files = backup_files(backups.path());
    assert_eq!(files.len(), 1, "{files:?}");
    assert!(files[0].starts_with("example.com."));
    assert!(files[0].ends_with(".before.json"));

    let contents = std::fs::read_to_string(backups.path().join(&files[0])).unwrap();
    let (zone_id, records) = contents.split_once('\n').unwrap();
    assert_eq!(zone_id, "42");
    assert_eq!(serde_json::from_str::<serde_json::Value>(records).unwrap(), json!([www()]));
}

#[tokio::test]
async fn delete_failure_does_not_escape_cleanup() {
    let server = MockServer::start().await;
    mount_zone(&server).await;
    mount_delete(&server, 500).await;

    let backups = tempfile::tempdir().unwrap();
    let auth = authenticator(&server, ScriptedLookup::new("abc123", Some(1)), backups.path());

    // Skip the first (empty) zone read so the record is present
    let handle: RecordId = "42/example.com/_acme-challenge/abc123".parse().unwrap();
    let _ = auth.cleanup("example.com", "abc123", Some(&handle)).await;
    let outcome = auth.cleanup("example.com", "abc123", Some(&handle)).await;

    assert!(!outcome.is_clean());
    assert!(matches!(outcome, CleanupOutcome::Failed(ref e) if e.status_code() == Some(500)));
}

#[tokio::test]
async fn unknown_zone_does_not_escape_cleanup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns-zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": []})))
        .mount(&server)
        .await;

    let backups = tempfile::tempdir().unwrap();
    let auth = authenticator(&server, ScriptedLookup::new("abc123", Some(1)), backups.path());

    let outcome = auth.cleanup("example.com", "abc123", None).await;
    assert!(matches!(outcome, CleanupOutcome::Failed(NgenixError::ZoneNotFound { .. })));
}
