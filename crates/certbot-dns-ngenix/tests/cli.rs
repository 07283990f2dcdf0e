//! Command-line behaviour of the hook binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const ENV: [&str; 8] = [
    "NGENIX_CUSTOMER_ID",
    "NGENIX_NAME",
    "NGENIX_TOKEN",
    "NGENIX_API_URL",
    "CERTBOT_DOMAIN",
    "CERTBOT_VALIDATION",
    "CERTBOT_AUTH_OUTPUT",
    "CERTBOT_DNS_NGENIX_CONFIG",
];

/// Binary with a clean environment and an empty config file
fn hook(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("certbot-dns-ngenix").unwrap();
    for var in ENV {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config.path());
    cmd
}

#[test]
fn help_lists_both_hooks() {
    let config = NamedTempFile::new().unwrap();
    hook(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("perform"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("--dns-ngenix-customer-id"));
}

#[test]
fn perform_without_credentials_fails_before_any_request() {
    let config = NamedTempFile::new().unwrap();
    hook(&config)
        .args(["perform", "--domain", "example.com", "--validation", "abc123"])
        // Unroutable: a request would hang or fail differently
        .args(["--dns-ngenix-api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("NGENIX credentials are required"));
}

#[test]
fn perform_reads_the_challenge_from_certbot_env() {
    let config = NamedTempFile::new().unwrap();
    // Domain and validation come from the environment, so the run gets as
    // far as the credential check
    hook(&config)
        .arg("perform")
        .env("CERTBOT_DOMAIN", "example.com")
        .env("CERTBOT_VALIDATION", "abc123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NGENIX credentials are required"))
        .stderr(predicate::str::contains("--domain").not());
}

#[test]
fn perform_without_a_domain_is_a_usage_error() {
    let config = NamedTempFile::new().unwrap();
    hook(&config)
        .arg("perform")
        .env("CERTBOT_VALIDATION", "abc123")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--domain"));
}

#[test]
fn cleanup_without_arguments_still_succeeds() {
    let config = NamedTempFile::new().unwrap();
    hook(&config)
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--domain"));
}

#[test]
fn cleanup_never_fails() {
    let config = NamedTempFile::new().unwrap();
    hook(&config)
        .arg("cleanup")
        .env("CERTBOT_DOMAIN", "example.com")
        .env("CERTBOT_VALIDATION", "abc123")
        .env("CERTBOT_AUTH_OUTPUT", "42/example.com/_acme-challenge/abc123")
        .assert()
        .success();
}

#[test]
fn broken_config_file_is_reported() {
    let config = NamedTempFile::new().unwrap();
    std::fs::write(config.path(), "propagation_timeout_secs = \"forever\"").unwrap();

    hook(&config)
        .args(["perform", "--domain", "example.com", "--validation", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
