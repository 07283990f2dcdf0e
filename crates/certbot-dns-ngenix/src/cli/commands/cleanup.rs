//! `certbot-dns-ngenix cleanup` - the cleanup hook.
//!
//! Always exits successfully; problems are logged for the operator.

use anyhow::Result;
use ngenix_core::RecordId;
use tracing::{error, info, warn};

use crate::authenticator::{CleanupOutcome, NAME};
use crate::cli::args::{ChallengeArgs, CleanupArgs};
use crate::config::Settings;

pub async fn execute(settings: Settings, args: CleanupArgs) -> Result<()> {
    let ChallengeArgs { domain, validation } = args.challenge;
    info!(authenticator = NAME, domain = %domain, "cleanup");

    let record = parse_record_id(args.record_id.as_deref());

    let authenticator = match super::authenticator(settings) {
        Ok(authenticator) => authenticator,
        Err(e) => {
            error!("{e:#}");
            return Ok(());
        }
    };

    match authenticator
        .cleanup(&domain, &validation, record.as_ref())
        .await
    {
        CleanupOutcome::Deleted(id) | CleanupOutcome::AlreadyAbsent(id) => {
            info!(domain = %domain, record = %id, "cleanup finished");
        }
        CleanupOutcome::Failed(_) => {}
    }

    Ok(())
}

/// Handle from `CERTBOT_AUTH_OUTPUT`; anything unusable means "look it up again".
fn parse_record_id(raw: Option<&str>) -> Option<RecordId> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    // Hook output may carry more than one line; the handle is the last one
    let line = raw.lines().last().unwrap_or(raw);

    match line.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, "ignoring record handle from auth hook");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_auth_hook_output() {
        let id = parse_record_id(Some("42/example.com/_acme-challenge/abc123\n")).unwrap();
        assert_eq!(id.zone_id, "42");
        assert_eq!(id.value, "abc123");
    }

    #[test]
    fn takes_last_line() {
        let id = parse_record_id(Some("noise\n42/example.com/_acme-challenge/abc123")).unwrap();
        assert_eq!(id.name, "_acme-challenge");
    }

    #[test]
    fn empty_or_garbage_falls_back() {
        assert!(parse_record_id(None).is_none());
        assert!(parse_record_id(Some("   ")).is_none());
        assert!(parse_record_id(Some("not-a-handle")).is_none());
    }
}
