//! The DNS-01 authenticator: Certbot's `perform` and `cleanup` steps.

use ngenix_client::NgenixClient;
use ngenix_core::{challenge_record_name, ChallengeRecord, NgenixError, RecordId, Result};
use ngenix_propagation::PropagationChecker;
use tracing::{info, warn};

use crate::backup::{BackupTag, ZoneBackup};

/// Name the authenticator is known by
pub const NAME: &str = "dns-ngenix";

/// Result of a cleanup run. Cleanup never fails; problems end up here.
#[derive(Debug)]
pub enum CleanupOutcome {
    /// The challenge record was removed
    Deleted(RecordId),
    /// The zone did not hold the record any more
    AlreadyAbsent(RecordId),
    /// The record could not be removed
    Failed(NgenixError),
}

impl CleanupOutcome {
    /// Returns true unless the deletion failed
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Creates, waits for and removes challenge records
#[derive(Debug)]
pub struct Authenticator {
    client: NgenixClient,
    checker: PropagationChecker,
    backup: Option<ZoneBackup>,
}

impl Authenticator {
    /// Create an authenticator. Pass `None` to skip zone backups.
    #[must_use]
    pub fn new(
        client: NgenixClient,
        checker: PropagationChecker,
        backup: Option<ZoneBackup>,
    ) -> Self {
        Self {
            client,
            checker,
            backup,
        }
    }

    /// Publish `validation` for `domain` and wait until public DNS serves it.
    ///
    /// API errors and propagation timeouts are returned; both abort the
    /// challenge for this domain.
    pub async fn perform(&self, domain: &str, validation: &str) -> Result<ChallengeRecord> {
        let records = self.client.records();
        let pending = records.prepare_create(domain, validation).await?;

        // Snapshot before the update goes out so a failed update leaves a copy
        if let Some(backup) = &self.backup {
            backup
                .write_logged(&pending.record, &pending.before, BackupTag::Before)
                .await;
        }

        let change = records.apply(pending).await?;

        self.checker.wait_for_propagation(domain, validation).await?;

        Ok(ChallengeRecord {
            domain: domain.to_string(),
            fqdn: challenge_record_name(domain),
            id: change.record,
        })
    }

    /// Remove the challenge record for `domain`.
    ///
    /// Uses `record` when `perform` handed one over, otherwise looks the zone
    /// up again. Errors are logged and reported in the outcome, never
    /// returned: the certificate may already be issued at this point.
    pub async fn cleanup(
        &self,
        domain: &str,
        validation: &str,
        record: Option<&RecordId>,
    ) -> CleanupOutcome {
        let record = match record {
            Some(record) => record.clone(),
            None => match self.client.records().locate(domain, validation).await {
                Ok(record) => record,
                Err(e) => return Self::failed(domain, e),
            },
        };

        match self.client.records().delete_record(&record).await {
            Ok(change) => {
                if let Some(backup) = &self.backup {
                    backup
                        .write_logged(&change.record, &change.after, BackupTag::After)
                        .await;
                }
                if change.changed {
                    info!(domain, record = %record, "challenge record removed");
                    CleanupOutcome::Deleted(change.record)
                } else {
                    CleanupOutcome::AlreadyAbsent(change.record)
                }
            }
            Err(e) => Self::failed(domain, e),
        }
    }

    fn failed(domain: &str, err: NgenixError) -> CleanupOutcome {
        warn!(domain, error = %err, "failed to remove challenge record, remove it manually");
        CleanupOutcome::Failed(err)
    }
}
