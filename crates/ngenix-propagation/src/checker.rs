//! Fixed-interval propagation polling with a hard deadline.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use ngenix_core::{challenge_record_name, NgenixError, Result};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::lookup::{DnsLookup, TxtLookup, DEFAULT_NAMESERVER};

/// Time between two checks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Longest time to wait for a record to become visible
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Longest accepted timeout
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for propagation checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationConfig {
    /// Interval between checks
    pub interval: Duration,
    /// Maximum time to wait for propagation
    pub timeout: Duration,
    /// Nameservers to query (empty = system resolver)
    pub nameservers: Vec<IpAddr>,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            nameservers: vec![DEFAULT_NAMESERVER],
        }
    }
}

impl PropagationConfig {
    /// Reject configurations the polling loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(NgenixError::Config(
                "propagation interval must be greater than zero".into(),
            ));
        }
        if self.timeout > MAX_TIMEOUT {
            return Err(NgenixError::Config(format!(
                "propagation timeout must not exceed {} seconds",
                MAX_TIMEOUT.as_secs()
            )));
        }
        Ok(())
    }
}

/// Successful propagation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    /// Fully qualified record name that was polled
    pub record: String,
    /// Number of lookups made, including the successful one
    pub attempts: u32,
    /// Time from the first lookup until the value was seen
    pub elapsed: Duration,
}

/// Waits for challenge records to become visible in public DNS
pub struct PropagationChecker {
    config: PropagationConfig,
    lookup: Arc<dyn TxtLookup>,
}

impl PropagationChecker {
    /// Create a checker that queries the configured nameservers
    pub fn new(config: PropagationConfig) -> Result<Self> {
        let lookup = DnsLookup::new(&config.nameservers)?;
        Self::with_lookup(config, Arc::new(lookup))
    }

    /// Create a checker backed by a custom TXT source
    pub fn with_lookup(config: PropagationConfig, lookup: Arc<dyn TxtLookup>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, lookup })
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Poll until `_acme-challenge.<domain>` serves `value`.
    ///
    /// The first lookup is made immediately, then one per interval. The last
    /// lookup happens when the timeout is reached; if the value is still
    /// missing, [`NgenixError::PropagationTimeout`] is returned. Lookup
    /// failures count as "not yet visible".
    pub async fn wait_for_propagation(&self, domain: &str, value: &str) -> Result<PropagationReport> {
        let record = challenge_record_name(domain);
        let start = Instant::now();
        let deadline = start.checked_add(self.config.timeout).ok_or_else(|| {
            NgenixError::Config("propagation timeout is out of range".into())
        })?;
        let mut attempts = 0u32;

        info!(
            record = %record,
            interval_secs = self.config.interval.as_secs(),
            timeout_secs = self.config.timeout.as_secs(),
            "waiting for DNS propagation"
        );

        loop {
            attempts += 1;

            if self.is_visible(&record, value).await {
                let elapsed = start.elapsed();
                info!(
                    record = %record,
                    attempts,
                    elapsed_secs = elapsed.as_secs(),
                    "DNS propagation confirmed"
                );
                return Ok(PropagationReport {
                    record,
                    attempts,
                    elapsed,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(NgenixError::PropagationTimeout {
                    record,
                    elapsed_secs: start.elapsed().as_secs(),
                });
            }

            let remaining = deadline - now;
            info!(
                record = %record,
                remaining_secs = remaining.as_secs(),
                "TXT record not visible yet"
            );
            tokio::time::sleep(self.config.interval.min(remaining)).await;
        }
    }

    /// Single check of `record` for `value`
    async fn is_visible(&self, record: &str, value: &str) -> bool {
        match self.lookup.lookup_txt(record).await {
            Ok(values) => values.iter().any(|v| v == value),
            Err(e) => {
                // NXDOMAIN and empty answers are expected until the zone is served
                debug!(record, error = %e, "TXT lookup failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for PropagationChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationChecker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
