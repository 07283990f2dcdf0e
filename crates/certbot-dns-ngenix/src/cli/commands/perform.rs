//! `certbot-dns-ngenix perform` - the auth hook.

use anyhow::{Context as _, Result};
use tracing::info;

use crate::authenticator::NAME;
use crate::cli::args::{ChallengeArgs, PerformArgs};
use crate::config::Settings;

pub async fn execute(settings: Settings, args: PerformArgs) -> Result<()> {
    let ChallengeArgs { domain, validation } = args.challenge;
    info!(authenticator = NAME, domain = %domain, "perform");

    let authenticator = super::authenticator(settings)?;
    let record = authenticator
        .perform(&domain, &validation)
        .await
        .with_context(|| format!("Failed to complete DNS-01 challenge for {domain}"))?;

    // Certbot hands this to the cleanup hook as CERTBOT_AUTH_OUTPUT
    println!("{}", record.id);
    Ok(())
}
