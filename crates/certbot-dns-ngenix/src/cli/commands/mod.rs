//! Command implementations.

pub mod cleanup;
pub mod perform;

use anyhow::Result;
use ngenix_client::NgenixClient;
use ngenix_propagation::PropagationChecker;

use crate::authenticator::Authenticator;
use crate::backup::ZoneBackup;
use crate::config::Settings;

/// Build the authenticator described by `settings`.
pub fn authenticator(settings: Settings) -> Result<Authenticator> {
    let client = NgenixClient::builder(settings.credentials)
        .base_url(settings.api_url)
        .build()?;
    let checker = PropagationChecker::new(settings.propagation)?;
    let backup = settings.backup_dir.map(ZoneBackup::new);

    Ok(Authenticator::new(client, checker, backup))
}
