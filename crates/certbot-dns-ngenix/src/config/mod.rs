//! Configuration management.
//!
//! Settings come from three layers, later ones winning: the TOML config file,
//! environment variables, command-line flags. Clap folds the last two
//! together, so resolving is a merge of [`Config`] with [`Cli`].

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use ngenix_client::DEFAULT_BASE_URL;
use ngenix_core::Credentials;
use ngenix_propagation::{PropagationConfig, DEFAULT_INTERVAL, DEFAULT_NAMESERVER, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backup::DEFAULT_BACKUP_DIR;
use crate::cli::args::Cli;

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// NGENIX customer id.
    pub customer_id: Option<String>,

    /// NGENIX account name.
    pub name: Option<String>,

    /// NGENIX API token.
    pub token: Option<String>,

    /// API base URL.
    pub api_url: Option<String>,

    /// Resolvers used for propagation checks.
    pub nameservers: Vec<IpAddr>,

    /// Seconds between propagation checks.
    pub propagation_interval_secs: Option<u64>,

    /// Seconds to wait for propagation before giving up.
    pub propagation_timeout_secs: Option<u64>,

    /// Where zone backups are written.
    pub backup_dir: Option<PathBuf>,

    /// Set to false to disable zone backups.
    pub backup: Option<bool>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "ngenix", "certbot-dns-ngenix")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Fully resolved settings for one hook invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Account credentials.
    pub credentials: Credentials,

    /// API base URL.
    pub api_url: String,

    /// Propagation polling parameters.
    pub propagation: PropagationConfig,

    /// Backup directory, `None` when backups are off.
    pub backup_dir: Option<PathBuf>,
}

impl Settings {
    /// Merge flags and environment (`cli`) over the config file.
    ///
    /// Fails when any credential is missing or empty.
    pub fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let credentials = Self::credentials(cli, &config)?;

        let nameservers = if !cli.nameservers.is_empty() {
            cli.nameservers.clone()
        } else if !config.nameservers.is_empty() {
            config.nameservers
        } else {
            vec![DEFAULT_NAMESERVER]
        };

        let interval = cli
            .propagation_interval
            .or(config.propagation_interval_secs)
            .map_or(DEFAULT_INTERVAL, Duration::from_secs);
        let timeout = cli
            .propagation_timeout
            .or(config.propagation_timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let propagation = PropagationConfig {
            interval,
            timeout,
            nameservers,
        };
        propagation.validate()?;

        let backup_enabled = !cli.no_backup && config.backup.unwrap_or(true);
        let backup_dir = backup_enabled.then(|| {
            cli.backup_dir
                .clone()
                .or(config.backup_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR))
        });

        Ok(Self {
            credentials,
            api_url: cli
                .api_url
                .clone()
                .or(config.api_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            propagation,
            backup_dir,
        })
    }

    fn credentials(cli: &Cli, config: &Config) -> Result<Credentials> {
        let pick = |flag: &Option<String>, file: &Option<String>| {
            flag.clone()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.clone())
                .unwrap_or_default()
        };

        let customer_id = pick(&cli.customer_id, &config.customer_id);
        let name = pick(&cli.name, &config.name);
        let token = pick(&cli.token, &config.token);

        Credentials::new(customer_id, name, token).map_err(|e| {
            anyhow::anyhow!(
                "{e}.\n\n\
                 NGENIX credentials are required. Set them with one of:\n  \
                 1. --dns-ngenix-customer-id, --dns-ngenix-name, --dns-ngenix-token\n  \
                 2. NGENIX_CUSTOMER_ID, NGENIX_NAME, NGENIX_TOKEN environment variables\n  \
                 3. customer_id, name, token in the config file"
            )
        })
    }
}
