//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Certbot DNS-01 authenticator hooks for NGENIX
///
/// Creates the `_acme-challenge` TXT record through the NGENIX API, waits
/// until public DNS serves it, and removes it once Certbot is done.
///
/// Use as:
///   certbot certonly --manual --preferred-challenges dns
///     --manual-auth-hook "certbot-dns-ngenix perform"
///     --manual-cleanup-hook "certbot-dns-ngenix cleanup" -d example.com
#[derive(Parser, Debug)]
#[command(name = "certbot-dns-ngenix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// NGENIX customer id
    #[arg(long = "dns-ngenix-customer-id", env = "NGENIX_CUSTOMER_ID", global = true)]
    pub customer_id: Option<String>,

    /// NGENIX account name
    #[arg(long = "dns-ngenix-name", env = "NGENIX_NAME", global = true)]
    pub name: Option<String>,

    /// NGENIX API token
    #[arg(
        long = "dns-ngenix-token",
        env = "NGENIX_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// NGENIX API base URL
    #[arg(long = "dns-ngenix-api-url", env = "NGENIX_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Seconds between DNS propagation checks [default: 60]
    #[arg(long = "dns-ngenix-propagation-interval", value_name = "SECONDS", global = true)]
    pub propagation_interval: Option<u64>,

    /// Seconds to wait for DNS propagation [default: 900]
    #[arg(long = "dns-ngenix-propagation-timeout", value_name = "SECONDS", global = true)]
    pub propagation_timeout: Option<u64>,

    /// Resolver used for propagation checks, repeatable [default: 8.8.8.8]
    #[arg(long = "dns-ngenix-nameserver", value_name = "IP", global = true)]
    pub nameservers: Vec<IpAddr>,

    /// Directory for zone backups [default: /tmp/ngenix-dns-zone]
    #[arg(long = "dns-ngenix-backup-dir", value_name = "DIR", global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Do not write zone backups
    #[arg(long = "dns-ngenix-no-backup", global = true)]
    pub no_backup: bool,

    /// Path to config file
    #[arg(short, long, env = "CERTBOT_DNS_NGENIX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the challenge record and wait for propagation (auth hook)
    Perform(PerformArgs),

    /// Remove the challenge record (cleanup hook)
    Cleanup(CleanupArgs),
}

/// The challenge Certbot is working on
#[derive(Args, Debug)]
pub struct ChallengeArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    pub domain: String,

    /// Validation string to publish
    #[arg(long, env = "CERTBOT_VALIDATION")]
    pub validation: String,
}

#[derive(Args, Debug)]
pub struct PerformArgs {
    #[command(flatten)]
    pub challenge: ChallengeArgs,
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// Record handle printed by `perform`
    #[arg(long, env = "CERTBOT_AUTH_OUTPUT")]
    pub record_id: Option<String>,
}
