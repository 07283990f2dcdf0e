//! certbot-dns-ngenix - Certbot DNS-01 hooks for NGENIX
//!
//! Invoked by Certbot as `--manual-auth-hook` and `--manual-cleanup-hook`.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    certbot_dns_ngenix::run().await
}
