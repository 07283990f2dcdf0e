//! # certbot-dns-ngenix
//!
//! DNS-01 authenticator for Certbot backed by the NGENIX DNS API.
//!
//! Certbot drives the binary through its manual-hook contract:
//!
//! ```text
//! certbot certonly --manual --preferred-challenges dns \
//!   --manual-auth-hook    "certbot-dns-ngenix perform" \
//!   --manual-cleanup-hook "certbot-dns-ngenix cleanup" \
//!   -d example.com
//! ```
//!
//! - **perform**: adds `_acme-challenge.<domain>` and waits until public DNS serves it
//! - **cleanup**: removes the record again; failures are logged, never fatal

pub mod authenticator;
pub mod backup;
pub mod cli;
pub mod config;
pub mod logging;

pub use authenticator::{Authenticator, CleanupOutcome};
pub use cli::run;
