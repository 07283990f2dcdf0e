//! Core types and errors for the NGENIX DNS-01 authenticator.
//!
//! This crate provides the foundational types shared by the client, the
//! propagation checker and the Certbot hook binary:
//!
//! - **Types**: credentials, DNS zones, zone records and challenge record handles
//! - **Names**: helpers for `_acme-challenge` record names and zone lookup
//! - **Errors**: a single error type, [`NgenixError`]
//!
//! # Example
//!
//! ```rust
//! use ngenix_core::{challenge_record_name, zone_candidates};
//!
//! assert_eq!(challenge_record_name("*.example.com"), "_acme-challenge.example.com");
//! assert_eq!(zone_candidates("www.example.com"), vec!["www.example.com", "example.com", "com"]);
//! ```

#![doc(html_root_url = "https://docs.rs/ngenix-core/1.0.0")]

mod error;
mod names;
pub mod types;

pub use error::{NgenixError, Result};
pub use names::*;
pub use types::*;
