//! HTTP client for the NGENIX DNS zone API.
//!
//! This crate provides the [`NgenixClient`] used to add and remove DNS-01
//! challenge records.
//!
//! # Example
//!
//! ```rust,ignore
//! use ngenix_client::NgenixClient;
//! use ngenix_core::Credentials;
//!
//! let credentials = Credentials::new("12345", "ngenix_name", "ngenix_token123")?;
//! let client = NgenixClient::new(credentials)?;
//!
//! let change = client.records().create_record("example.com", "abc123").await?;
//! println!("created {}", change.record);
//!
//! client.records().delete_record(&change.record).await?;
//! ```

#![doc(html_root_url = "https://docs.rs/ngenix-client/1.0.0")]

mod client;
pub mod api;

pub use api::{PendingChange, ZoneChange};
pub use client::{NgenixClient, NgenixClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use ngenix_core::{Credentials, NgenixError, RecordId, Result};
