//! DNS propagation checks for DNS-01 challenge records.
//!
//! After a challenge record is written through the API, Certbot must not ask
//! the ACME server to validate until public resolvers serve the new value.
//! [`PropagationChecker`] polls a resolver at a fixed interval until the value
//! shows up or a hard deadline passes.

#![doc(html_root_url = "https://docs.rs/ngenix-propagation/1.0.0")]

mod checker;
mod lookup;

pub use checker::{
    PropagationChecker, PropagationConfig, PropagationReport, DEFAULT_INTERVAL, DEFAULT_TIMEOUT,
    MAX_TIMEOUT,
};
pub use lookup::{DnsLookup, TxtLookup, DEFAULT_NAMESERVER};
