//! TXT record lookups.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{Resolver, TokioResolver};
use ngenix_core::{NgenixError, Result};
use tracing::trace;

/// Public resolver queried when none is configured (Google DNS)
pub const DEFAULT_NAMESERVER: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

/// Source of TXT answers
#[async_trait]
pub trait TxtLookup: Send + Sync {
    /// Return every TXT value published at `name`.
    ///
    /// Strings of a multi-string record are joined into one value.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>>;
}

/// TXT lookups through `hickory-resolver`
pub struct DnsLookup {
    resolver: TokioResolver,
}

impl std::fmt::Debug for DnsLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsLookup").finish_non_exhaustive()
    }
}

impl DnsLookup {
    /// Query the given nameservers, or the system resolver when the list is empty.
    ///
    /// Answer caching is disabled so every poll sees fresh data.
    pub fn new(nameservers: &[IpAddr]) -> Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(5);
        opts.attempts = 2;
        opts.cache_size = 0;

        let resolver = if nameservers.is_empty() {
            TokioResolver::builder_tokio()
                .map_err(|e| NgenixError::Dns(format!("failed to create resolver: {e}")))?
                .with_options(opts)
                .build()
        } else {
            let mut config = ResolverConfig::new();
            for ip in nameservers {
                config.add_name_server(NameServerConfig::new(SocketAddr::new(*ip, 53), Protocol::Udp));
            }
            Resolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(opts)
                .build()
        };

        Ok(Self { resolver })
    }
}

#[async_trait]
impl TxtLookup for DnsLookup {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        let response = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(|e| NgenixError::Dns(e.to_string()))?;

        let values: Vec<String> = response
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|data| String::from_utf8_lossy(data))
                    .collect()
            })
            .collect();

        trace!(name, answers = values.len(), "TXT lookup");
        Ok(values)
    }
}
