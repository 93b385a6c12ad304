//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async DNS resolution with support for:
//! - System DNS configuration auto-detection
//! - Explicit upstream nameservers (e.g. a resolver that serves an
//!   alternative root zone)
//! - IPv4 + IPv6 lookup in a single call
//!
//! # Performance
//!
//! Unlike `GaiResolver`, this resolver is fully async and doesn't require
//! spawning blocking tasks. It maintains connection pools to DNS servers
//! for better performance under load.
//!
//! hickory's response cache and retries are disabled: every `resolve` call
//! sends exactly one query per address family upstream.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::{
    io,
    net::SocketAddr,
    sync::{Arc, LazyLock},
    time::Duration,
};

/// Both address families, one try, nothing cached.
fn apply_lookup_options(opts: &mut ResolverOpts) {
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts.attempts = 0;
    opts.cache_size = 0;
    opts.positive_max_ttl = Some(Duration::ZERO);
    opts.negative_max_ttl = Some(Duration::ZERO);
}

/// Async DNS resolver backed by hickory-dns.
///
/// [`HickoryResolver::new`] shares one lazily initialized, system-configured
/// resolver across all instances. [`HickoryResolver::with_upstreams`] builds
/// a dedicated resolver that only talks to the given nameservers.
///
/// # Example
///
/// ```rust,ignore
/// use tldbridge::dns::{HickoryResolver, Name, Resolve};
///
/// let resolver = HickoryResolver::with_upstreams(&["127.0.0.1:5350".parse()?]);
/// let addrs = resolver.resolve(Name::new("mysite.hns")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a resolver using the system DNS configuration.
    ///
    /// The underlying resolver is shared and initialized on first use.
    /// If the system configuration cannot be read, hickory's defaults are
    /// used instead.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<Arc<TokioResolver>> = LazyLock::new(|| {
            let mut builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            apply_lookup_options(builder.options_mut());

            Arc::new(builder.build())
        });

        Self {
            resolver: RESOLVER.clone(),
        }
    }

    /// Creates a resolver that queries only `upstreams` (plain UDP/TCP).
    pub fn with_upstreams(upstreams: &[SocketAddr]) -> Self {
        let mut group = NameServerConfigGroup::new();
        for upstream in upstreams {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[upstream.ip()],
                upstream.port(),
                true,
            ));
        }
        tracing::debug!(count = upstreams.len(), "Using explicit upstream nameservers");

        let config = ResolverConfig::from_parts(None, vec![], group);
        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        apply_lookup_options(builder.options_mut());

        Self {
            resolver: Arc::new(builder.build()),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                NetError::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, e.to_string()))
            })?;

            let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, 0)).collect();

            if addrs.is_empty() {
                return Err(NetError::dns_failed(
                    domain,
                    io::Error::new(io::ErrorKind::NotFound, "No addresses returned"),
                ));
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "hickory-dns resolution complete");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}
