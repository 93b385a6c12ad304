//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed in a thread pool to avoid blocking the async runtime.
//!
//! # When to Use
//!
//! - When the host's resolver already knows the alternative root
//!   (e.g. `/etc/resolv.conf` points at a Handshake-aware daemon)
//! - When `/etc/hosts` entries must be honoured
//! - As the relay's default backend

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::{io, net::ToSocketAddrs};

/// System DNS resolver using `getaddrinfo` in a thread pool.
///
/// Asks for every address family, matching a lookup with `all: true`;
/// the relay does its own IPv4 filtering afterwards.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.collect::<Vec<_>>())
            })
            .await;

            // Handle task join error (cancellation, panic)
            let addrs = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    NetError::NameNotResolved
                })?
                .dns_context(&domain)
                .inspect_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                })?;

            if addrs.is_empty() {
                return Err(NetError::dns_failed(
                    &domain,
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "No addresses returned by getaddrinfo",
                    ),
                ));
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}
