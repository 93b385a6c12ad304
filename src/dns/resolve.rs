//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types used both
//! by the relay (to answer `/resolve` queries) and by the client (to reach
//! the relay host itself).

use crate::base::neterror::NetError;
use std::{
    collections::HashMap,
    fmt,
    future::Future,
    net::{IpAddr, SocketAddr},
    pin::Pin,
    sync::Arc,
};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over `SocketAddr`.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe; the relay shares one resolver
/// across all connection tasks.
///
/// # Design Notes
///
/// - Every call performs a fresh lookup; nothing here caches answers.
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
/// - Address order is the order the backend produced; callers must not
///   rely on any sorting.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses of every family.
    ///
    /// The returned addresses will have port 0; callers should set the
    /// appropriate port based on the target service.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// DNS resolver wrapper that supports hostname overrides.
///
/// This resolver first checks a map of hostname-to-address overrides before
/// falling back to the underlying resolver. The relay uses it to pin test
/// names (including round-robin sets) without touching `/etc/hosts`.
///
/// # Example
///
/// ```rust,ignore
/// use tldbridge::dns::{DnsResolverWithOverrides, GaiResolver};
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert(
///     "dummy.local".to_string(),
///     vec!["127.1.1.1".parse().unwrap(), "8.8.8.8".parse().unwrap()],
/// );
///
/// let resolver = DnsResolverWithOverrides::new(Arc::new(GaiResolver::new()), overrides);
/// ```
pub struct DnsResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<String, Vec<IpAddr>>>,
}

impl DnsResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback resolver for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their resolved addresses, in answer order.
    pub fn new(inner: Arc<dyn Resolve>, overrides: HashMap<String, Vec<IpAddr>>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, name: Name) -> Resolving {
        if let Some(ips) = self.overrides.get(name.as_str()) {
            tracing::debug!(domain = %name, count = ips.len(), "answering from overrides");
            let addrs: Vec<SocketAddr> = ips.iter().map(|ip| SocketAddr::new(*ip, 0)).collect();
            let addrs: Addrs = Box::new(addrs.into_iter());
            return Box::pin(std::future::ready(Ok(addrs)));
        }
        self.inner.resolve(name)
    }
}

impl fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
