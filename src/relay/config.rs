use crate::base::neterror::NetError;
use crate::dns::{DnsResolverWithOverrides, GaiResolver, HickoryResolver, Resolve};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Default relay listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

/// Which DNS backend answers `/resolve` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// `getaddrinfo` via the host's resolver configuration (default).
    #[default]
    System,
    /// hickory-dns, using `upstream` nameservers when set.
    Hickory,
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverKind::System => write!(f, "system"),
            ResolverKind::Hickory => write!(f, "hickory"),
        }
    }
}

impl FromStr for ResolverKind {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" | "gai" => Ok(ResolverKind::System),
            "hickory" => Ok(ResolverKind::Hickory),
            _ => Err(NetError::Config(format!(
                "unknown resolver '{}', expected 'system' or 'hickory'",
                s
            ))),
        }
    }
}

/// Relay service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
    /// Lookup backend.
    pub resolver: ResolverKind,
    /// Nameservers for the hickory backend; empty means system configuration.
    pub upstream: Vec<SocketAddr>,
    /// Fixed answers served without a lookup, in answer order.
    pub overrides: HashMap<String, Vec<IpAddr>>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            resolver: ResolverKind::default(),
            upstream: Vec::new(),
            overrides: HashMap::new(),
        }
    }
}

impl RelayConfig {
    /// Check settings that serde cannot express.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.resolver == ResolverKind::System && !self.upstream.is_empty() {
            return Err(NetError::Config(
                "upstream nameservers require the 'hickory' resolver".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the lookup backend described by this config.
    pub fn build_resolver(&self) -> Arc<dyn Resolve> {
        let base: Arc<dyn Resolve> = match self.resolver {
            ResolverKind::System => Arc::new(GaiResolver::new()),
            ResolverKind::Hickory if self.upstream.is_empty() => Arc::new(HickoryResolver::new()),
            ResolverKind::Hickory => Arc::new(HickoryResolver::with_upstreams(&self.upstream)),
        };

        if self.overrides.is_empty() {
            base
        } else {
            Arc::new(DnsResolverWithOverrides::new(base, self.overrides.clone()))
        }
    }
}
