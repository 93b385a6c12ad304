use crate::dns::{Name, Resolve};
use std::net::IpAddr;

/// Resolve `domain` and serialize its IPv4 answers as `a.b.c.d,e.f.g.h`.
///
/// Answer order is kept and IPv6 entries are dropped. Any lookup failure
/// yields an empty string, the same as a name with no IPv4 records.
pub async fn lookup_ipv4(resolver: &dyn Resolve, domain: &str) -> String {
    match resolver.resolve(Name::new(domain)).await {
        Ok(addrs) => addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(ip) => Some(ip.to_string()),
                IpAddr::V6(_) => None,
            })
            .collect::<Vec<_>>()
            .join(","),
        Err(e) => {
            tracing::debug!(domain = %domain, error = %e, "lookup failed, answering empty");
            String::new()
        }
    }
}
