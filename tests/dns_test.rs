//! DNS Module Tests
//!
//! Covers:
//! - `Name` struct
//! - `DnsResolverWithOverrides` using a MockResolver
//! - `GaiResolver` (Basic System Resolver)

use tldbridge::dns::{Addrs, DnsResolverWithOverrides, GaiResolver, Name, Resolve, Resolving};

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

struct MockResolver {
    response: Vec<SocketAddr>,
}

impl Resolve for MockResolver {
    fn resolve(&self, _name: Name) -> Resolving {
        let addrs = self.response.clone();
        Box::pin(async move { Ok(Box::new(addrs.into_iter()) as Addrs) })
    }
}

#[test]
fn test_name_api() {
    let name = Name::new("mysite.hns");
    assert_eq!(name.as_str(), "mysite.hns");
    assert_eq!(name.to_string(), "mysite.hns");
}

#[tokio::test]
async fn test_dns_overrides() {
    let mock = Arc::new(MockResolver {
        response: vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 0)],
    });

    let mut overrides = HashMap::new();
    overrides.insert(
        "local.override".to_string(),
        vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))],
    );

    let resolver = DnsResolverWithOverrides::new(mock, overrides);

    // Test override hit
    let addrs: Vec<_> = resolver
        .resolve(Name::new("local.override"))
        .await
        .unwrap()
        .collect();

    assert_eq!(addrs.len(), 1);
    assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));

    // Test passthrough (miss)
    let addrs: Vec<_> = resolver
        .resolve(Name::new("other.hns"))
        .await
        .unwrap()
        .collect();

    assert_eq!(addrs.len(), 1);
    assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)));
}

#[tokio::test]
async fn test_gai_resolver_ip_literal() {
    let resolver = GaiResolver::new();
    let addrs: Vec<_> = resolver
        .resolve(Name::new("127.0.0.1"))
        .await
        .unwrap()
        .collect();

    assert_eq!(addrs.len(), 1);
    assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
}

#[tokio::test]
async fn test_gai_resolver_unknown_name() {
    let resolver = GaiResolver::new();
    let result = resolver.resolve(Name::new("invalid.invalid")).await;

    match result {
        Err(e) => assert_eq!(e.as_i32(), -105),
        Ok(addrs) => assert_eq!(addrs.count(), 0),
    }
}
