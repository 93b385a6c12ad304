//! DNS Resolution Module
//!
//! Provides pluggable DNS resolution with support for:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver (system config or explicit upstreams)
//! - Hostname-to-IP override mechanism
//!
//! # Architecture
//!
//! This module mirrors Chromium's `HostResolver` concept. The `Resolve`
//! trait is the core abstraction: the relay performs its per-request
//! lookups through it, and the client's `ConnectJob` uses it to reach the
//! relay host.
//!
//! # Example
//!
//! ```rust,ignore
//! use tldbridge::dns::{Name, Resolve, GaiResolver};
//!
//! let resolver = GaiResolver::new();
//! let addrs = resolver.resolve(Name::new("example.com")).await?;
//! for addr in addrs {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod gai;
mod hickory;
mod resolve;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving};
