//! Resolution Relay
//!
//! A small HTTP/1.1 service exposing `GET /resolve?domain=<name>`. Each
//! query triggers exactly one fresh lookup; answers are filtered to IPv4
//! and returned comma-joined with status 200. A missing domain and a
//! failed lookup both produce an empty 200 body.
//!
//! # Example
//!
//! ```rust,ignore
//! use tldbridge::relay::{RelayConfig, RelayServer};
//!
//! let server = RelayServer::from_config(&RelayConfig::default()).await?;
//! server.run().await?;
//! ```

mod config;
mod handler;
mod lookup;
mod server;

pub use config::{RelayConfig, ResolverKind, DEFAULT_LISTEN};
pub use handler::{route, INFO_PAGE};
pub use lookup::lookup_ipv4;
pub use server::{RelayServer, ShutdownHandle};
