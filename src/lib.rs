//! # tldbridge
//!
//! Lets a browsing client reach hosts under TLDs that conventional DNS does
//! not serve (for example Handshake names) by asking a small relay service
//! for their IPv4 addresses.
//!
//! ## Components
//!
//! - **Classifier**: splits a URL and checks its TLD against a compiled-in
//!   allow-list of conventionally delegated TLDs.
//! - **Resolution client**: queries the relay with an adaptive timeout that
//!   grows by 1.5x after each timeout, capped at 30 seconds.
//! - **Relay**: an HTTP/1.1 service answering `/resolve?domain=` with a
//!   comma-joined list of IPv4 addresses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tldbridge::bridge::ResolutionBridge;
//! use tldbridge::client::{ResolutionClient, ResolveMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ResolutionClient::builder()
//!         .base_url("http://127.0.0.1:3000/")
//!         .build()
//!         .unwrap();
//!     let bridge = ResolutionBridge::new(client);
//!     let decision = bridge
//!         .resolve_url("https://mysite.hns/", ResolveMode::Asynchronous)
//!         .await;
//!     println!("{:?}", decision);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`classify`] - URL parsing and standard-TLD checks
//! - [`dns`] - Pluggable DNS resolvers
//! - [`socket`] / [`http`] - Client transport to the relay
//! - [`client`] - Resolution client and adaptive timeout
//! - [`relay`] - Resolution relay service
//! - [`bridge`] - Classifier and client combined
//! - [`config`] - JSON configuration

pub mod base;
pub mod bridge;
pub mod classify;
pub mod client;
pub mod config;
pub mod dns;
pub mod http;
pub mod relay;
pub mod socket;
