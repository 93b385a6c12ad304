//! Resolution Client
//!
//! Queries the relay for a domain's IPv4 addresses under an adaptive,
//! session-wide timeout and reports a single [`ResolutionOutcome`] per call.

mod config;
mod outcome;
mod resolver;
mod timeout;

pub use config::{ClientConfig, DEFAULT_BASE_URL, TIMEOUT_CEILING_MS};
pub use outcome::{interpret_response, ResolutionOutcome};
pub use resolver::{ResolutionClient, ResolutionClientBuilder, ResolveMode};
pub use timeout::{AdaptiveTimeout, DEFAULT_GROWTH, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS};
