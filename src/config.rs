//! File-based configuration.
//!
//! A single JSON document with optional `client` and `relay` sections:
//!
//! ```json
//! {
//!   "client": { "base_url": "https://relay.example/", "initial_timeout_ms": 5000 },
//!   "relay": { "listen": "0.0.0.0:3000", "resolver": "hickory", "upstream": ["127.0.0.1:5350"] }
//! }
//! ```

use crate::base::neterror::NetError;
use crate::client::ClientConfig;
use crate::relay::RelayConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration; missing sections and fields use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub client: ClientConfig,
    pub relay: RelayConfig,
}

impl BridgeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, NetError> {
        serde_json::from_str(text).map_err(|e| NetError::Config(e.to_string()))
    }

    /// Load and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NetError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, NetError> {
        serde_json::to_string_pretty(self).map_err(|e| NetError::Config(e.to_string()))
    }
}
