//! Resolution Bridge
//!
//! Ties the classifier to the client: a navigated URL whose TLD is on the
//! standard allow-list is left to normal DNS, everything else is sent to
//! the relay.
//!
//! # Example
//!
//! ```rust,ignore
//! use tldbridge::bridge::{BridgeDecision, ResolutionBridge};
//! use tldbridge::client::{ResolutionClient, ResolveMode};
//!
//! let bridge = ResolutionBridge::new(ResolutionClient::builder().build()?);
//! match bridge.resolve_url("https://mysite.hns/", ResolveMode::Asynchronous).await {
//!     BridgeDecision::External { url, outcome } => println!("{} -> {:?}", url.domain(), outcome),
//!     other => println!("{:?}", other),
//! }
//! ```

use crate::classify::{parse, ParsedUrl, TldAllowList};
use crate::client::{ResolutionClient, ResolutionOutcome, ResolveMode};
use std::sync::Arc;

/// How a URL is handled by the bridge.
#[derive(Debug, Clone)]
pub enum BridgeDecision {
    /// The URL could not be parsed; nothing is resolved.
    Ineligible,
    /// Host sits under a standard TLD; normal DNS applies.
    Standard(ParsedUrl),
    /// Host needs the relay. `outcome` is `None` until resolved.
    External {
        url: ParsedUrl,
        outcome: Option<ResolutionOutcome>,
    },
}

impl BridgeDecision {
    /// The parsed URL, if any.
    pub fn url(&self) -> Option<&ParsedUrl> {
        match self {
            BridgeDecision::Ineligible => None,
            BridgeDecision::Standard(url) | BridgeDecision::External { url, .. } => Some(url),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, BridgeDecision::External { .. })
    }

    /// Relay outcome for a resolved `External` decision.
    pub fn outcome(&self) -> Option<&ResolutionOutcome> {
        match self {
            BridgeDecision::External { outcome, .. } => outcome.as_ref(),
            _ => None,
        }
    }
}

/// Classifier and resolution client behind one handle.
///
/// Cheap to clone; clones share the allow-list and the client's adaptive
/// timeout.
#[derive(Debug, Clone)]
pub struct ResolutionBridge {
    tlds: Arc<TldAllowList>,
    client: ResolutionClient,
}

impl ResolutionBridge {
    /// Bridge using the compiled-in standard TLD table.
    pub fn new(client: ResolutionClient) -> Self {
        Self::with_tlds(Arc::new(TldAllowList::standard()), client)
    }

    pub fn with_tlds(tlds: Arc<TldAllowList>, client: ResolutionClient) -> Self {
        Self { tlds, client }
    }

    pub fn tlds(&self) -> &TldAllowList {
        &self.tlds
    }

    pub fn client(&self) -> &ResolutionClient {
        &self.client
    }

    /// Classify `url` without contacting the relay.
    pub fn classify(&self, url: &str) -> BridgeDecision {
        match parse(url) {
            None => BridgeDecision::Ineligible,
            Some(parsed) if self.tlds.is_standard(&parsed) => BridgeDecision::Standard(parsed),
            Some(parsed) => BridgeDecision::External {
                url: parsed,
                outcome: None,
            },
        }
    }

    /// Classify `url` and, for non-standard TLDs, resolve its host through
    /// the relay.
    pub async fn resolve_url(&self, url: &str, mode: ResolveMode) -> BridgeDecision {
        match self.classify(url) {
            BridgeDecision::External { url, .. } => {
                tracing::debug!(domain = %url.domain(), tld = %url.tld(), "non-standard TLD, asking relay");
                let outcome = self.client.resolve(url.domain(), mode).await;
                BridgeDecision::External {
                    url,
                    outcome: Some(outcome),
                }
            }
            decision => decision,
        }
    }
}
