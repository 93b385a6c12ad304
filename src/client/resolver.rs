//! Resolution client.
//!
//! Sends `GET <base>/resolve?domain=<domain>` to the relay and turns the
//! answer into a [`ResolutionOutcome`]. Every call settles exactly once:
//! `resolve` returns the outcome by value on every path, including setup
//! and transport failures.

use super::config::ClientConfig;
use super::outcome::{interpret_response, ResolutionOutcome};
use super::timeout::AdaptiveTimeout;
use crate::base::neterror::NetError;
use crate::dns::{GaiResolver, Resolve};
use crate::http::HttpNetworkTransaction;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// How a resolution is bounded in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Bounded by the shared adaptive timeout; a timeout grows it.
    #[default]
    Asynchronous,
    /// No application-level timeout; the caller's environment decides
    /// when to give up.
    Synchronous,
}

/// Client for the relay's `/resolve` endpoint.
///
/// Cheap to clone; clones share the adaptive timeout and DNS resolver.
///
/// # Example
///
/// ```rust,ignore
/// use tldbridge::client::{ResolutionClient, ResolveMode};
///
/// let client = ResolutionClient::builder()
///     .base_url("https://relay.example/")
///     .build()?;
/// let outcome = client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
/// ```
#[derive(Clone)]
pub struct ResolutionClient {
    endpoint: Url,
    timeout: Arc<AdaptiveTimeout>,
    resolver: Arc<dyn Resolve>,
}

impl ResolutionClient {
    /// Create a new client builder.
    pub fn builder() -> ResolutionClientBuilder {
        ResolutionClientBuilder::default()
    }

    /// Build a client from validated configuration, with a fresh adaptive timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, NetError> {
        config.validate()?;
        Self::builder()
            .base_url(&config.base_url)
            .timeout(Arc::new(AdaptiveTimeout::new(
                config.initial_timeout_ms,
                config.max_timeout_ms,
                config.timeout_growth,
            )))
            .build()
    }

    /// The `/resolve` endpoint, without a query.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The shared adaptive timeout.
    pub fn adaptive_timeout(&self) -> &Arc<AdaptiveTimeout> {
        &self.timeout
    }

    /// Full query URL for `domain`, percent-encoded.
    pub fn query_url(&self, domain: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("domain", domain);
        url
    }

    /// Resolve `domain` through the relay.
    pub async fn resolve(&self, domain: &str, mode: ResolveMode) -> ResolutionOutcome {
        let url = self.query_url(domain);
        let transaction = HttpNetworkTransaction::new(&url, self.resolver.as_ref());

        let result = match mode {
            ResolveMode::Asynchronous => {
                let limit = self.timeout.current();
                match tokio::time::timeout(limit, transaction.get()).await {
                    Ok(result) => result,
                    Err(_) => {
                        let next_ms = self.timeout.grow();
                        tracing::warn!(
                            domain = %domain,
                            timeout_ms = next_ms,
                            "resolver has timed out, increasing timeout"
                        );
                        Err(NetError::ConnectionTimedOut)
                    }
                }
            }
            ResolveMode::Synchronous => transaction.get().await,
        };

        match result {
            Ok(response) => {
                let body = String::from_utf8_lossy(response.body());
                let shown = body.trim().replace("\r\n", ",").replace('\n', ",");
                tracing::debug!(
                    domain = %domain,
                    endpoint = %self.endpoint,
                    status = response.status().as_u16(),
                    response = %shown,
                    "relay answered"
                );
                interpret_response(response.status(), response.body())
            }
            Err(e) => {
                tracing::debug!(domain = %domain, endpoint = %self.endpoint, error = %e, "relay request failed");
                ResolutionOutcome::Error(e)
            }
        }
    }

    /// Synchronous-mode resolution that blocks the calling thread.
    ///
    /// Drives the request on a private current-thread runtime. Must not be
    /// called from within an async context.
    pub fn resolve_blocking(&self, domain: &str) -> ResolutionOutcome {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(error = %e, "failed to start blocking resolution runtime");
                return ResolutionOutcome::Error(NetError::ConnectionFailed);
            }
        };
        runtime.block_on(self.resolve(domain, ResolveMode::Synchronous))
    }
}

impl fmt::Debug for ResolutionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout_ms", &self.timeout.current_ms())
            .finish_non_exhaustive()
    }
}

/// Builder for creating a [`ResolutionClient`].
#[derive(Default)]
pub struct ResolutionClientBuilder {
    base_url: Option<String>,
    timeout: Option<Arc<AdaptiveTimeout>>,
    resolver: Option<Arc<dyn Resolve>>,
}

impl ResolutionClientBuilder {
    /// Set the relay base URL (default: [`DEFAULT_BASE_URL`](super::config::DEFAULT_BASE_URL)).
    pub fn base_url(mut self, base: &str) -> Self {
        self.base_url = Some(base.to_string());
        self
    }

    /// Share an existing adaptive timeout (default: a fresh 5s cell).
    pub fn timeout(mut self, timeout: Arc<AdaptiveTimeout>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolver used to reach the relay host (default: system resolver).
    pub fn dns_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the client, validating the base URL.
    pub fn build(self) -> Result<ResolutionClient, NetError> {
        let base = self
            .base_url
            .unwrap_or_else(|| super::config::DEFAULT_BASE_URL.to_string());

        Ok(ResolutionClient {
            endpoint: resolve_endpoint(&base)?,
            timeout: self.timeout.unwrap_or_default(),
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(GaiResolver::new()) as Arc<dyn Resolve>),
        })
    }
}

/// `<base>/resolve`, treating the base path as a directory.
fn resolve_endpoint(base: &str) -> Result<Url, NetError> {
    let mut base = Url::parse(base).map_err(|_| NetError::InvalidUrl)?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(NetError::DisallowedUrlScheme);
    }
    if base.host_str().is_none() {
        return Err(NetError::InvalidUrl);
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("resolve").map_err(|_| NetError::InvalidUrl)
}
