//! Attaches the relay host or looked-up domain to `io::Error`s.
//!
//! Used where a bare `io::Error` would lose which relay or which name
//! failed: the connect job and the system resolver.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Wrap a failed connect to the relay as `ConnectionFailedTo`.
    ///
    /// # Example
    /// ```ignore
    /// use tldbridge::base::context::IoResultExt;
    ///
    /// // After every resolved relay address was refused:
    /// return Err(last_error).connection_context(url.host_str().unwrap_or(""), port);
    /// // "Connection to relay.example:443 failed: connection refused"
    /// ```
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// Wrap a failed `getaddrinfo` as `NameNotResolvedFor`.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| NetError::connection_failed_to(host, port, e))
    }

    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }
}
