use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection to {host}:{port} failed: {source}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        source: Arc<io::Error>,
    },
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        source: Arc<io::Error>,
    },
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("Address invalid")]
    AddressInvalid,
    #[error("Address in use")]
    AddressInUse,
    #[error("Failed to listen on {addr}: {source}")]
    ListenFailed {
        addr: SocketAddr,
        source: Arc<io::Error>,
    },

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Disallowed URL scheme")]
    DisallowedUrlScheme,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
    #[error("Response body too big")]
    ResponseBodyTooBig,
    #[error("HTTP body error")]
    HttpBodyError,

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NetError {
    /// Chromium `net_error_list.h` code for this error.
    ///
    /// Variants without a Chromium counterpart use the custom `-10000` range.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionFailed | NetError::ConnectionFailedTo { .. } => -104,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. } => -105,
            NetError::SslProtocolError => -107,
            NetError::AddressInvalid => -108,
            NetError::ConnectionTimedOut => -118,
            NetError::AddressInUse | NetError::ListenFailed { .. } => -147,
            NetError::InvalidUrl => -300,
            NetError::DisallowedUrlScheme => -301,
            NetError::InvalidResponse => -320,
            NetError::UnexpectedStatus(_) => -370,
            NetError::ResponseBodyTooBig => -345,

            // Custom codes
            NetError::HttpBodyError => -10001,
            NetError::Config(_) => -10002,
        }
    }

    /// True for the timeout that grows the client's adaptive timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetError::ConnectionTimedOut)
    }

    /// Build a `ConnectionFailedTo` with full context.
    pub fn connection_failed_to(host: &str, port: u16, source: io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.to_string(),
            port,
            source: Arc::new(source),
        }
    }

    /// Build a `NameNotResolvedFor` with full context.
    pub fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(source),
        }
    }

    /// Build a `ListenFailed`, mapping `AddrInUse` to its own variant.
    pub fn listen_failed(addr: SocketAddr, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AddrInUse {
            return NetError::AddressInUse;
        }
        NetError::ListenFailed {
            addr,
            source: Arc::new(source),
        }
    }
}
