use super::config::RelayConfig;
use super::handler::route;
use crate::base::neterror::NetError;
use crate::dns::Resolve;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Pause after a failed `accept()` before trying again.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Stops a running [`RelayServer`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the accept loop to stop. In-flight connections finish on their own.
    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }
}

/// HTTP relay that answers `/resolve` queries with IPv4 lookups.
///
/// Each connection is served on its own task; requests share nothing but
/// the (stateless) resolver.
pub struct RelayServer {
    listener: TcpListener,
    resolver: Arc<dyn Resolve>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl RelayServer {
    /// Bind `addr` and serve lookups from `resolver`.
    pub async fn bind(addr: SocketAddr, resolver: Arc<dyn Resolve>) -> Result<Self, NetError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| NetError::listen_failed(addr, e))?;
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Ok(Self {
            listener,
            resolver,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Bind using a validated [`RelayConfig`].
    pub async fn from_config(config: &RelayConfig) -> Result<Self, NetError> {
        config.validate()?;
        Self::bind(config.listen, config.build_resolver()).await
    }

    /// The bound address (useful after binding port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        self.listener.local_addr().map_err(|_| NetError::AddressInvalid)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Accept connections until shut down.
    pub async fn run(mut self) -> Result<(), NetError> {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Relay listening on {}", addr);
        }

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            let resolver = self.resolver.clone();
                            tokio::spawn(async move {
                                if let Err(e) = Self::handle_connection(stream, resolver).await {
                                    debug!("Relay connection error from {}: {}", addr, e);
                                }
                            });
                        }
                        Err(e) => Self::accept_failed(&e).await,
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Relay shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Log a failed `accept()` and pause, so persistent failures such as
    /// EMFILE do not spin the loop.
    async fn accept_failed(e: &io::Error) {
        error!("Relay accept error: {}", e);
        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
    }

    async fn handle_connection(
        stream: TcpStream,
        resolver: Arc<dyn Resolve>,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let service = service_fn(move |req: Request<Incoming>| {
            let resolver = resolver.clone();
            let method = req.method().clone();
            let uri = req.uri().clone();
            async move { Ok::<_, Infallible>(route(&method, &uri, resolver.as_ref()).await) }
        });

        hyper::server::conn::http1::Builder::new()
            .serve_connection(io, service)
            .await
    }
}
