use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Empty;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::spawn;

/// Wraps the HTTP/1.1 sender half of a relay connection.
/// Equivalent to net::HttpStream.
pub struct HttpStream {
    sender: http1::SendRequest<Empty<Bytes>>,
}

impl HttpStream {
    /// Perform the HTTP/1.1 handshake and spawn the connection driver.
    pub async fn handshake(socket: SocketType) -> Result<Self, NetError> {
        let io = TokioIo::new(socket);

        let (sender, conn) = http1::handshake(io).await.map_err(|e| {
            tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
            NetError::ConnectionFailed
        })?;

        spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "relay connection closed with error");
            }
        });

        Ok(Self { sender })
    }

    pub async fn send_request(
        &mut self,
        req: Request<Empty<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender.send_request(req).await.map_err(|e| {
            tracing::debug!(error = %e, "request to relay failed");
            NetError::ConnectionClosed
        })
    }
}
