use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::dns::{Name, Resolve};
use crate::socket::client::SocketType;
use boring::ssl::{SslConnector, SslMethod, SslVersion};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpStream;
use url::{Host, Url};

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(url: &Url, resolver: &dyn Resolve) -> Result<SocketType, NetError> {
        let secure = match url.scheme() {
            "http" => false,
            "https" => true,
            _ => return Err(NetError::DisallowedUrlScheme),
        };
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;
        let host = url.host().ok_or(NetError::InvalidUrl)?;

        // 1. DNS Resolution (skipped for IP literals)
        let (host_name, addrs): (String, Vec<SocketAddr>) = match host {
            Host::Ipv4(ip) => (ip.to_string(), vec![SocketAddr::new(IpAddr::V4(ip), port)]),
            Host::Ipv6(ip) => (ip.to_string(), vec![SocketAddr::new(IpAddr::V6(ip), port)]),
            Host::Domain(domain) => {
                let addrs = resolver
                    .resolve(Name::new(domain))
                    .await?
                    .map(|mut addr| {
                        addr.set_port(port);
                        addr
                    })
                    .collect();
                (domain.to_string(), addrs)
            }
        };

        // 2. TCP Connect, in answer order
        let mut last_error = None;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(addr = %addr, error = %e, "relay connect attempt failed");
                    last_error = Some(e);
                }
            }
        }

        let stream = match (stream, last_error) {
            (Some(s), _) => s,
            (None, Some(e)) => return Err(e).connection_context(&host_name, port),
            (None, None) => return Err(NetError::ConnectionFailed),
        };

        // 3. SSL Handshake (if https)
        if secure {
            let mut builder =
                SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
            builder
                .set_min_proto_version(Some(SslVersion::TLS1_2))
                .map_err(|_| NetError::SslProtocolError)?;
            // Only HTTP/1.1 is spoken to the relay.
            builder
                .set_alpn_protos(b"\x08http/1.1")
                .map_err(|_| NetError::SslProtocolError)?;

            let connector = builder.build();
            let config = connector.configure().map_err(|_| NetError::SslProtocolError)?;

            let tls_stream = tokio_boring::connect(config, &host_name, stream)
                .await
                .map_err(|e| {
                    tracing::debug!(host = %host_name, error = ?e, "SSL handshake failed");
                    NetError::SslProtocolError
                })?;

            Ok(SocketType::Ssl(tls_stream))
        } else {
            Ok(SocketType::Tcp(stream))
        }
    }
}
