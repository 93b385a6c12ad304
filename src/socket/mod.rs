//! Transport to the relay.
//!
//! [`ConnectJob`](connectjob::ConnectJob) resolves the relay host, connects
//! over TCP in answer order and, for `https`, completes a BoringSSL
//! handshake. The result is a [`SocketType`](client::SocketType) ready for
//! an HTTP/1.1 exchange.

pub mod client;
pub mod connectjob;
