//! HTTP layer for talking to the relay.

pub mod response;
pub mod streamfactory;
pub mod transaction;

pub use response::HttpResponse;
pub use transaction::{HttpNetworkTransaction, MAX_RESPONSE_BODY};
