//! Fully buffered HTTP response.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;

/// Response with its body already collected.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    body: Bytes,
}

impl HttpResponse {
    /// Collect `resp`, failing with `ResponseBodyTooBig` past `limit` bytes.
    pub async fn collect(resp: http::Response<Incoming>, limit: usize) -> Result<Self, NetError> {
        let (parts, body) = resp.into_parts();
        let collected = Limited::new(body, limit).collect().await.map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                NetError::ResponseBodyTooBig
            } else {
                NetError::HttpBodyError
            }
        })?;

        Ok(Self {
            status: parts.status,
            body: collected.to_bytes(),
        })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
