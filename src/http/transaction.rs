use crate::base::neterror::NetError;
use crate::dns::Resolve;
use crate::http::response::HttpResponse;
use crate::http::streamfactory::HttpStream;
use crate::socket::connectjob::ConnectJob;
use bytes::Bytes;
use http::{header, Method, Request};
use http_body_util::Empty;
use url::{Position, Url};

/// Upper bound on a relay response body.
pub const MAX_RESPONSE_BODY: usize = 64 * 1024;

/// One-shot HTTP/1.1 GET: connect, send, collect the body.
///
/// A fresh connection is opened per transaction; nothing is pooled and
/// nothing is retried.
pub struct HttpNetworkTransaction<'a> {
    url: &'a Url,
    resolver: &'a dyn Resolve,
}

impl<'a> HttpNetworkTransaction<'a> {
    pub fn new(url: &'a Url, resolver: &'a dyn Resolve) -> Self {
        Self { url, resolver }
    }

    pub async fn get(&self) -> Result<HttpResponse, NetError> {
        let socket = ConnectJob::connect(self.url, self.resolver).await?;
        let mut stream = HttpStream::handshake(socket).await?;

        let request = build_request(self.url)?;
        let response = stream.send_request(request).await?;
        HttpResponse::collect(response, MAX_RESPONSE_BODY).await
    }
}

/// Origin-form GET with `Host` taken from the URL authority.
fn build_request(url: &Url) -> Result<Request<Empty<Bytes>>, NetError> {
    let target = &url[Position::BeforePath..Position::AfterQuery];
    let authority = &url[Position::BeforeHost..Position::AfterPort];

    Request::builder()
        .method(Method::GET)
        .uri(target)
        .header(header::HOST, authority)
        .header(header::CONNECTION, "close")
        .body(Empty::new())
        .map_err(|_| NetError::InvalidUrl)
}
