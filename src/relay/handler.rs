//! Request routing for the relay.
//!
//! | Route            | Response                                   |
//! |------------------|--------------------------------------------|
//! | `GET /`          | static HTML info page                      |
//! | `GET /resolve`   | comma-joined IPv4 list, or empty, always 200 |
//! | anything else    | 404 `Not Found`                            |

use super::lookup::lookup_ipv4;
use crate::dns::Resolve;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Response, StatusCode, Uri};
use http_body_util::Full;

/// Body of `GET /`.
pub const INFO_PAGE: &str = "<h1>TLD Bridge Relay</h1>\
<p>Oh, hi! There's not much to see here. \
Query <code>/resolve?domain=&lt;name&gt;</code> for IPv4 addresses.</p>";

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// First non-empty `domain` query parameter, percent-decoded.
fn domain_param(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "domain")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Route one request. Never fails; lookup errors become an empty 200.
pub async fn route(method: &Method, uri: &Uri, resolver: &dyn Resolve) -> Response<Full<Bytes>> {
    if *method != Method::GET && *method != Method::HEAD {
        return respond(StatusCode::NOT_FOUND, "text/plain; charset=utf-8", "Not Found");
    }

    match uri.path() {
        "/" => {
            tracing::info!(method = %method, "Received request for info page");
            respond(StatusCode::OK, "text/html; charset=utf-8", INFO_PAGE)
        }
        "/resolve" => {
            let domain = domain_param(uri);
            tracing::info!(
                method = %method,
                domain = domain.as_deref().unwrap_or(""),
                "Received resolve request"
            );

            let body = match domain {
                Some(domain) => lookup_ipv4(resolver, &domain).await,
                None => String::new(),
            };
            respond(StatusCode::OK, "text/plain; charset=utf-8", body)
        }
        _ => respond(StatusCode::NOT_FOUND, "text/plain; charset=utf-8", "Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{Addrs, Name, Resolving};
    use http_body_util::BodyExt;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingResolver {
        answer: Vec<SocketAddr>,
        calls: AtomicUsize,
        last: Mutex<Option<String>>,
    }

    impl Resolve for RecordingResolver {
        fn resolve(&self, name: Name) -> Resolving {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(name.to_string());
            let addrs = self.answer.clone();
            Box::pin(async move { Ok(Box::new(addrs.into_iter()) as Addrs) })
        }
    }

    async fn body_of(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> (Method, Uri) {
        (Method::GET, uri.parse().unwrap())
    }

    #[tokio::test]
    async fn test_root_info_page() {
        let resolver = RecordingResolver::default();
        let (method, uri) = get("/");
        let response = route(&method, &uri, &resolver).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await.starts_with("<h1>"));
    }

    #[tokio::test]
    async fn test_resolve_without_domain_is_empty_and_skips_lookup() {
        let resolver = RecordingResolver::default();
        for target in ["/resolve", "/resolve?domain=", "/resolve?other=x"] {
            let (method, uri) = get(target);
            let response = route(&method, &uri, &resolver).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_of(response).await, "");
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_filters_ipv6() {
        let resolver = RecordingResolver {
            answer: vec![
                "192.0.2.1:0".parse().unwrap(),
                "[2001:db8::1]:0".parse().unwrap(),
                "192.0.2.2:0".parse().unwrap(),
            ],
            ..Default::default()
        };
        let (method, uri) = get("/resolve?domain=example.test");
        let response = route(&method, &uri, &resolver).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "192.0.2.1,192.0.2.2");
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_percent_decodes_domain() {
        let resolver = RecordingResolver::default();
        let (method, uri) = get("/resolve?domain=b%C3%BCcher.hns");
        route(&method, &uri, &resolver).await;
        assert_eq!(resolver.last.lock().unwrap().as_deref(), Some("bücher.hns"));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_head_is_served_and_logged_as_head() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let resolver = RecordingResolver {
            answer: vec!["192.0.2.1:0".parse().unwrap()],
            ..Default::default()
        };
        let uri: Uri = "/resolve?domain=example.test".parse().unwrap();
        let response = route(&Method::HEAD, &uri, &resolver).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("method=HEAD"), "log was: {}", output);
        assert!(!output.contains("method=GET"), "log was: {}", output);
    }

    #[tokio::test]
    async fn test_unknown_path_and_method() {
        let resolver = RecordingResolver::default();
        let (method, uri) = get("/dns-query");
        assert_eq!(route(&method, &uri, &resolver).await.status(), StatusCode::NOT_FOUND);

        let uri: Uri = "/resolve?domain=example.test".parse().unwrap();
        let response = route(&Method::POST, &uri, &resolver).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }
}
