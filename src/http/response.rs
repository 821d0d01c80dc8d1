//! HTTP response building module
//!
//! Provides builders for the status codes the listing server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::listing::ResponseSink;

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Response sink collecting the listing page
#[derive(Debug, Default)]
pub struct HtmlBody {
    content: Option<String>,
}

impl HtmlBody {
    /// Turn the collected body into a 200 HTML response
    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        build_html_response(self.content.unwrap_or_default(), is_head)
    }
}

impl ResponseSink for HtmlBody {
    fn set_body(&mut self, content: String) {
        self.content = Some(content);
    }
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .header("Cache-Control", "no-store")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_plain_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_plain_response(500, "500 Internal Server Error")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(204).header("Allow", ALLOW);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOW)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health probe response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from_static(status.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_plain_response(status: u16, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(text, &e);
            Response::new(Full::new(Bytes::from_static(text.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_html_body_sink() {
        let mut sink = HtmlBody::default();
        sink.set_body("<ul></ul>".to_string());

        let response = sink.into_response(false);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(response.headers()["Content-Length"], "9");
        assert_eq!(body_string(response).await, "<ul></ul>");
    }

    #[tokio::test]
    async fn test_unset_sink_is_empty_page() {
        let response = HtmlBody::default().into_response(false);
        assert_eq!(response.headers()["Content-Length"], "0");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let response = build_html_response("hello".to_string(), true);
        assert_eq!(response.headers()["Content-Length"], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_500_response().status(), 500);
        let not_allowed = build_405_response();
        assert_eq!(not_allowed.status(), 405);
        assert_eq!(not_allowed.headers()["Allow"], ALLOW);
    }

    #[test]
    fn test_options_cors() {
        let plain = build_options_response(false);
        assert_eq!(plain.status(), 204);
        assert!(plain.headers().get("Access-Control-Allow-Origin").is_none());

        let cors = build_options_response(true);
        assert_eq!(cors.headers()["Access-Control-Allow-Origin"], "*");
    }
}
