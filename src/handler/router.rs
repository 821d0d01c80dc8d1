//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation, route matching, and dispatching.

use crate::config::AppState;
use crate::handler::listing;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::session::parse_cookie;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub is_head: bool,
    /// Value of the session cookie, if the client sent one
    pub session_id: Option<String>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a Method, path: &'a str, headers: &HeaderMap, cookie_name: &str) -> Self {
        let session_id = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|header| parse_cookie(header, cookie_name))
            .map(ToString::to_string);

        Self {
            method,
            path,
            is_head: *method == Method::HEAD,
            session_id,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let ctx = RequestContext::new(method, uri.path(), req.headers(), &state.config.sessions.cookie_name);
    let mut response = route_request(&ctx, &state);

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(remote_addr.ip().to_string(), method.to_string(), uri.path().to_string());
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = format_version(req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_string(req.headers(), REFERER);
        entry.user_agent = header_string(req.headers(), USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method, path and configuration
pub fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(ctx.method, state.config.http.enable_cors) {
        return resp;
    }

    let routes = &state.config.routes;

    // 2. Health check endpoint
    if routes.health.enabled && ctx.path == routes.health.path {
        return http::build_health_response("ok");
    }

    // 3. Listing routes (exact match)
    match state.listing_for(ctx.path) {
        Some(options) => listing::serve_listing(ctx, options, state),
        None => http::build_404_response(),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn format_version(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ListingRoute};
    use crate::listing::ListingOptions;
    use http_body_util::BodyExt;
    use hyper::header::SET_COOKIE;
    use std::fs;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let mut config = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        config.files.root = dir.path().to_string_lossy().into_owned();
        config.logging.access_log = false;
        config.routes.listings.extend([
            listing_route("/static", "public", "/static/"),
            listing_route("/empty", "empty", ""),
            listing_route("/broken", "does-not-exist", ""),
            listing_route("/Docs", "public", ""),
        ]);

        (dir, AppState::new(&config))
    }

    fn listing_route(path: &str, folder: &str, replace: &str) -> ListingRoute {
        ListingRoute {
            path: path.to_string(),
            options: ListingOptions {
                folder: folder.to_string(),
                replace: replace.to_string(),
            },
        }
    }

    fn route(state: &AppState, method: &Method, path: &str, headers: &HeaderMap) -> Response<Full<Bytes>> {
        let ctx = RequestContext::new(method, path, headers, "session");
        route_request(&ctx, state)
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_listing_with_prefix() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::GET, "/static", &HeaderMap::new());

        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key(SET_COOKIE));
        let body = body_string(response).await;
        assert!(body.starts_with("Available Files:<br/><ul>"));
        assert!(body.contains("<li><a href='/static/a.txt'>/static/a.txt</a></li>"));
    }

    #[tokio::test]
    async fn test_session_id_is_rendered_and_reused() {
        let (_dir, state) = test_state();
        let first = route(&state, &Method::GET, "/empty", &HeaderMap::new());
        let set_cookie = first.headers()[SET_COOKIE].to_str().unwrap().to_string();
        let id = parse_cookie(&set_cookie, "session").unwrap().to_string();

        let body = body_string(first).await;
        assert_eq!(body, format!("Available Files:<br/><ul></ul><br/>Session: {id}"));

        let second = route(&state, &Method::GET, "/empty", &cookie_headers(&format!("session={id}")));
        assert!(!second.headers().contains_key(SET_COOKIE));
        assert!(body_string(second).await.ends_with(&format!("Session: {id}")));
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::HEAD, "/static", &HeaderMap::new());
        assert_eq!(response.status(), 200);
        assert_ne!(response.headers()["Content-Length"], "0");
        assert_eq!(body_string(response).await, "");
    }

    #[test]
    fn test_resolution_failure_is_500() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::GET, "/broken", &HeaderMap::new());
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_default_route_lists_public() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::GET, "/", &HeaderMap::new());
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn test_route_match_is_case_sensitive() {
        let (_dir, state) = test_state();
        assert_eq!(route(&state, &Method::GET, "/Docs", &HeaderMap::new()).status(), 200);
        assert_eq!(route(&state, &Method::GET, "/docs", &HeaderMap::new()).status(), 404);
    }

    #[test]
    fn test_unknown_path_is_404() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::GET, "/nope", &HeaderMap::new());
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_method_checks() {
        let (_dir, state) = test_state();
        assert_eq!(route(&state, &Method::POST, "/static", &HeaderMap::new()).status(), 405);
        assert_eq!(route(&state, &Method::OPTIONS, "/static", &HeaderMap::new()).status(), 204);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_health_probe() {
        let (_dir, state) = test_state();
        let response = route(&state, &Method::GET, "/healthz", &HeaderMap::new());
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, "ok");
    }

    #[test]
    fn test_context_reads_session_cookie() {
        let headers = cookie_headers("theme=dark; Session=abc");
        let ctx = RequestContext::new(&Method::HEAD, "/", &headers, "session");
        assert!(ctx.is_head);
        assert_eq!(ctx.session_id.as_deref(), Some("abc"));
    }
}
