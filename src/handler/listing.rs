//! Listing page serving
//!
//! Wires the request's session and the shared filesystem into the renderer
//! and turns the outcome into an HTTP response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SET_COOKIE};
use hyper::Response;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, HtmlBody};
use crate::listing::{render_listing, ListingOptions};
use crate::logger;
use crate::session::build_session_cookie;

/// Serve the listing configured for the matched route
pub fn serve_listing(
    ctx: &RequestContext<'_>,
    options: &ListingOptions,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let lookup = state.sessions.get_or_create(ctx.session_id.as_deref());
    if lookup.created {
        logger::log_debug(&format!("Created session {} for {}", lookup.session.id(), ctx.path));
    }

    let mut body = HtmlBody::default();
    if let Err(e) = render_listing(options, &state.filesystem, &lookup.session, &mut body) {
        logger::log_error(&format!("Listing for '{}' failed: {e}", ctx.path));
        return http::build_500_response();
    }

    let mut response = body.into_response(ctx.is_head);

    if lookup.created {
        let cookie = build_session_cookie(&state.config.sessions.cookie_name, lookup.session.id());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => logger::log_warning(&format!("Invalid session cookie '{cookie}': {e}")),
        }
    }

    response
}
