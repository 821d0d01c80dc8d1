//! Request handler module
//!
//! Responsible for request routing dispatch and serving listing pages.

pub mod listing;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, route_request, RequestContext};
