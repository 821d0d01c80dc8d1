//! Session module
//!
//! In-memory, cookie-keyed sessions. A request presenting an unknown or
//! expired session cookie gets a fresh session; idle sessions expire after
//! the configured timeout. Nothing is persisted across restarts.

mod cookie;
mod store;

pub use cookie::{build_session_cookie, parse_cookie};
pub use store::{Session, SessionLookup, SessionStore};
