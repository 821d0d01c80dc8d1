//! Directory listing module
//!
//! Renders the direct children of a configured folder as an HTML link list,
//! followed by the requesting session's id. The renderer only talks to its
//! collaborators through the traits defined here:
//! - [`FileSystem`] / [`Directory`]: resolve a logical folder and enumerate it
//! - [`SessionValues`]: read the `"id"` value of the current session
//! - [`ResponseSink`]: receive the finished body

mod error;
mod options;
mod render;

pub use error::ListingError;
pub use options::{ListingOptions, DEFAULT_FOLDER};
pub use render::{escape_html, render_listing, render_listing_body, SESSION_ID_KEY};

use std::collections::HashMap;

/// One direct child of a resolved directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    entity_name: String,
}

impl DirEntry {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
        }
    }

    /// Base name of the child, without any path separators
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }
}

/// Maps a logical folder name to an enumerable directory
pub trait FileSystem {
    type Dir: Directory;

    fn resolve(&self, logical_name: &str) -> Result<Self::Dir, ListingError>;
}

/// An enumerable directory handle
pub trait Directory {
    /// Direct children in the order the underlying store yields them
    fn list_children(&self) -> Result<Vec<DirEntry>, ListingError>;
}

/// Read access to a request-scoped session
pub trait SessionValues {
    fn get(&self, key: &str) -> Option<String>;
}

/// Destination of the rendered page
pub trait ResponseSink {
    fn set_body(&mut self, content: String);
}

impl SessionValues for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

// A request without a session reads every key as absent
impl<S: SessionValues> SessionValues for Option<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|session| session.get(key))
    }
}
