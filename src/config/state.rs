// Application state module
// Holds the collaborators shared by every request

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use super::types::Config;
use crate::files::LocalFileSystem;
use crate::listing::ListingOptions;
use crate::session::SessionStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub filesystem: LocalFileSystem,
    pub sessions: SessionStore,
    /// Listing routes keyed by exact request path
    pub listing_routes: HashMap<String, ListingOptions>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            filesystem: LocalFileSystem::new(Path::new(&config.files.root)),
            sessions: SessionStore::new(Duration::from_secs(config.sessions.timeout_secs)),
            listing_routes: config.routes.listing_map(),
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }

    /// Options for the listing served at `path`, if any
    pub fn listing_for(&self, path: &str) -> Option<&ListingOptions> {
        self.listing_routes.get(path)
    }
}
