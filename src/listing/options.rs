// Listing options
// The two per-route settings the renderer understands

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Folder listed when no `folder` option is given
pub const DEFAULT_FOLDER: &str = "public";

/// Per-invocation listing configuration
///
/// Unknown keys are ignored, both when deserializing and in [`ListingOptions::from_map`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Logical folder name, resolved by the filesystem collaborator
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Prefix prepended to every entry name in the emitted links
    #[serde(default)]
    pub replace: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            replace: String::new(),
        }
    }
}

impl ListingOptions {
    /// Build options from a loose string map
    pub fn from_map(options: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            folder: options.get("folder").cloned().unwrap_or(defaults.folder),
            replace: options.get("replace").cloned().unwrap_or(defaults.replace),
        }
    }
}
