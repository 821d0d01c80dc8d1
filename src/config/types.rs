// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::listing::ListingOptions;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
}

/// Where logical folder names are resolved
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    /// Root directory; listing folders are looked up below it
    #[serde(default = "default_files_root")]
    pub root: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_files_root() -> String {
    ".".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: default_files_root(),
        }
    }
}

/// Session cookie and lifetime
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionsConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Idle time after which a session is discarded
    #[serde(default = "default_session_timeout")]
    pub timeout_secs: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_cookie_name() -> String {
    "session".to_string()
}

const fn default_session_timeout() -> u64 {
    3600
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            timeout_secs: default_session_timeout(),
        }
    }
}

/// Routes configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Listing routes, matched by exact request path
    #[serde(default = "default_listings")]
    pub listings: Vec<ListingRoute>,
}

fn default_listings() -> Vec<ListingRoute> {
    vec![ListingRoute {
        path: "/".to_string(),
        options: ListingOptions::default(),
    }]
}

impl RoutesConfig {
    /// Index listing routes by path; a later route wins over an earlier one with the same path
    pub fn listing_map(&self) -> HashMap<String, ListingOptions> {
        self.listings
            .iter()
            .map(|route| (route.path.clone(), route.options.clone()))
            .collect()
    }
}

/// One listing route
///
/// The path is a value rather than a table key so its case is kept.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ListingRoute {
    /// Exact request path (e.g., "/files")
    pub path: String,
    #[serde(flatten)]
    pub options: ListingOptions,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            health: HealthConfig::default(),
            listings: default_listings(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable the liveness endpoint
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub path: String,
}

const fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            path: default_healthz_path(),
        }
    }
}
