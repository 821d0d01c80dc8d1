// Configuration module entry point
// Loads configuration from file and environment, and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, FilesConfig, HealthConfig, HttpConfig, ListingRoute, LoggingConfig, PerformanceConfig,
    RoutesConfig, ServerConfig, SessionsConfig,
};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// A missing file is not an error; defaults and `DIRLIST_*` environment
    /// variables (`DIRLIST_SERVER__PORT=9000`) still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DIRLIST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "dirlist/0.1")?
            .set_default("http.enable_cors", false)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Whether debug lines should be written
    pub fn debug_enabled(&self) -> bool {
        self.logging.level.eq_ignore_ascii_case("debug")
            || self.logging.level.eq_ignore_ascii_case("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingOptions;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that read or set DIRLIST_* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(cfg.performance.read_timeout, 30);
        assert_eq!(cfg.sessions.cookie_name, "session");
        assert_eq!(cfg.files.root, ".");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.listings.len(), 1);
        assert_eq!(cfg.routes.listings[0].path, "/");
        assert_eq!(cfg.routes.listings[0].options, ListingOptions::default());
    }

    #[test]
    fn test_load_listing_routes_from_file() {
        let _env = lock_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dirlist.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9090

[files]
root = "/srv/www"

[[routes.listings]]
path = "/files"
folder = "uploads"
replace = "/static/"
ignored = "yes"

[[routes.listings]]
path = "/plain"
recursive = true
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.files.root, "/srv/www");

        let listings = cfg.routes.listing_map();
        assert_eq!(listings.len(), 2);

        let files = &listings["/files"];
        assert_eq!(files.folder, "uploads");
        assert_eq!(files.replace, "/static/");

        let plain = &listings["/plain"];
        assert_eq!(plain.folder, "public");
        assert_eq!(plain.replace, "");
    }

    #[test]
    fn test_route_paths_keep_case_and_dots() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dirlist.toml");
        fs::write(
            &path,
            r#"
[[routes.listings]]
path = "/Docs"
folder = "Docs"

[[routes.listings]]
path = "/v1.2"
folder = "releases/v1.2"
"#,
        )
        .unwrap();

        let listings = Config::load_from(path.to_str().unwrap()).unwrap().routes.listing_map();
        assert_eq!(listings["/Docs"].folder, "Docs");
        assert_eq!(listings["/v1.2"].folder, "releases/v1.2");
        assert!(!listings.contains_key("/docs"));
    }

    #[test]
    fn test_later_route_with_same_path_wins() {
        let mut routes = RoutesConfig::default();
        routes.listings.push(ListingRoute {
            path: "/".to_string(),
            options: ListingOptions {
                folder: "other".to_string(),
                replace: String::new(),
            },
        });
        assert_eq!(routes.listing_map()["/"].folder, "other");
    }

    #[test]
    fn test_environment_overrides_port() {
        let _env = lock_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");

        std::env::set_var("DIRLIST_SERVER__PORT", "9000");
        let cfg = Config::load_from(path.to_str().unwrap());
        std::env::remove_var("DIRLIST_SERVER__PORT");

        assert_eq!(cfg.unwrap().server.port, 9000);
    }

    #[test]
    fn test_socket_addr() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        cfg.server.host = "0.0.0.0".to_string();
        cfg.server.port = 8081;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8081);

        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
