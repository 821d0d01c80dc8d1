use thiserror::Error;

/// Failure to resolve or enumerate the configured folder
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("folder not found: '{0}'")]
    NotFound(String),

    #[error("not a directory: '{0}'")]
    NotADirectory(String),

    #[error("illegal path: \"{0}\"")]
    IllegalPath(String),

    #[error("failed to read folder '{folder}': {source}")]
    Io {
        folder: String,
        #[source]
        source: std::io::Error,
    },
}
