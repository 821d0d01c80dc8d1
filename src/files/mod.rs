//! Local filesystem collaborator
//!
//! Maps logical folder names onto directories below a fixed root. Names are
//! treated as relative to the root even when they start with `/` or `./`,
//! and any `..` component is rejected before touching the disk.

use crate::listing::{DirEntry, Directory, FileSystem, ListingError};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Filesystem rooted at a single directory
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join a logical name onto the root, refusing to leave it
    fn locate(&self, logical_name: &str) -> Result<PathBuf, ListingError> {
        let mut path = self.root.clone();
        for component in Path::new(logical_name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(ListingError::IllegalPath(logical_name.to_string()));
                }
            }
        }
        Ok(path)
    }
}

impl FileSystem for LocalFileSystem {
    type Dir = LocalDirectory;

    fn resolve(&self, logical_name: &str) -> Result<LocalDirectory, ListingError> {
        let path = self.locate(logical_name)?;

        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ListingError::NotFound(logical_name.to_string()));
            }
            Err(e) => {
                return Err(ListingError::Io {
                    folder: logical_name.to_string(),
                    source: e,
                });
            }
        };

        if !metadata.is_dir() {
            return Err(ListingError::NotADirectory(logical_name.to_string()));
        }

        Ok(LocalDirectory {
            logical_name: logical_name.to_string(),
            path,
        })
    }
}

/// A resolved directory on the local disk
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    logical_name: String,
    path: PathBuf,
}

impl LocalDirectory {
    fn io_error(&self, source: io::Error) -> ListingError {
        ListingError::Io {
            folder: self.logical_name.clone(),
            source,
        }
    }
}

impl Directory for LocalDirectory {
    fn list_children(&self) -> Result<Vec<DirEntry>, ListingError> {
        let read_dir = std::fs::read_dir(&self.path).map_err(|e| self.io_error(e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| self.io_error(e))?;
            // Non-UTF-8 names are shown lossily rather than dropped
            entries.push(DirEntry::new(entry.file_name().to_string_lossy().into_owned()));
        }
        Ok(entries)
    }
}
