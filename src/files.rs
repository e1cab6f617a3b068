//! File resources served under `/files/{name}`.
//!
//! Names are resolved beneath a single base directory. Only plain path
//! components are accepted, so `..`, `.`, and absolute names never reach the
//! filesystem. Symlinks inside the base directory are followed as-is.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A directory that `/files/` requests read from and write into.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request name onto a path inside the base directory.
    ///
    /// # Example
    ///
    /// ```
    /// # use plainhttp::files::FileStore;
    /// let store = FileStore::new("/srv/data");
    /// assert_eq!(store.resolve("a/b.txt").unwrap(), std::path::Path::new("/srv/data/a/b.txt"));
    /// assert!(store.resolve("../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let mut relative = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                _ => return Err(FileError::InvalidName(name.to_string())),
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(FileError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Reads the whole file as raw bytes.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FileError::NotFound(path)),
            Err(source) => Err(FileError::Io { path, source }),
        }
    }

    /// Creates or truncates the file and writes `contents` to it.
    ///
    /// Parent directories are not created.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| FileError::Io { path, source })
    }
}
