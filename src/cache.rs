use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::Snapshot;
use crate::error::CacheError;

pub const NOT_FOUND_MESSAGE: &str = "Cache not found. Please trigger a refresh.";

/// What a cache read found. Serializes as the snapshot itself or as the
/// `{"error": ...}` sentinel clients get before the first refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead {
    Snapshot(Snapshot),
    NotFound,
}

impl Serialize for CacheRead {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CacheRead::Snapshot(snapshot) => snapshot.serialize(serializer),
            CacheRead::NotFound => json!({ "error": NOT_FOUND_MESSAGE }).serialize(serializer),
        }
    }
}

/// Single-document JSON cache holding the latest snapshot.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the cached document with `snapshot`.
    pub async fn write(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let body = serde_json::to_vec(snapshot).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Each write gets its own temp file beside the target, then renames over it.
        // Readers see the old or the new document, and overlapping writers never share a file.
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || persist(&path, &body))
            .await
            .map_err(std::io::Error::other)
            .and_then(|r| r)
            .map_err(|source| self.io_error(source))
    }

    pub async fn read(&self) -> Result<CacheRead, CacheError> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CacheRead::NotFound),
            Err(source) => return Err(self.io_error(source)),
        };
        let snapshot = serde_json::from_slice(&body).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(CacheRead::Snapshot(snapshot))
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn persist(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
