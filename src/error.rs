use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache file {path} is not a valid snapshot: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("selector error: {0}")]
    Selector(String),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read theater list {path}: {source}")]
    TheatersIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theater list {path}: {source}")]
    TheatersJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("theater list {0} is empty")]
    NoTheaters(PathBuf),
    #[error("invalid time of day {0:?}, expected HH:MM")]
    TimeOfDay(String),
}
