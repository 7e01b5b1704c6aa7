//! Persistent key-value storage
/// JSON document on disk
mod file;
/// Process-local map
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Keys the application persists.
pub mod keys {
    /// Selected language code
    pub const LANGUAGE: &str = "language";
    /// Selected theme id
    pub const THEME: &str = "theme";
    /// JSON object: language code → partial dictionary
    pub const TRANSLATIONS_CACHE: &str = "translations-cache";

    pub const ALL: [&str; 3] = [LANGUAGE, THEME, TRANSLATIONS_CACHE];
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read storage at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage document at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage shared by the language and theme providers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// Underlying storage could not be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Underlying storage could not be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    /// Underlying storage could not be written.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
