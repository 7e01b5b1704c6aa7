use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    KeyValueStore,
    StoreError,
};

/// Stored document: key → value.
type Document = BTreeMap<String, String>;

/// Store backed by a single JSON object on disk.
///
/// Every write rewrites the whole document through a temporary sibling file
/// and a rename, so a crash never leaves a half-written document behind.
#[derive(Debug)]
pub struct FileStore {
    /// Document path
    path: PathBuf,
    /// Serialises read-modify-write cycles
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file is an empty document.
    async fn read_document(&self) -> Result<Document, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Store file not found, starting empty");
                return Ok(Document::new());
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&content)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    async fn write_document(&self, document: &Document) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, content).await.map_err(write_error)?;
        tokio::fs::rename(&temp_path, &self.path).await.map_err(write_error)?;

        tracing::trace!(path = %self.path.display(), keys = document.len(), "Store written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_get_from_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("store.json"));

        assert_eq!(store.get("language").await.unwrap(), None);
    }

    #[googletest::test]
    #[tokio::test]
    async fn test_set_creates_parent_directories_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");
        let store = FileStore::new(&path);

        store.set("language", "ja").await.unwrap();
        store.set("theme", "dark").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("language").await.unwrap().as_deref(), Some("ja"));
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));

        let on_disk: Document = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        expect_that!(on_disk.len(), eq(2));
    }

    #[tokio::test]
    async fn test_remove_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("store.json"));
        store.set("language", "ko").await.unwrap();
        store.set("theme", "pinky").await.unwrap();

        store.remove("language").await.unwrap();
        store.remove("language").await.unwrap();

        assert_eq!(store.get("language").await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("pinky"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);

        let result = store.get("language").await;

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[googletest::test]
    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("store.json"));

        store.set("language", "es").await.unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        expect_that!(names, elements_are![eq("store.json")]);
    }
}
