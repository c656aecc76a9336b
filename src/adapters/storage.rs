use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_storage_key;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stores each key as `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key("storage.key", key)?;
        Ok(Path::new(&self.base_path).join(format!("{}.json", key)))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.entry_path(key)?;
        match tokio::fs::read_to_string(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.entry_path(key)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, value).await?;
        Ok(())
    }
}

/// In-process store, lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub async fn snapshot(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        entries.get(key).cloned()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert_eq!(storage.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_local_storage_overwrites_whole_document() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.set("cart", "[1,2,3]").await.unwrap();
        storage.set("cart", "[]").await.unwrap();

        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[]"));
        assert!(base.join("cart.json").exists());
    }

    #[tokio::test]
    async fn test_local_storage_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.set("../escape", "[]").await.is_err());
        assert!(storage.get("a/b").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_shares_state_between_clones() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        clone.set("cart", "[]").await.unwrap();

        assert_eq!(storage.snapshot("cart").await.as_deref(), Some("[]"));
        assert_eq!(storage.get("other").await.unwrap(), None);
    }
}
