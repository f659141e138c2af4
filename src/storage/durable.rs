use crate::error::Result;
use crate::storage::traits::StorageBackend;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DURABLE_STORE_FILE: &str = "local_storage.json";

/// Durable key/value store backed by a JSON file; survives restarts
#[derive(Clone, Debug)]
pub struct DurableStore {
    path: PathBuf,
}

impl DurableStore {
    /// Store living at `<dir>/local_storage.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(DURABLE_STORE_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a crash never leaves a truncated file behind
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for DurableStore {
    fn name(&self) -> &str {
        "durable"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_new_instance() {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::in_dir(dir.path());
        store.set("unilink_device_id", "DEV-ABC").unwrap();

        let reopened = DurableStore::in_dir(dir.path());
        assert_eq!(
            reopened.get("unilink_device_id").unwrap(),
            Some("DEV-ABC".to_string())
        );
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::in_dir(dir.path().join("nested"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.remove("anything").is_ok());
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::in_dir(dir.path());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::in_dir(dir.path());
        std::fs::write(store.path(), b"not json").unwrap();

        assert!(store.get("a").is_err());
        assert!(store.set("a", "1").is_err());
    }
}
