use crate::error::Result;

/// Key/value storage abstraction for persisting the device identifier.
///
/// Every operation may fail when the underlying mechanism is disabled or
/// full. Callers treat such failures as "backend unavailable" and move on to
/// the next backend.
pub trait StorageBackend: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether this backend keeps auxiliary keys besides the identifier itself
    fn stores_metadata(&self) -> bool {
        true
    }
}
