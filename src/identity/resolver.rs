use crate::fingerprint::{SignalSource, SystemSignals, derive_identity};
use crate::identity::types::{
    DEVICE_CREATED_KEY, DEVICE_ID_KEY, DeviceIdentity, is_valid_device_id,
};
use crate::storage::{StorageBackend, standard_backends};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::Path;

/// What a single backend currently holds, for diagnostics
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum BackendState {
    Holds(String),
    Empty,
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub backend: String,
    pub state: BackendState,
}

/// Resolves the device identifier against an ordered chain of storage backends.
///
/// Lookups walk the backends in priority order and take the first hit; the
/// last resolved identity is also kept in memory and consulted after every
/// backend, so the identifier stays stable even if all storage is blocked.
/// None of the operations ever fail: backend errors are logged and skipped.
pub struct DeviceIdentityResolver {
    backends: Vec<Box<dyn StorageBackend>>,
    signals: Box<dyn SignalSource>,
    memory: Mutex<Option<DeviceIdentity>>,
}

impl DeviceIdentityResolver {
    pub fn new(backends: Vec<Box<dyn StorageBackend>>, signals: Box<dyn SignalSource>) -> Self {
        Self {
            backends,
            signals,
            memory: Mutex::new(None),
        }
    }

    /// Durable store, session store and cookie jar under `data_dir`, fingerprinting
    /// the running system
    pub fn standard(data_dir: impl AsRef<Path>) -> Self {
        Self::new(standard_backends(data_dir), Box::new(SystemSignals))
    }

    /// Return the existing identifier, or derive and persist a new one
    pub fn resolve(&self) -> String {
        self.identity().id
    }

    /// Like [`resolve`](Self::resolve) but returns the full identity
    pub fn identity(&self) -> DeviceIdentity {
        let identity = match self.lookup() {
            Some(identity) => {
                tracing::debug!("Using existing device ID: {}", identity.id);
                identity
            }
            None => {
                let identity = derive_identity(self.signals.as_ref());
                tracing::info!(source = %identity.source, "Generated new device ID: {}", identity.id);
                identity
            }
        };

        self.persist(&identity);
        *self.memory.lock() = Some(identity.clone());
        identity
    }

    /// Look the identifier up without ever deriving or writing one
    pub fn peek(&self) -> Option<String> {
        self.lookup().map(|identity| identity.id)
    }

    /// Remove the identifier from every backend. Failures are logged and ignored.
    pub fn reset(&self) {
        for backend in &self.backends {
            for key in [DEVICE_ID_KEY, DEVICE_CREATED_KEY] {
                if let Err(e) = backend.remove(key) {
                    tracing::warn!(backend = backend.name(), "Failed to remove {}: {}", key, e);
                }
            }
        }
        *self.memory.lock() = None;
        tracing::info!("Device ID cleared");
    }

    /// Per-backend view of where the identifier is currently stored
    pub fn backend_report(&self) -> Vec<BackendStatus> {
        self.backends
            .iter()
            .map(|backend| BackendStatus {
                backend: backend.name().to_string(),
                state: match backend.get(DEVICE_ID_KEY) {
                    Ok(Some(id)) => BackendState::Holds(id),
                    Ok(None) => BackendState::Empty,
                    Err(e) => BackendState::Unavailable(e.to_string()),
                },
            })
            .collect()
    }

    fn lookup(&self) -> Option<DeviceIdentity> {
        let remembered = self.memory.lock().clone();

        for backend in &self.backends {
            match backend.get(DEVICE_ID_KEY) {
                Ok(Some(id)) if is_valid_device_id(&id) => {
                    let created_at = self
                        .stored_created_at()
                        .or_else(|| {
                            remembered
                                .as_ref()
                                .filter(|m| m.id == id)
                                .map(|m| m.created_at)
                        })
                        .unwrap_or_else(Utc::now);
                    return Some(DeviceIdentity::restored(id, created_at));
                }
                Ok(Some(id)) => {
                    tracing::warn!(backend = backend.name(), "Ignoring malformed device ID {:?}", id);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(backend = backend.name(), "Storage read failed: {}", e);
                }
            }
        }

        remembered
    }

    fn stored_created_at(&self) -> Option<DateTime<Utc>> {
        self.backends
            .iter()
            .filter(|backend| backend.stores_metadata())
            .find_map(|backend| backend.get(DEVICE_CREATED_KEY).ok().flatten())
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Write `identity` to every backend that does not already hold it
    fn persist(&self, identity: &DeviceIdentity) {
        let created_at = identity.created_at.to_rfc3339();

        for backend in &self.backends {
            let mut writes = vec![(DEVICE_ID_KEY, identity.id.as_str())];
            if backend.stores_metadata() {
                writes.push((DEVICE_CREATED_KEY, created_at.as_str()));
            }

            for (key, value) in writes {
                if let Ok(Some(current)) = backend.get(key) {
                    if current == value {
                        continue;
                    }
                }
                if let Err(e) = backend.set(key, value) {
                    tracing::warn!(backend = backend.name(), "Failed to persist {}: {}", key, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, UnilinkError};
    use crate::fingerprint::{EnvironmentSignals, FixedSignals};
    use crate::identity::IdentitySource;
    use crate::storage::{CookieJar, DurableStore, SessionStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Backend that rejects every operation, like storage disabled in privacy mode
    struct BlockedStore;

    impl StorageBackend for BlockedStore {
        fn name(&self) -> &str {
            "blocked"
        }

        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(UnilinkError::storage("blocked", "access denied"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(UnilinkError::storage("blocked", "quota exceeded"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(UnilinkError::storage("blocked", "access denied"))
        }
    }

    /// Lets a test keep a handle on a backend it also hands to the resolver
    struct Shared<T>(Arc<T>);

    impl<T: StorageBackend> StorageBackend for Shared<T> {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }

        fn stores_metadata(&self) -> bool {
            self.0.stores_metadata()
        }
    }

    fn signals() -> Box<dyn SignalSource> {
        Box::new(FixedSignals::new(EnvironmentSignals {
            user_agent: Some("Mozilla/5.0 (Linux; Android 14)".to_string()),
            language: Some("en-NG".to_string()),
            screen: Some("412x915".to_string()),
            platform: Some("Linux armv8l".to_string()),
            timezone_offset_minutes: Some(60),
            hardware_concurrency: Some(8),
            render_signature: None,
        }))
    }

    fn standard_resolver(dir: &TempDir) -> DeviceIdentityResolver {
        DeviceIdentityResolver::new(standard_backends(dir.path()), signals())
    }

    fn is_plain_device_id(id: &str) -> bool {
        id.strip_prefix("DEV-")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
    }

    #[test]
    fn test_fresh_environment_lifecycle() {
        let dir = TempDir::new().unwrap();
        let resolver = standard_resolver(&dir);
        assert_eq!(resolver.peek(), None);

        let first = resolver.resolve();
        assert!(is_plain_device_id(&first), "unexpected id {}", first);

        let second = resolver.resolve();
        assert_eq!(first, second);

        resolver.reset();
        assert_eq!(resolver.peek(), None);
    }

    #[test]
    fn test_peek_never_writes() {
        let dir = TempDir::new().unwrap();
        let resolver = standard_resolver(&dir);

        assert_eq!(resolver.peek(), None);
        assert!(
            resolver
                .backend_report()
                .iter()
                .all(|status| status.state == BackendState::Empty)
        );
    }

    #[test]
    fn test_resolve_writes_every_backend() {
        let dir = TempDir::new().unwrap();
        let resolver = standard_resolver(&dir);
        let id = resolver.resolve();

        for status in resolver.backend_report() {
            assert_eq!(status.state, BackendState::Holds(id.clone()), "{}", status.backend);
        }

        let durable = DurableStore::in_dir(dir.path());
        assert!(durable.get(DEVICE_CREATED_KEY).unwrap().is_some());
        let jar = CookieJar::in_dir(dir.path());
        assert_eq!(jar.get(DEVICE_CREATED_KEY).unwrap(), None);
    }

    #[test]
    fn test_existing_id_in_one_backend_is_copied_unchanged() {
        let dir = TempDir::new().unwrap();
        CookieJar::in_dir(dir.path())
            .set(DEVICE_ID_KEY, "DEV-FROMCOOKIE")
            .unwrap();

        let resolver = standard_resolver(&dir);
        assert_eq!(resolver.resolve(), "DEV-FROMCOOKIE");

        for status in resolver.backend_report() {
            assert_eq!(status.state, BackendState::Holds("DEV-FROMCOOKIE".to_string()));
        }
    }

    #[test]
    fn test_priority_order_first_hit_wins() {
        let durable = Arc::new(SessionStore::new());
        let cookie = Arc::new(SessionStore::new());
        durable.set(DEVICE_ID_KEY, "DEV-FIRST").unwrap();
        cookie.set(DEVICE_ID_KEY, "DEV-SECOND").unwrap();

        let resolver = DeviceIdentityResolver::new(
            vec![Box::new(Shared(durable.clone())), Box::new(Shared(cookie.clone()))],
            signals(),
        );

        assert_eq!(resolver.peek(), Some("DEV-FIRST".to_string()));
        assert_eq!(resolver.resolve(), "DEV-FIRST");
        assert_eq!(cookie.get(DEVICE_ID_KEY).unwrap(), Some("DEV-FIRST".to_string()));
    }

    #[test]
    fn test_blocked_durable_store_degrades() {
        let dir = TempDir::new().unwrap();
        let resolver = DeviceIdentityResolver::new(
            vec![
                Box::new(BlockedStore),
                Box::new(SessionStore::new()),
                Box::new(CookieJar::in_dir(dir.path())),
            ],
            signals(),
        );

        let id = resolver.resolve();
        assert!(id.starts_with("DEV-"));
        assert_eq!(resolver.resolve(), id);

        let report = resolver.backend_report();
        assert!(matches!(report[0].state, BackendState::Unavailable(_)));
        assert_eq!(report[2].state, BackendState::Holds(id));
    }

    #[test]
    fn test_all_backends_blocked_stays_stable_in_memory() {
        let resolver = DeviceIdentityResolver::new(
            vec![Box::new(BlockedStore), Box::new(BlockedStore)],
            Box::new(FixedSignals::unavailable()),
        );

        let id = resolver.resolve();
        assert!(id.starts_with("DEV-FALLBACK-"));
        assert_eq!(resolver.resolve(), id);
        assert_eq!(resolver.peek(), Some(id));

        resolver.reset();
        assert_eq!(resolver.peek(), None);
    }

    #[test]
    fn test_fallback_ids_are_unique_across_attempts() {
        let a = DeviceIdentityResolver::new(vec![], Box::new(FixedSignals::unavailable()));
        let b = DeviceIdentityResolver::new(vec![], Box::new(FixedSignals::unavailable()));

        let id_a = a.identity();
        let id_b = b.identity();
        assert_eq!(id_a.source, IdentitySource::FallbackRandom);
        assert_ne!(id_a.id, id_b.id);
    }

    #[test]
    fn test_reset_then_resolve_same_environment_regenerates_same_id() {
        let dir = TempDir::new().unwrap();
        let resolver = standard_resolver(&dir);

        let before = resolver.resolve();
        resolver.reset();
        assert_eq!(resolver.peek(), None);
        assert!(
            resolver
                .backend_report()
                .iter()
                .all(|status| status.state == BackendState::Empty)
        );

        assert_eq!(resolver.resolve(), before);
    }

    #[test]
    fn test_reset_swallows_backend_failures() {
        let dir = TempDir::new().unwrap();
        let resolver = DeviceIdentityResolver::new(
            vec![Box::new(BlockedStore), Box::new(DurableStore::in_dir(dir.path()))],
            signals(),
        );
        resolver.resolve();
        resolver.reset();
        assert_eq!(resolver.peek(), None);
    }

    #[test]
    fn test_identity_survives_restart() {
        let dir = TempDir::new().unwrap();
        let first = standard_resolver(&dir).identity();

        // New process: fresh session store, same files on disk, different signals
        let restarted = DeviceIdentityResolver::new(
            standard_backends(dir.path()),
            Box::new(FixedSignals::unavailable()),
        );
        let second = restarted.identity();

        assert_eq!(second.id, first.id);
        assert_eq!(second.source, IdentitySource::Fingerprint);
        assert_eq!(
            second.created_at.timestamp_millis(),
            first.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_malformed_stored_value_is_ignored() {
        let dir = TempDir::new().unwrap();
        DurableStore::in_dir(dir.path())
            .set(DEVICE_ID_KEY, "not-a-device-id")
            .unwrap();

        let resolver = standard_resolver(&dir);
        assert_eq!(resolver.peek(), None);

        let id = resolver.resolve();
        assert!(is_plain_device_id(&id));
        assert_eq!(
            DurableStore::in_dir(dir.path()).get(DEVICE_ID_KEY).unwrap(),
            Some(id)
        );
    }
}
