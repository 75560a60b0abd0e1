//! Admin session persistence and authentication state
//!
//! Authentication is remembered through a single flag in a durable
//! key-value store, read back at face value on startup. This is the
//! product's acknowledged development-mode bypass: no token, no expiry,
//! and no backend validation.

use pixelmuse_core::types::{ADMIN_SESSION_ACTIVE, ADMIN_SESSION_KEY};
use pixelmuse_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Durable client-side key-value storage
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

/// [`SessionStore`] persisted as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by `session.json` inside `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("session.json"),
        })
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::SessionStorage(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| Error::SessionStorage(e.to_string()))
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(entries).map_err(|e| Error::SessionStorage(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| Error::SessionStorage(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
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

/// In-memory [`SessionStore`] for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| Error::SessionStorage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::SessionStorage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::SessionStorage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Snapshot of the authentication state machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthState {
    /// Whether the persisted flag is still being resolved
    pub loading: bool,

    /// `None` until initialization completes, then the resolved answer
    pub authenticated: Option<bool>,
}

/// Admin authentication over a [`SessionStore`]
///
/// Initialization reads the persisted flag and trusts it at face value;
/// a store failure degrades to unauthenticated rather than staying
/// pending.
pub struct AdminAuth {
    store: Arc<dyn SessionStore>,
    state: AuthState,
}

impl AdminAuth {
    /// Create an uninitialized auth component in its loading phase
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: AuthState {
                loading: true,
                authenticated: None,
            },
        }
    }

    /// Resolve the persisted flag into an authentication answer
    ///
    /// Always exits the loading phase, even when the store read fails;
    /// failures are logged and degrade to unauthenticated.
    pub fn initialize(&mut self) {
        let authenticated = match self.store.read(ADMIN_SESSION_KEY) {
            Ok(Some(value)) => value == ADMIN_SESSION_ACTIVE,
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read admin session flag: {e}");
                false
            }
        };

        self.state.authenticated = Some(authenticated);
        self.state.loading = false;
    }

    /// Persist the session flag and mark the session authenticated
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be written; the in-memory state
    /// is left untouched in that case.
    pub fn log_in(&mut self) -> Result<()> {
        self.store.write(ADMIN_SESSION_KEY, ADMIN_SESSION_ACTIVE)?;
        self.state.authenticated = Some(true);
        self.state.loading = false;
        Ok(())
    }

    /// Clear the persisted flag and mark the session unauthenticated
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be removed; the in-memory state
    /// is still marked unauthenticated.
    pub fn clear(&mut self) -> Result<()> {
        let result = self.store.remove(ADMIN_SESSION_KEY);
        self.state.authenticated = Some(false);
        self.state.loading = false;
        result
    }

    /// Override the in-memory answer without touching the store
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.state.authenticated = Some(authenticated);
        self.state.loading = false;
    }

    /// Current state snapshot
    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    /// Whether initialization is still pending
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    /// Whether the session is authenticated; `false` while loading
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.state.authenticated.unwrap_or(false)
    }
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Store whose every operation fails, for degradation tests
    struct FailingStore;

    impl SessionStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::SessionStorage("store unavailable".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::SessionStorage("store unavailable".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::SessionStorage("store unavailable".to_string()))
        }
    }

    #[test]
    fn test_starts_loading() {
        let auth = AdminAuth::new(Arc::new(MemorySessionStore::new()));
        assert!(auth.loading());
        assert_eq!(auth.state().authenticated, None);
        assert!(!auth.authenticated());
    }

    #[test]
    fn test_initialize_with_active_flag() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .write(ADMIN_SESSION_KEY, ADMIN_SESSION_ACTIVE)
            .expect("seed flag");

        let mut auth = AdminAuth::new(store);
        auth.initialize();

        assert!(!auth.loading());
        assert_eq!(auth.state().authenticated, Some(true));
    }

    #[test]
    fn test_initialize_with_absent_flag() {
        let mut auth = AdminAuth::new(Arc::new(MemorySessionStore::new()));
        auth.initialize();

        assert!(!auth.loading());
        assert_eq!(auth.state().authenticated, Some(false));
    }

    #[test]
    fn test_initialize_with_unexpected_value() {
        let store = Arc::new(MemorySessionStore::new());
        store.write(ADMIN_SESSION_KEY, "yes").expect("seed flag");

        let mut auth = AdminAuth::new(store);
        auth.initialize();

        assert_eq!(auth.state().authenticated, Some(false));
    }

    #[test]
    fn test_initialize_degrades_on_store_failure() {
        let mut auth = AdminAuth::new(Arc::new(FailingStore));
        auth.initialize();

        assert!(!auth.loading());
        assert_eq!(auth.state().authenticated, Some(false));
    }

    #[test]
    fn test_log_in_persists_flag() {
        let store = Arc::new(MemorySessionStore::new());
        let mut auth = AdminAuth::new(Arc::clone(&store) as Arc<dyn SessionStore>);

        auth.log_in().expect("log in");
        assert!(auth.authenticated());
        assert_eq!(
            store.read(ADMIN_SESSION_KEY).expect("read flag"),
            Some(ADMIN_SESSION_ACTIVE.to_string())
        );
    }

    #[test]
    fn test_clear_removes_flag() {
        let store = Arc::new(MemorySessionStore::new());
        let mut auth = AdminAuth::new(Arc::clone(&store) as Arc<dyn SessionStore>);

        auth.log_in().expect("log in");
        auth.clear().expect("clear");

        assert!(!auth.authenticated());
        assert_eq!(store.read(ADMIN_SESSION_KEY).expect("read flag"), None);
    }

    #[test]
    fn test_set_authenticated_override() {
        let mut auth = AdminAuth::new(Arc::new(MemorySessionStore::new()));
        auth.set_authenticated(true);

        assert!(!auth.loading());
        assert!(auth.authenticated());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileSessionStore::new(dir.path()).expect("create store");

        assert_eq!(store.read(ADMIN_SESSION_KEY).expect("read"), None);

        store
            .write(ADMIN_SESSION_KEY, ADMIN_SESSION_ACTIVE)
            .expect("write");
        assert_eq!(
            store.read(ADMIN_SESSION_KEY).expect("read"),
            Some("true".to_string())
        );

        store.remove(ADMIN_SESSION_KEY).expect("remove");
        assert_eq!(store.read(ADMIN_SESSION_KEY).expect("read"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().expect("temp dir");

        {
            let store = FileSessionStore::new(dir.path()).expect("create store");
            store.write(ADMIN_SESSION_KEY, "true").expect("write");
        }

        let reopened = FileSessionStore::new(dir.path()).expect("reopen store");
        assert_eq!(
            reopened.read(ADMIN_SESSION_KEY).expect("read"),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_file_store_rejects_corrupt_contents() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileSessionStore::new(dir.path()).expect("create store");
        std::fs::write(dir.path().join("session.json"), "not json").expect("corrupt");

        let result = store.read(ADMIN_SESSION_KEY);
        assert!(matches!(result, Err(Error::SessionStorage(_))));

        // A corrupt store still resolves to unauthenticated
        let mut auth = AdminAuth::new(Arc::new(store));
        auth.initialize();
        assert_eq!(auth.state().authenticated, Some(false));
    }
}
