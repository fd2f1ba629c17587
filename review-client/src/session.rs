//! Session state and token storage
//!
//! A [`Session`] owns the bearer token for one signed-in user and is shared by
//! every request made through a [`crate::ReviewClient`]. The token is kept in a
//! [`TokenStore`] so it survives between runs.
//!
//! When the backend answers 401 the client calls [`Session::expire`], which
//! clears the stored token and tells the [`SessionListener`] to send the user
//! back to login. That notification fires once per expiry, however many
//! in-flight requests come back unauthorized.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Persistent storage for the bearer token
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the stored token
    fn save(&self, token: &str) -> io::Result<()>;

    /// Remove the stored token; succeeds when nothing is stored
    fn clear(&self) -> io::Result<()>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn load(&self) -> io::Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        (**self).save(token)
    }

    fn clear(&self) -> io::Result<()> {
        (**self).clear()
    }
}

/// Receives session lifecycle notifications
pub trait SessionListener: Send + Sync {
    /// The backend rejected the session; the user must log in again
    fn on_session_expired(&self);
}

/// Token store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::new(token.into()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<SecretString>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot().as_ref().map(|token| token.expose_secret().clone()))
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot() = Some(SecretString::new(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Token store backed by a single file
///
/// The file holds the raw token. On Unix it is written with owner-only
/// permissions.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten a pre-existing file before writing
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(token.as_bytes())
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

enum SessionState {
    Anonymous,
    Active(SecretString),
    Expired,
}

/// Authentication context shared by all requests of a client
pub struct Session {
    store: Box<dyn TokenStore>,
    state: RwLock<SessionState>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl Session {
    /// Create an anonymous session over the given store
    ///
    /// Anything already in the store is ignored; use [`Session::restore`] to
    /// pick up a saved token.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            state: RwLock::new(SessionState::Anonymous),
            listener: None,
        }
    }

    /// Create a session from the token saved in the store, if any
    pub fn restore(store: impl TokenStore + 'static) -> Result<Self> {
        let token = store.load()?;
        let session = Self::new(store);
        if let Some(token) = token {
            debug!("Restored saved session token");
            *session.write_state() = SessionState::Active(SecretString::new(token));
        }
        Ok(session)
    }

    /// Anonymous session that is never persisted
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Attach the listener notified on session expiry
    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Option<SecretString> {
        match &*self.read_state() {
            SessionState::Active(token) => Some(SecretString::new(token.expose_secret().clone())),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read_state(), SessionState::Active(_))
    }

    /// Whether the backend ended this session and no new login happened since
    pub fn is_expired(&self) -> bool {
        matches!(*self.read_state(), SessionState::Expired)
    }

    /// Store a freshly issued token and mark the session active
    pub fn sign_in(&self, token: &str) -> Result<()> {
        self.store.save(token)?;
        *self.write_state() = SessionState::Active(SecretString::new(token.to_string()));
        info!("Signed in");
        Ok(())
    }

    /// Drop the token at the user's request
    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        *self.write_state() = SessionState::Anonymous;
        info!("Signed out");
        Ok(())
    }

    /// End the session after the backend rejected it
    ///
    /// Returns `true` if this call performed the transition (and notified the
    /// listener), `false` if the session was already expired.
    pub fn expire(&self) -> bool {
        {
            let mut state = self.write_state();
            if matches!(*state, SessionState::Expired) {
                return false;
            }
            *state = SessionState::Expired;
        }

        warn!("Session expired, clearing stored credentials");
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored token: {}", e);
        }

        if let Some(listener) = &self.listener {
            listener.on_session_expired();
        }

        true
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.read_state() {
            SessionState::Anonymous => "anonymous",
            SessionState::Active(_) => "active",
            SessionState::Expired => "expired",
        };
        f.debug_struct("Session")
            .field("state", &state)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
