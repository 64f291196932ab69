//! The session store: the single owner of the client's login state.
//!
//! Everything that needs to know who is logged in asks the store; nothing
//! reads storage keys directly. The store keeps an in-memory copy of the
//! session and mirrors every change to [`Storage`].
//!
//! # Lifecycle
//!
//! ```text
//!  startup ──→ hydrate() ──→ [anonymous] ──commit()──→ [authenticated]
//!                  │                                         │
//!                  └────────→ [authenticated] ←──────────────┘
//!                                  │
//!                     logout / auth failure ──→ clear() ──→ [anonymous]
//! ```
//!
//! There is no expiry check here. A stale token stays until the server
//! rejects it and the caller clears the store.

use crate::{Role, Session, SessionError, Storage, StorageKeys};

/// Owns the current [`Session`] and keeps it in sync with [`Storage`].
pub struct SessionStore<S: Storage> {
    storage: S,
    current: Option<Session>,
}

impl<S: Storage> SessionStore<S> {
    /// Wraps `storage`. The store starts anonymous; call
    /// [`hydrate`](Self::hydrate) to pick up a persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Loads the persisted session (if any) into memory.
    ///
    /// No token means no session. A token whose role is missing or
    /// unrecognised can't be gated safely, so the keys are cleared and
    /// the store stays anonymous.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if clearing a corrupt session fails.
    pub fn hydrate(&mut self) -> Result<Option<&Session>, SessionError> {
        self.current = None;

        let Some(token) = non_empty(self.storage.get(StorageKeys::TOKEN)) else {
            tracing::debug!("no persisted session");
            return Ok(None);
        };

        let role = match non_empty(self.storage.get(StorageKeys::ROLE)) {
            Some(raw) => raw.parse::<Role>(),
            None => Err(SessionError::UnknownRole(String::new())),
        };
        let role = match role {
            Ok(role) => role,
            Err(e) => {
                tracing::warn!(error = %e, "discarding persisted session with invalid role");
                self.clear()?;
                return Ok(None);
            }
        };

        let session = Session {
            token,
            role,
            user_id: non_empty(self.storage.get(StorageKeys::USER_ID)),
        };
        tracing::info!(%role, "session hydrated from storage");
        Ok(Some(&*self.current.insert(session)))
    }

    /// Persists `session` and makes it current. Last login wins: any
    /// previous session is replaced.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if storage rejects a write; the
    /// in-memory session is left unchanged in that case.
    pub fn commit(&mut self, session: Session) -> Result<&Session, SessionError> {
        self.storage.set(StorageKeys::TOKEN, &session.token)?;
        self.storage.set(StorageKeys::ROLE, session.role.as_str())?;
        match &session.user_id {
            Some(id) => self.storage.set(StorageKeys::USER_ID, id)?,
            None => self.storage.remove(StorageKeys::USER_ID)?,
        }

        tracing::info!(role = %session.role, "session committed");
        Ok(&*self.current.insert(session))
    }

    /// Forgets the session, in memory and in storage.
    ///
    /// Memory is reset first, so the client is anonymous even if a
    /// storage removal fails.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if a key can't be removed.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        let had_session = self.current.take().is_some();
        for key in StorageKeys::ALL {
            self.storage.remove(key)?;
        }
        if had_session {
            tracing::info!("session cleared");
        }
        Ok(())
    }

    /// The current session, if logged in.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    /// The current role, if logged in.
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|s| s.role)
    }

    /// Returns `true` if a session is loaded.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    fn store_with(entries: &[(&str, &str)]) -> SessionStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        for (k, v) in entries {
            storage.set(k, v).unwrap();
        }
        SessionStore::new(storage)
    }

    // =====================================================================
    // hydrate()
    // =====================================================================

    #[test]
    fn test_hydrate_empty_storage_is_anonymous() {
        let mut s = store();
        assert!(s.hydrate().unwrap().is_none());
        assert!(!s.is_authenticated());
    }

    #[test]
    fn test_hydrate_reads_all_three_keys() {
        let mut s = store_with(&[("token", "abc"), ("userRole", "admin"), ("userId", "a1")]);

        let session = s.hydrate().unwrap().expect("session should load").clone();

        assert_eq!(session, Session::new("abc", Role::Admin).with_user_id("a1"));
        assert_eq!(s.token(), Some("abc"));
        assert_eq!(s.role(), Some(Role::Admin));
    }

    #[test]
    fn test_hydrate_without_user_id_is_fine() {
        let mut s = store_with(&[("token", "abc"), ("userRole", "cricketer")]);
        let session = s.hydrate().unwrap().unwrap();
        assert!(session.user_id.is_none());
    }

    #[test]
    fn test_hydrate_unknown_role_clears_storage() {
        let mut s = store_with(&[("token", "abc"), ("userRole", "coach"), ("userId", "x")]);

        assert!(s.hydrate().unwrap().is_none());

        for key in StorageKeys::ALL {
            assert!(s.storage().get(key).is_none(), "{key} should be removed");
        }
    }

    #[test]
    fn test_hydrate_missing_role_clears_storage() {
        let mut s = store_with(&[("token", "abc")]);
        assert!(s.hydrate().unwrap().is_none());
        assert!(s.storage().get("token").is_none());
    }

    #[test]
    fn test_hydrate_blank_token_is_anonymous() {
        let mut s = store_with(&[("token", "  "), ("userRole", "admin")]);
        assert!(s.hydrate().unwrap().is_none());
    }

    #[test]
    fn test_hydrate_ignores_legacy_key_names() {
        // `authToken` / `user` belonged to an older client build.
        let mut s = store_with(&[("authToken", "abc"), ("user", "{\"role\":\"admin\"}")]);
        assert!(s.hydrate().unwrap().is_none());
    }

    // =====================================================================
    // commit()
    // =====================================================================

    #[test]
    fn test_commit_writes_all_keys() {
        let mut s = store();
        s.commit(Session::new("abc", Role::Cricketer).with_user_id("1")).unwrap();

        assert_eq!(s.storage().get("token").as_deref(), Some("abc"));
        assert_eq!(s.storage().get("userRole").as_deref(), Some("cricketer"));
        assert_eq!(s.storage().get("userId").as_deref(), Some("1"));
        assert!(s.is_authenticated());
    }

    #[test]
    fn test_commit_last_login_wins() {
        let mut s = store();
        s.commit(Session::new("first", Role::Cricketer).with_user_id("1")).unwrap();
        s.commit(Session::new("second", Role::Admin)).unwrap();

        assert_eq!(s.token(), Some("second"));
        assert_eq!(s.role(), Some(Role::Admin));
        // The old user id must not leak into the new session.
        assert!(s.storage().get("userId").is_none());
    }

    #[test]
    fn test_commit_then_hydrate_round_trip() {
        let mut s = store();
        let original = Session::new("abc", Role::Admin).with_user_id("a1");
        s.commit(original.clone()).unwrap();

        let mut reloaded = SessionStore::new(s.storage().clone());
        assert_eq!(reloaded.hydrate().unwrap(), Some(&original));
    }

    // =====================================================================
    // clear()
    // =====================================================================

    #[test]
    fn test_clear_removes_all_keys_and_memory() {
        let mut s = store();
        s.commit(Session::new("abc", Role::Admin).with_user_id("a1")).unwrap();

        s.clear().unwrap();

        assert!(!s.is_authenticated());
        assert!(s.token().is_none());
        assert!(s.storage().is_empty());
    }

    #[test]
    fn test_clear_when_anonymous_is_ok() {
        let mut s = store();
        assert!(s.clear().is_ok());
    }
}
