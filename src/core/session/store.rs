//! Persistence of the session entries
//!
//! A session occupies exactly three keys in the key-value store: the access
//! token, the refresh token and the serialized user. Key names come from
//! configuration.

use super::state::Session;
use crate::adapters::storage::{KeyValueStore, StorageResult};
use crate::config::{secret_string, SecretString, StorageConfig};
use crate::domain::errors::StorageError;
use crate::domain::user::User;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Outcome of reading the persisted entries at start-up
#[derive(Debug)]
pub enum StoredSession {
    /// Token or user missing; nothing to restore
    Empty,
    /// Token and user present but the user entry does not parse
    Corrupt(String),
    Found {
        access_token: SecretString,
        refresh_token: Option<SecretString>,
        user: User,
    },
}

/// Reads and writes the three session entries
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    token_key: String,
    refresh_token_key: String,
    user_key: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
            refresh_token_key: config.refresh_token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    /// Writes all three entries
    ///
    /// A missing refresh token is stored as an empty string so the entry
    /// count stays fixed.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be serialized or the store
    /// rejects a write.
    pub fn save(&self, session: &Session) -> StorageResult<()> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| StorageError::Write(format!("Cannot serialize user: {e}")))?;
        let refresh = session
            .refresh_token
            .as_ref()
            .map(|t| t.expose_secret().as_ref().to_string())
            .unwrap_or_default();

        self.store
            .set(&self.token_key, session.access_token.expose_secret().as_ref())?;
        self.store.set(&self.refresh_token_key, &refresh)?;
        self.store.set(&self.user_key, &user)?;
        Ok(())
    }

    /// Reads the persisted session
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    pub fn load(&self) -> StorageResult<StoredSession> {
        let token = self.store.get(&self.token_key)?.filter(|t| !t.is_empty());
        let user = self.store.get(&self.user_key)?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(StoredSession::Empty);
        };

        let user: User = match serde_json::from_str(&user) {
            Ok(user) => user,
            Err(e) => return Ok(StoredSession::Corrupt(e.to_string())),
        };

        let refresh_token = self
            .store
            .get(&self.refresh_token_key)?
            .filter(|t| !t.is_empty())
            .map(secret_string);

        Ok(StoredSession::Found {
            access_token: secret_string(token),
            refresh_token,
            user,
        })
    }

    /// Removes all three entries
    ///
    /// # Errors
    ///
    /// Returns the first removal failure; the remaining keys are still
    /// attempted.
    pub fn clear(&self) -> StorageResult<()> {
        let mut first_error = None;
        for key in [&self.token_key, &self.refresh_token_key, &self.user_key] {
            if let Err(e) = self.store.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Backend name for logs
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use chrono::Utc;

    fn user_json() -> &'static str {
        r#"{"id":1,"email":"admin@x.com","nom":"Durand","prenom":"Paul","role":"ADMIN"}"#
    }

    fn session() -> Session {
        Session {
            access_token: secret_string("access".to_string()),
            refresh_token: Some(secret_string("refresh".to_string())),
            user: serde_json::from_str(user_json()).unwrap(),
            expires_at: Utc::now(),
        }
    }

    fn store() -> (Arc<MemoryStore>, SessionStore) {
        let backing = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(backing.clone(), &StorageConfig::default());
        (backing, sessions)
    }

    #[test]
    fn test_save_writes_three_entries() {
        let (backing, sessions) = store();
        sessions.save(&session()).unwrap();

        assert_eq!(
            backing.keys().unwrap(),
            vec!["auth_token", "current_user", "refresh_token"]
        );
        assert_eq!(backing.get("auth_token").unwrap().as_deref(), Some("access"));
    }

    #[test]
    fn test_load_round_trip() {
        let (_, sessions) = store();
        sessions.save(&session()).unwrap();

        match sessions.load().unwrap() {
            StoredSession::Found {
                access_token,
                refresh_token,
                user,
            } => {
                assert_eq!(access_token.expose_secret().as_ref(), "access");
                assert!(refresh_token.is_some());
                assert_eq!(user.email, "admin@x.com");
            }
            other => panic!("expected a stored session, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_entries_are_empty() {
        let (backing, sessions) = store();
        backing.set("auth_token", "access").unwrap();
        assert!(matches!(sessions.load().unwrap(), StoredSession::Empty));
    }

    #[test]
    fn test_unparsable_user_is_corrupt() {
        let (backing, sessions) = store();
        backing.set("auth_token", "access").unwrap();
        backing.set("current_user", "{not json").unwrap();
        assert!(matches!(
            sessions.load().unwrap(),
            StoredSession::Corrupt(_)
        ));
    }

    #[test]
    fn test_clear_removes_everything() {
        let (backing, sessions) = store();
        sessions.save(&session()).unwrap();
        sessions.clear().unwrap();
        assert!(backing.keys().unwrap().is_empty());
        // idempotent
        sessions.clear().unwrap();
    }
}
