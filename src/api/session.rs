//! Persisted login session: tokens and the signed-in user.
//!
//! The [`SessionStore`] trait is the seam between the HTTP client and wherever
//! credentials live. Methods take `&self`; implementations use interior
//! mutability so one store can be shared by the client and the auth service.

use crate::domain::error::{EventScoutError, Result};
use crate::storage::json::write_atomic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Account role as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Volunteer,
    Organization,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Volunteer => "volunteer",
            Self::Organization => "organization",
            Self::Admin => "admin",
        };
        f.write_str(label)
    }
}

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
}

impl User {
    /// Full name when known, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Everything remembered between runs about the current login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Storage for the login session.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Reads the stored session; an absent session is the empty default.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Session`] if stored data cannot be read.
    fn load(&self) -> Result<Session>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&self, session: &Session) -> Result<()>;

    /// # Errors
    ///
    /// See [`SessionStore::load`].
    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.access)
    }

    /// # Errors
    ///
    /// See [`SessionStore::load`].
    fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.refresh)
    }

    /// Replaces only the access token, keeping the refresh token and user.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::load`] and [`SessionStore::save`].
    fn set_access_token(&self, token: &str) -> Result<()> {
        let mut session = self.load()?;
        session.access = Some(token.to_string());
        self.save(&session)
    }

    /// Forgets tokens and user.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::save`].
    fn clear(&self) -> Result<()> {
        self.save(&Session::default())
    }
}

/// Session kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        self.session
            .lock()
            .map(|session| session.clone())
            .map_err(|_| EventScoutError::Session("session lock poisoned".to_string()))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| EventScoutError::Session("session lock poisoned".to_string()))?;
        *guard = session.clone();
        Ok(())
    }
}

/// Session persisted as JSON, written atomically.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            EventScoutError::Session(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, session: &Session) -> Result<()> {
        tracing::debug!(path = ?self.path, signed_in = session.user.is_some(), "saving session");
        write_atomic(&self.path, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 3,
            username: "deniz".to_string(),
            email: "deniz@example.org".to_string(),
            first_name: "Deniz".to_string(),
            last_name: "Kaya".to_string(),
            role: Role::Volunteer,
        }
    }

    #[test]
    fn file_store_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), Session::default());

        store
            .save(&Session {
                access: Some("a1".to_string()),
                refresh: Some("r1".to_string()),
                user: Some(user()),
            })
            .unwrap();
        store.set_access_token("a2").unwrap();

        let reopened = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        let session = reopened.load().unwrap();
        assert_eq!(session.access.as_deref(), Some("a2"));
        assert_eq!(session.refresh.as_deref(), Some("r1"));

        reopened.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(path.clone());
        store
            .save(&Session {
                access: Some("a1".to_string()),
                refresh: Some("r1".to_string()),
                user: None,
            })
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(path).load().unwrap_err();
        assert!(matches!(err, EventScoutError::Session(_)));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut u = user();
        assert_eq!(u.display_name(), "Deniz Kaya");
        u.first_name.clear();
        u.last_name.clear();
        assert_eq!(u.display_name(), "deniz");
    }

    #[test]
    fn role_deserializes_from_lowercase() {
        let role: Role = serde_json::from_str("\"organization\"").unwrap();
        assert_eq!(role, Role::Organization);
    }
}
