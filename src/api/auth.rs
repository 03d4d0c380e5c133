//! Account operations on top of [`ApiClient`]: login, registration, logout.

use crate::api::client::{ApiClient, Auth};
use crate::api::session::{Role, Session, User};
use crate::domain::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Login credentials. The API accepts either a username or an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Credentials {
    Username { username: String, password: String },
    Email { email: String, password: String },
}

impl Credentials {
    /// Picks the email form when `identifier` looks like an address.
    #[must_use]
    pub fn new(identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim().to_string();
        let password = password.to_string();
        if identifier.contains('@') {
            Self::Email {
                email: identifier,
                password,
            }
        } else {
            Self::Username {
                username: identifier,
                password,
            }
        }
    }
}

/// New account details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
}

/// Token pair and account returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Signs users in and out, keeping the session store in step.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for tokens and stores the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Api`](crate::EventScoutError::Api) when the
    /// credentials are refused, or a transport or session-store error.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let path = &self.client.config().login_path;
        let tokens: TokenResponse = self
            .client
            .post_json(path, credentials, Auth::Anonymous)
            .await?;

        self.client.session().save(&Session {
            access: Some(tokens.access),
            refresh: Some(tokens.refresh),
            user: Some(tokens.user.clone()),
        })?;

        tracing::info!(user_id = tokens.user.id, role = %tokens.user.role, "signed in");
        Ok(tokens.user)
    }

    /// Creates an account. The new account is not signed in.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Api`](crate::EventScoutError::Api) when the
    /// API rejects the registration, or a transport error.
    pub async fn register(&self, registration: &Registration) -> Result<TokenResponse> {
        let path = &self.client.config().register_path;
        let response: TokenResponse = self
            .client
            .post_json(path, registration, Auth::Anonymous)
            .await?;
        tracing::info!(user_id = response.user.id, "account registered");
        Ok(response)
    }

    /// Forgets tokens and the stored user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// The signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn stored_user(&self) -> Result<Option<User>> {
        Ok(self.client.session().load()?.user)
    }
}
