//! Client side of the volunteer platform's HTTP API.
//!
//! - [`client`]: Bearer-authenticated JSON requests with single-flight token refresh
//! - [`session`]: Token and user persistence behind the [`SessionStore`] trait
//! - [`auth`]: Login, registration and logout
//! - [`catalog`]: The events endpoint as a [`CatalogSource`](crate::storage::CatalogSource)

pub mod auth;
pub mod catalog;
pub mod client;
pub mod session;

pub use auth::{AuthService, Credentials, Registration, TokenResponse};
pub use catalog::RemoteCatalog;
pub use client::{ApiClient, ApiConfig, Auth};
pub use session::{FileSessionStore, MemorySessionStore, Role, Session, SessionStore, User};
