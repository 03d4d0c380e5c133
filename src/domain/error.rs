//! Error types for eventscout.
//!
//! This module defines the centralized error type [`EventScoutError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The discovery pipeline itself never fails: filtering, sorting and pagination are
//! total. Errors come from the edges (catalog loading, configuration, the session
//! store and the HTTP client).

use thiserror::Error;

/// The main error type for eventscout operations.
///
/// Most variants carry a human-readable description; I/O and HTTP transport
/// failures wrap the underlying error using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use eventscout::EventScoutError;
///
/// fn validate_page_size(size: usize) -> Result<(), EventScoutError> {
///     if size == 0 {
///         return Err(EventScoutError::Config("page_size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum EventScoutError {
    /// A catalog record was malformed or the catalog could not be loaded.
    ///
    /// Raised when a record has an empty title, an unparsable date, an unknown
    /// category or mode, or a duplicate identifier.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the TOML file cannot be parsed or a value is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The session store could not be read or written.
    #[error("Session store error: {0}")]
    Session(String),

    /// A command typed into the terminal browser could not be understood.
    #[error("Invalid command: {0}")]
    Command(String),

    /// JSON encoding or decoding failed outside the catalog loader.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport failure (connection refused, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API responded with status {status}: {body}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A request was rejected as unauthorized and no refresh token is stored.
    #[error("not authenticated: no refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint refused the stored refresh token.
    #[error("token refresh rejected with status {status}")]
    RefreshRejected {
        /// HTTP status code returned by the refresh endpoint.
        status: u16,
    },
}

/// A specialized `Result` type for eventscout operations.
///
/// This is a type alias for `std::result::Result<T, EventScoutError>`.
pub type Result<T> = std::result::Result<T, EventScoutError>;
