//! Actions representing side effects to be executed by the binder's runtime.
//!
//! The command handler mutates [`DiscoveryState`](super::DiscoveryState)
//! synchronously and returns a `Vec<Action>` for everything it cannot do on
//! its own: network calls, reloading the catalog, timed notifications and
//! leaving the program. The runtime in `main.rs` executes them in order.
//!
//! # Example
//!
//! ```rust
//! use eventscout::app::Action;
//!
//! let actions = vec![
//!     Action::Notify("Filters reset".to_string()),
//!     Action::ReloadCatalog,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shows a transient message on the notification line.
    Notify(String),

    /// Prints the command reference.
    ShowHelp,

    /// Reloads the catalog from its source and rebuilds the result set.
    ReloadCatalog,

    /// Signs in against the API and stores the session.
    Login {
        /// Username or email address.
        identifier: String,
        password: String,
    },

    /// Clears the stored session.
    Logout,

    /// Reports the signed-in user.
    WhoAmI,

    /// Ends the session.
    Quit,
}

impl Action {
    /// Variant name, safe to log (never includes the password).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Notify(_) => "notify",
            Self::ShowHelp => "show_help",
            Self::ReloadCatalog => "reload_catalog",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::WhoAmI => "whoami",
            Self::Quit => "quit",
        }
    }
}
