//! Eventscout: volunteer event discovery in the terminal.
//!
//! Eventscout browses a catalog of volunteer opportunities:
//! - Free-text search, location, organization, category, tag, date window,
//!   minimum volunteer and participation mode filters
//! - Soonest, most-volunteers and most-recent orderings
//! - Fixed-size pagination with clamped navigation
//! - Catalogs from the built-in seed data, a JSON file, or the platform API
//! - Login against the API with bearer tokens and single-flight refresh

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Runtime (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Command parsing and handling                     │
//! │  - Action dispatching, notifications                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Discovery     │   │ API Client    │
//! │ (ui/)         │   │ (discovery/)  │   │ (api/)        │
//! │ - Rendering   │   │ - Predicate   │   │ - Bearer auth │
//! │ - Theming     │   │ - Sorting     │   │ - Refresh     │
//! │ - Components  │   │ - Pagination  │   │ - Sessions    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Catalog store and sources (storage/)             │
//! │  - Platform paths, Turkish text (infrastructure/)   │
//! │  - Events, filters, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, JSON-lines span export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Browser state, command parsing and handling, notifications
//! - [`discovery`]: The filter → sort → paginate pipeline
//! - [`domain`]: Core domain types (events, filters, errors, clock)
//! - [`storage`]: Catalog store and catalog sources
//! - [`api`]: HTTP client, authentication, remote catalog
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths and Turkish text helpers
//! - [`observability`]: Tracing subscriber and span export
//!
//! # Configuration
//!
//! Read from `~/.config/eventscout/config.toml` (or `--config PATH`), then
//! overlaid with `key=value` arguments:
//!
//! ```toml
//! page_size = 4
//! theme = "meadow"
//! trace_level = "debug"
//! notification_ttl_ms = 2500
//!
//! [api]
//! base_url = "http://127.0.0.1:8000"
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use eventscout::app::{command, handle_command};
//! use eventscout::domain::SystemClock;
//! use eventscout::storage::{Catalog, CatalogSource, JsonCatalog};
//! use eventscout::{initialize, Config};
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! let records = runtime.block_on(JsonCatalog::builtin().load())?;
//! let catalog = Catalog::from_records(records)?;
//!
//! let mut state = initialize(&Config::default(), catalog, Arc::new(SystemClock));
//! for line in ["category çevre", "sort volunteers"] {
//!     let cmd = command::parse(line, state.catalog())?;
//!     handle_command(&mut state, &cmd);
//! }
//! assert_eq!(state.filtered_count(), 2);
//! assert_eq!(state.current_page_items()[0].volunteers_needed, 120);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod app;
pub mod discovery;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_command, Action, Command, DiscoveryState, ViewMode};
pub use domain::{EventScoutError, Result};
pub use ui::Theme;

use crate::api::{ApiClient, ApiConfig, RemoteCatalog};
use crate::discovery::DEFAULT_PAGE_SIZE;
use crate::domain::Clock;
use crate::infrastructure::paths;
use crate::storage::{Catalog, CatalogSource, JsonCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A `key=value` override that [`Config::apply_overrides`] left unapplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: String,
    pub value: String,
    /// `"unknown key"` or `"invalid value"`.
    pub reason: &'static str,
}

impl RejectedOverride {
    fn new(key: &str, value: &str, reason: &'static str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for RejectedOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ignored override {}={} ({})", self.key, self.value, self.reason)
    }
}

/// Runtime configuration.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON catalog file to browse instead of the built-in seed catalog.
    pub catalog_path: Option<String>,

    /// Load the catalog from the API's events endpoint.
    ///
    /// Takes precedence over `catalog_path`.
    pub remote_catalog: bool,

    /// Events per page. Must be greater than zero. Default: 4
    pub page_size: usize,

    /// Built-in theme name: `meadow`, `paper` or `plain`.
    ///
    /// Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Filter directive for spans and events (`trace`, `debug`, `info`, ...).
    /// `RUST_LOG` wins when set. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also print log events to stderr.
    pub log_stderr: bool,

    /// How long a notification stays on screen.
    pub notification_ttl_ms: u64,

    /// Where the login session is persisted. Default: the data directory.
    pub session_file: Option<String>,

    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            remote_catalog: false,
            page_size: DEFAULT_PAGE_SIZE.get(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_stderr: false,
            notification_ttl_ms: 2500,
            session_file: None,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Reads the TOML file at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Io`] if the file exists but cannot be read,
    /// and [`EventScoutError::Config`] if it is not valid TOML for this
    /// structure or `page_size` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventscout::Config;
    ///
    /// let config = Config::load(std::path::Path::new("/nonexistent/config.toml"))?;
    /// assert_eq!(config, Config::default());
    /// # Ok::<(), eventscout::EventScoutError>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| EventScoutError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Reads the config file from the platform configuration directory.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::default_config_file())
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Config`] when `page_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(EventScoutError::Config("page_size must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Overlays `key=value` overrides from the command line.
    ///
    /// Values that fail to parse, a zero `page_size`, and unknown keys keep
    /// the current value and are returned, so the caller can report them once
    /// logging is up.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`, `notification_ttl_ms`, `api.timeout_secs`: unsigned integers
    /// - `log_stderr`, `remote_catalog`: `true`/`false`
    /// - everything else: taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use eventscout::Config;
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert("page_size".to_string(), "6".to_string());
    /// overrides.insert("api.base_url".to_string(), "https://example.org".to_string());
    /// overrides.insert("notification_ttl_ms".to_string(), "soon".to_string());
    ///
    /// let mut config = Config::default();
    /// let rejected = config.apply_overrides(&overrides);
    /// assert_eq!(config.page_size, 6);
    /// assert_eq!(config.api.base_url, "https://example.org");
    /// assert_eq!(config.notification_ttl_ms, 2500);
    /// assert_eq!(rejected.len(), 1);
    /// assert_eq!(rejected[0].key, "notification_ttl_ms");
    /// ```
    #[must_use = "rejected overrides should be reported to the user"]
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Vec<RejectedOverride> {
        let mut rejected = Vec::new();
        for (key, value) in overrides {
            let value = value.trim();
            let applied = match key.as_str() {
                "catalog_path" => set_string(&mut self.catalog_path, value),
                "remote_catalog" => set_parsed(&mut self.remote_catalog, value),
                "page_size" => value
                    .parse::<NonZeroUsize>()
                    .map(|size| self.page_size = size.get())
                    .is_ok(),
                "theme" => set_string(&mut self.theme_name, value),
                "theme_file" => set_string(&mut self.theme_file, value),
                "trace_level" => set_string(&mut self.trace_level, value),
                "log_stderr" => set_parsed(&mut self.log_stderr, value),
                "notification_ttl_ms" => set_parsed(&mut self.notification_ttl_ms, value),
                "session_file" => set_string(&mut self.session_file, value),
                "api.base_url" => replace(&mut self.api.base_url, value),
                "api.events_path" => replace(&mut self.api.events_path, value),
                "api.login_path" => replace(&mut self.api.login_path, value),
                "api.register_path" => replace(&mut self.api.register_path, value),
                "api.refresh_path" => replace(&mut self.api.refresh_path, value),
                "api.timeout_secs" => set_parsed(&mut self.api.timeout_secs, value),
                _ => {
                    rejected.push(RejectedOverride::new(key, value, "unknown key"));
                    continue;
                }
            };
            if !applied {
                rejected.push(RejectedOverride::new(key, value, "invalid value"));
            }
        }
        rejected
    }

    /// Page size as a non-zero count.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(paths::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|e| {
                tracing::warn!(theme_name = %theme_name, error = %e, "failed to load theme, using default");
                Theme::default()
            })
        })
    }

    /// Picks the catalog source: the API, a JSON file, or the seed catalog.
    #[must_use]
    pub fn catalog_source(&self, client: &Arc<ApiClient>) -> Box<dyn CatalogSource> {
        if self.remote_catalog {
            Box::new(RemoteCatalog::new(Arc::clone(client)))
        } else if let Some(path) = &self.catalog_path {
            Box::new(JsonCatalog::new(paths::expand_tilde(path)))
        } else {
            Box::new(JsonCatalog::builtin())
        }
    }
}

fn set_string(slot: &mut Option<String>, value: &str) -> bool {
    *slot = (!value.is_empty()).then(|| value.to_string());
    true
}

fn replace(slot: &mut String, value: &str) -> bool {
    value.clone_into(slot);
    true
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, value: &str) -> bool {
    value.parse().map(|parsed| *slot = parsed).is_ok()
}

/// Builds the browser state for `catalog` with the configured page size and
/// theme.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use eventscout::domain::SystemClock;
/// use eventscout::storage::Catalog;
/// use eventscout::{initialize, Config};
///
/// let state = initialize(&Config::default(), Catalog::default(), Arc::new(SystemClock));
/// assert_eq!(state.current_page(), 1);
/// ```
#[must_use]
pub fn initialize(config: &Config, catalog: Catalog, clock: Arc<dyn Clock>) -> DiscoveryState {
    tracing::debug!(events = catalog.len(), page_size = config.page_size, "initializing eventscout");
    DiscoveryState::new(catalog, config.page_size(), clock, config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemorySessionStore;
    use std::io::Write;

    #[test]
    fn toml_fields_fill_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "page_size = 6\ntheme = \"paper\"\nlog_stderr = true\n\n[api]\nbase_url = \"https://api.example.org\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.theme_name.as_deref(), Some("paper"));
        assert!(config.log_stderr);
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert_eq!(config.api.events_path, "/api/events/");
        assert_eq!(config.notification_ttl_ms, 2500);
        assert_eq!(config.theme().name, "paper");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "page_size = 0\n").unwrap();
        assert!(matches!(Config::load(file.path()), Err(EventScoutError::Config(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "page_size = \"four\"\n").unwrap();
        assert!(matches!(Config::load(file.path()), Err(EventScoutError::Config(_))));
    }

    #[test]
    fn invalid_overrides_keep_current_values() {
        let overrides: BTreeMap<String, String> = [
            ("page_size", "0"),
            ("log_stderr", "yes"),
            ("remote_catalog", "true"),
            ("theme", ""),
            ("colour", "red"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut config = Config {
            theme_name: Some("paper".to_string()),
            ..Config::default()
        };
        let rejected = config.apply_overrides(&overrides);

        assert_eq!(config.page_size, 4);
        assert!(!config.log_stderr);
        assert!(config.remote_catalog);
        assert_eq!(config.theme_name, None);

        let reported: Vec<(&str, &str)> = rejected
            .iter()
            .map(|r| (r.key.as_str(), r.reason))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("colour", "unknown key"),
                ("log_stderr", "invalid value"),
                ("page_size", "invalid value"),
            ]
        );
        assert_eq!(rejected[2].to_string(), "ignored override page_size=0 (invalid value)");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "meadow");
    }

    #[test]
    fn catalog_source_follows_config() {
        let client = Arc::new(
            ApiClient::new(ApiConfig::default(), Arc::new(MemorySessionStore::default())).unwrap(),
        );

        assert_eq!(Config::default().catalog_source(&client).describe(), "built-in catalog");

        let remote = Config {
            remote_catalog: true,
            catalog_path: Some("/tmp/events.json".to_string()),
            ..Config::default()
        };
        assert_eq!(
            remote.catalog_source(&client).describe(),
            "http://127.0.0.1:8000/api/events/"
        );
    }
}
