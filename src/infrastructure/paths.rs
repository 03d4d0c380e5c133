//! Platform paths for configuration, session and trace files.
//!
//! Directories come from the `dirs` crate so they follow each platform's
//! conventions (XDG on Linux, `~/Library/Application Support` on macOS,
//! `%APPDATA%` on Windows). When a platform directory is unknown, paths fall
//! back to a dot-directory under the current working directory.

use std::path::PathBuf;

/// Application directory name used under the platform data and config roots.
const APP_DIR: &str = "eventscout";

/// Returns the data directory for eventscout (session store, trace files).
///
/// Typically `~/.local/share/eventscout` on Linux.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".eventscout"), |dir| dir.join(APP_DIR))
}

/// Returns the configuration directory for eventscout.
///
/// Typically `~/.config/eventscout` on Linux.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| PathBuf::from(".eventscout"), |dir| dir.join(APP_DIR))
}

/// Default location of the TOML configuration file.
#[must_use]
pub fn default_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Default location of the persisted login session.
#[must_use]
pub fn default_session_file() -> PathBuf {
    get_data_dir().join("session.json")
}

/// Default location of the span export file.
#[must_use]
pub fn default_trace_file() -> PathBuf {
    get_data_dir().join("eventscout-spans.jsonl")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when the home directory is
/// unknown, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        assert_eq!(expand_tilde("/srv/catalog.json"), PathBuf::from("/srv/catalog.json"));
        assert_eq!(expand_tilde("relative/x.json"), PathBuf::from("relative/x.json"));
    }

    #[test]
    fn tilde_expands_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/events.json"), home.join("events.json"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn files_live_under_app_directories() {
        if dirs::config_dir().is_some() {
            assert!(default_config_file().ends_with("eventscout/config.toml"));
        }
        if dirs::data_dir().is_some() {
            assert!(default_session_file().ends_with("eventscout/session.json"));
        }
    }
}
