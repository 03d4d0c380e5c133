//! JSON catalog source and atomic JSON file writes.
//!
//! A catalog file is a JSON array of [`EventRecord`]s. The seed catalog that
//! ships with the binary uses the same format and is embedded at compile time.
//!
//! # File Format
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "title": "Boğaz Çevresi Kıyı Temizliği",
//!     "date": "2024-06-22",
//!     "location": "İstanbul",
//!     "category": "Çevre",
//!     "volunteersNeeded": 80,
//!     "organization": "Mavi Dünya Derneği",
//!     "tags": ["Plastik Aksiyonu", "Aile Dostu", "Sahil"],
//!     "mode": "Yerinde"
//!   }
//! ]
//! ```

use crate::domain::error::{EventScoutError, Result};
use crate::storage::backend::CatalogSource;
use crate::storage::models::EventRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The seed catalog embedded in the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/events.json");

/// Reads event records from a JSON file, or from the embedded seed catalog.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    origin: Origin,
}

#[derive(Debug, Clone)]
enum Origin {
    Builtin,
    File(PathBuf),
}

impl JsonCatalog {
    /// A source reading `path` on every load.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            origin: Origin::File(path),
        }
    }

    /// The seed catalog compiled into the binary.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            origin: Origin::Builtin,
        }
    }

    /// Parses a JSON array of event records.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Catalog`] with the parser's location if the
    /// payload is not valid JSON or a record has an unknown category or mode.
    pub fn parse(contents: &str) -> Result<Vec<EventRecord>> {
        serde_json::from_str(contents)
            .map_err(|e| EventScoutError::Catalog(format!("failed to parse catalog JSON: {e}")))
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    fn describe(&self) -> String {
        match &self.origin {
            Origin::Builtin => "built-in catalog".to_string(),
            Origin::File(path) => path.display().to_string(),
        }
    }

    async fn load(&self) -> Result<Vec<EventRecord>> {
        let records = match &self.origin {
            Origin::Builtin => Self::parse(BUILTIN_CATALOG)?,
            Origin::File(path) => {
                tracing::debug!(path = ?path, "reading catalog file");
                let contents = tokio::fs::read_to_string(path).await?;
                Self::parse(&contents)?
            }
        };

        tracing::debug!(source = %self.describe(), count = records.len(), "catalog loaded");
        Ok(records)
    }
}

/// Serializes `value` as pretty JSON and writes it to `path` atomically.
///
/// Writes to a sibling temporary file first, then renames it over the target,
/// so readers never observe a half-written file. Parent directories are
/// created as needed. On unix the file is readable by its owner only (`0600`),
/// since it may hold tokens.
///
/// # Errors
///
/// Returns an error if serialization fails, the directory cannot be created,
/// or the write or rename fails.
pub(crate) fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension("tmp");
    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp_path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // a leftover temp file keeps its old mode
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
