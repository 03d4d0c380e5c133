//! Catalog source abstraction.
//!
//! This module defines the [`CatalogSource`] trait that abstracts over where
//! the session's event records come from: the embedded seed catalog, a JSON
//! file, or the HTTP API. The binder loads from a source once at startup (and
//! again on `reload`) and builds a [`Catalog`](super::Catalog) from the result.

use crate::domain::error::Result;
use crate::storage::catalog::Catalog;
use crate::storage::models::EventRecord;
use async_trait::async_trait;
use tracing::Instrument;

/// Supplies the ordered sequence of event records for a session.
///
/// # Implementations
///
/// - [`JsonCatalog`](super::JsonCatalog): A JSON file, or the built-in seed catalog
/// - [`RemoteCatalog`](crate::api::RemoteCatalog): The events endpoint of the API
///
/// # Examples
///
/// ```
/// use eventscout::storage::{Catalog, CatalogSource, JsonCatalog};
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let records = runtime.block_on(JsonCatalog::builtin().load()).unwrap();
/// let catalog = Catalog::from_records(records).unwrap();
/// assert_eq!(catalog.len(), 8);
/// ```
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short human-readable description, used in log lines and notices.
    fn describe(&self) -> String;

    /// Loads every record, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or its payload is not a
    /// list of event records.
    async fn load(&self) -> Result<Vec<EventRecord>>;
}

/// Loads every record from `source` and builds a catalog from them.
///
/// # Errors
///
/// Propagates the source's load error, or a
/// [`Catalog`](crate::domain::EventScoutError::Catalog) error when a record
/// fails validation.
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog> {
    let span = tracing::debug_span!("load_catalog", source = %source.describe());
    async {
        let records = source.load().await?;
        let catalog = Catalog::from_records(records)?;
        tracing::info!(events = catalog.len(), source = %source.describe(), "catalog loaded");
        Ok(catalog)
    }
    .instrument(span)
    .await
}
