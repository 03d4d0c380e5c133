//! Catalog source backed by the API's events endpoint.

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::storage::{CatalogSource, EventRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Loads event records with `GET events_path`.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: Arc<ApiClient>,
}

impl RemoteCatalog {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    fn describe(&self) -> String {
        self.client.url(&self.client.config().events_path)
    }

    async fn load(&self) -> Result<Vec<EventRecord>> {
        let records: Vec<EventRecord> = self
            .client
            .get_json(&self.client.config().events_path)
            .await?;
        tracing::debug!(count = records.len(), "remote catalog loaded");
        Ok(records)
    }
}
