// ── Inventory product slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, MethodOverride, Payload};
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::Product;

const PATH: &str = "admin/products";

/// Server-backed product collection. Create/update accept either a JSON
/// or a multipart payload (product image).
pub struct ProductSlice {
    api: Arc<ApiClient>,
    slice: Slice<Product>,
}

impl ProductSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    /// Replace the collection from the server. Failures land in state,
    /// never in the return value.
    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<Vec<Product>>(PATH).await {
            Ok(items) => self.slice.finish_items(items),
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

    pub async fn fetch_by_id(&self, id: u64) {
        self.slice.begin();
        match self.api.get::<Product>(&format!("{PATH}/{id}")).await {
            Ok(item) => self.slice.finish_current(item),
            // `current` keeps its stale value; the caller decides
            // whether staleness is acceptable.
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

    /// Create, then refetch so server-assigned fields (id, stored image
    /// path, `last_updated`) land in `items`. Re-throws on failure.
    pub async fn create(&self, payload: Payload) -> Result<(), CoreError> {
        match self
            .api
            .send_payload(PATH, &payload, MethodOverride::None)
            .await
        {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    pub async fn update(&self, id: u64, payload: Payload) -> Result<(), CoreError> {
        match self
            .api
            .send_payload(&format!("{PATH}/{id}"), &payload, MethodOverride::Put)
            .await
        {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    /// Delete, then refetch — `last_updated` on remaining rows may have
    /// changed server-side.
    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.api.delete(&format!("{PATH}/{id}")).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    pub fn clear_current(&self) {
        self.slice.clear_current();
    }

    pub fn clear_error(&self) {
        self.slice.clear_error();
    }

    pub fn clear_field_errors(&self) {
        self.slice.clear_field_errors();
    }

    pub fn snapshot(&self) -> SliceState<Product> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<Product>> {
        self.slice.subscribe()
    }
}
