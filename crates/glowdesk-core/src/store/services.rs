// ── Service catalogue slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, MethodOverride, Payload};
use serde_json::json;
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::Service;

const PATH: &str = "admin/services";

/// Server-backed service collection, with the featured-flag toggle on
/// top of the usual CRUD contract.
pub struct ServiceSlice {
    api: Arc<ApiClient>,
    slice: Slice<Service>,
}

impl ServiceSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<Vec<Service>>(PATH).await {
            Ok(items) => self.slice.finish_items(items),
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

    pub async fn fetch_by_id(&self, id: u64) {
        self.slice.begin();
        match self.api.get::<Service>(&format!("{PATH}/{id}")).await {
            Ok(item) => self.slice.finish_current(item),
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

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

    /// Delete, then refetch — stored image paths are server-managed.
    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.api.delete(&format!("{PATH}/{id}")).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    /// Flip the featured flag server-side, then refetch the collection.
    pub async fn toggle_featured(&self, id: u64) -> Result<(), CoreError> {
        match self
            .api
            .put_empty(&format!("{PATH}/{id}/toggle-featured"), &json!({}))
            .await
        {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    /// Forget the detail-view entity (modal dismissed).
    pub fn clear_current(&self) {
        self.slice.clear_current();
    }

    pub fn clear_error(&self) {
        self.slice.clear_error();
    }

    pub fn clear_field_errors(&self) {
        self.slice.clear_field_errors();
    }

    pub fn snapshot(&self) -> SliceState<Service> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<Service>> {
        self.slice.subscribe()
    }
}
