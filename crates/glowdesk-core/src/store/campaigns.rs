// ── Marketing campaign slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, MethodOverride, Payload};
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::Campaign;

const PATH: &str = "admin/campaigns";

/// Server-backed campaign collection. Plain JSON payloads throughout.
pub struct CampaignSlice {
    api: Arc<ApiClient>,
    slice: Slice<Campaign>,
}

impl CampaignSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<Vec<Campaign>>(PATH).await {
            Ok(items) => self.slice.finish_items(items),
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

    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.api.delete(&format!("{PATH}/{id}")).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => Err(self.slice.record_write_failure(e)),
        }
    }

    pub fn clear_error(&self) {
        self.slice.clear_error();
    }

    pub fn clear_field_errors(&self) {
        self.slice.clear_field_errors();
    }

    pub fn snapshot(&self) -> SliceState<Campaign> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<Campaign>> {
        self.slice.subscribe()
    }
}
