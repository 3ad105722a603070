// ── Business hours slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, MethodOverride, Payload};
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::BusinessHours;

const PATH: &str = "admin/business-hours";

/// Weekly opening schedule, one row per day.
///
/// Like bookings, deletion splices locally: the remaining rows are
/// unaffected by removing a sibling.
pub struct BusinessHoursSlice {
    api: Arc<ApiClient>,
    slice: Slice<BusinessHours>,
}

impl BusinessHoursSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<Vec<BusinessHours>>(PATH).await {
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

    /// Delete server-side, then splice the row out locally.
    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.api.delete(&format!("{PATH}/{id}")).await {
            Ok(()) => {
                self.slice.remove_where(|h| h.id == id);
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

    pub fn snapshot(&self) -> SliceState<BusinessHours> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<BusinessHours>> {
        self.slice.subscribe()
    }
}
