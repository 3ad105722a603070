// ── Admin booking slice ──

use std::sync::Arc;

use glowdesk_api::{ApiClient, MethodOverride, Payload};
use serde::Deserialize;
use tokio::sync::watch;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::Booking;

const PATH: &str = "admin/bookings";

/// The booking index arrives wrapped, unlike the other collections.
#[derive(Debug, Deserialize)]
struct BookingsResponse {
    bookings: Vec<Booking>,
}

/// Server-backed booking collection for the back office.
///
/// Deletion splices the row out locally instead of refetching: bookings
/// carry no server-derived fields that change when a sibling is removed.
pub struct BookingSlice {
    api: Arc<ApiClient>,
    slice: Slice<Booking>,
}

impl BookingSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            slice: Slice::new(),
        }
    }

    pub async fn fetch_all(&self) {
        self.slice.begin();
        match self.api.get::<BookingsResponse>(PATH).await {
            Ok(resp) => self.slice.finish_items(resp.bookings),
            Err(e) => self.slice.fail(e.to_string()),
        }
    }

    pub async fn fetch_by_id(&self, id: u64) {
        self.slice.begin();
        match self.api.get::<Booking>(&format!("{PATH}/{id}")).await {
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

    /// Update (typically a status change), then refetch so recomputed
    /// totals come back with the row.
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
                self.slice.remove_where(|b| b.id == id);
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

    pub fn snapshot(&self) -> SliceState<Booking> {
        self.slice.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SliceState<Booking>> {
        self.slice.subscribe()
    }
}
