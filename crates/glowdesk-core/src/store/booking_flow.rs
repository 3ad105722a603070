// ── Public booking flow ──
//
// The unauthenticated storefront flow: look up free slots for a date
// and service, then submit the booking. Distinct from the admin
// booking collection, which lives in `store::bookings`.

use std::sync::Arc;

use chrono::NaiveDate;
use glowdesk_api::ApiClient;
use tokio::sync::watch;

use crate::error::CoreError;
use crate::model::{BookingRequest, Slot};

/// Observable state of one booking attempt.
#[derive(Debug, Clone, Default)]
pub struct BookingFlowState {
    pub slots: Vec<Slot>,
    pub loading_slots: bool,
    pub submitting: bool,
    /// Set only after the server confirms creation.
    pub success: bool,
    pub error: Option<String>,
    pub field_errors: Option<std::collections::HashMap<String, Vec<String>>>,
}

pub struct BookingFlowSlice {
    api: Arc<ApiClient>,
    state: watch::Sender<BookingFlowState>,
}

impl BookingFlowSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(BookingFlowState::default());
        Self { api, state }
    }

    /// Load the free slots for a date and service. Stale slots are
    /// cleared up front so a slow response can't leave yesterday's
    /// availability on screen.
    pub async fn fetch_available_slots(&self, date: NaiveDate, service_id: u64) {
        self.state.send_modify(|s| {
            s.slots = Vec::new();
            s.loading_slots = true;
            s.error = None;
        });
        let params = [
            ("date", date.format("%Y-%m-%d").to_string()),
            ("service_id", service_id.to_string()),
        ];
        match self
            .api
            .get_with_params::<Vec<Slot>>("available-slots", &params)
            .await
        {
            Ok(slots) => self.state.send_modify(|s| {
                s.slots = slots;
                s.loading_slots = false;
            }),
            Err(e) => self.state.send_modify(|s| {
                s.loading_slots = false;
                s.error = Some(e.to_string());
            }),
        }
    }

    /// Submit the booking. Success means the server answered 201; any
    /// other outcome, including a 2xx that isn't 201, leaves `success`
    /// unset.
    pub async fn submit(&self, request: &BookingRequest) -> Result<(), CoreError> {
        self.state.send_modify(|s| {
            s.submitting = true;
            s.error = None;
        });
        match self.api.post_created("book", request).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.submitting = false;
                    s.success = true;
                });
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                match &err {
                    CoreError::Validation { errors } => {
                        let errors = errors.clone();
                        self.state.send_modify(|s| {
                            s.submitting = false;
                            s.field_errors = Some(errors);
                        });
                    }
                    other => {
                        let message = other.to_string();
                        self.state.send_modify(|s| {
                            s.submitting = false;
                            s.error = Some(message);
                        });
                    }
                }
                Err(err)
            }
        }
    }

    /// Back to a blank flow (confirmation screen dismissed).
    pub fn reset(&self) {
        self.state.send_modify(|s| *s = BookingFlowState::default());
    }

    pub fn snapshot(&self) -> BookingFlowState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BookingFlowState> {
        self.state.subscribe()
    }
}
