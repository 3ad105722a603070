// ── Booking domain types ──
//
// Bookings are created by the public booking form (server assigns the id)
// and mutated by admin edits. The embedded service is denormalized display
// data — the client never enforces referential integrity on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::service::Service;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<u64>,
    pub service_id: Option<u64>,
    /// Denormalized service row for display (name/price/duration).
    pub service: Option<Service>,
    pub payment_method: Option<String>,
    pub status: BookingStatus,
    pub date: NaiveDate,
    /// Times are wall-clock strings as the backend sends them ("09:00").
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total: Option<f64>,
    pub paid_amount: Option<f64>,
}

/// A bookable time window returned by `/available-slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: String,
    pub end_time: String,
}

/// Public booking form submission. The server computes everything else
/// (id, status, conflict checks) and answers 201 on success.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub service_id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub payment_method: String,
    pub total: f64,
}
