// ── Marketing campaign domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    /// Server-reported counter; read-only from the client's perspective.
    #[serde(default)]
    pub bookings_generated: Option<u64>,
}
