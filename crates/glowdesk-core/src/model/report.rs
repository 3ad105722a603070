// ── Report row types ──
//
// All read-only: the server recomputes these per (year, month) query and
// the client never mutates them. Wire field names are camelCase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_appointments: u64,
    pub total_revenue: f64,
    pub new_customers: u64,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReport {
    pub service_name: String,
    pub times_booked: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientReport {
    pub client_name: String,
    pub visits: u64,
}
