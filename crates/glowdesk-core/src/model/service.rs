// ── Service domain type ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Non-negative; the server rejects negatives with a 422.
    pub price: f64,
    /// Duration in minutes.
    pub duration: u32,
    pub category: String,
    /// Independently toggleable via the toggle-featured endpoint.
    pub featured: bool,
    /// Stored image path, server-assigned on upload.
    pub image: Option<String>,
}
