// ── Employee domain type ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    /// Stored avatar path; replaced wholesale when a new file is uploaded.
    pub avatar: Option<String>,
}
