// ── Inventory product domain type ──

use serde::{Deserialize, Serialize};

/// Stock level bucket, derived from quantity — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum StockStatus {
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[strum(serialize = "In Stock")]
    InStock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Unique by convention; uniqueness is the server's job.
    pub sku: String,
    pub category: String,
    pub supplier: String,
    pub quantity: u32,
    pub price: f64,
    pub image: Option<String>,
    /// Server-assigned on every mutation.
    pub last_updated: Option<String>,
}

impl Product {
    /// Derived stock bucket: 0 is out, 1..=10 is low, above 10 is in stock.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0 => Self::OutOfStock,
            1..=10 => Self::LowStock,
            _ => Self::InStock,
        }
    }
}
