// ── Domain model ──
//
// Plain serde records, one file per entity. Collections are
// insertion-ordered and keyed by a numeric id unique within the
// collection; referential fields (a booking's service) are opaque
// display data only.

pub mod booking;
pub mod business_hours;
pub mod campaign;
pub mod employee;
pub mod finance;
pub mod gallery;
pub mod product;
pub mod report;
pub mod service;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use glowdesk_core::model::*` gives you everything.

pub use booking::{Booking, BookingRequest, BookingStatus, Slot};
pub use business_hours::BusinessHours;
pub use campaign::Campaign;
pub use employee::Employee;
pub use finance::{FinanceKind, FinanceRecord, FinanceTotals};
pub use gallery::GalleryImage;
pub use product::{Product, StockStatus};
pub use report::{ClientReport, ServiceReport, SummaryReport};
pub use service::Service;
pub use user::{RegisterRequest, Role, User};
