// ── Reactive store ──
//
// One slice per entity collection, each broadcasting its state through
// a `watch` channel. The [`Store`] registry owns them all over a shared
// [`glowdesk_api::ApiClient`].

mod slice;

pub mod auth;
pub mod booking_flow;
pub mod bookings;
pub mod business_hours;
pub mod campaigns;
pub mod confirm;
pub mod employees;
pub mod finances;
pub mod gallery;
pub mod products;
pub mod registry;
pub mod reports;
pub mod services;

pub use auth::{AuthSlice, AuthState};
pub use booking_flow::{BookingFlowSlice, BookingFlowState};
pub use bookings::BookingSlice;
pub use business_hours::BusinessHoursSlice;
pub use campaigns::CampaignSlice;
pub use confirm::{Confirmation, EntityKind};
pub use employees::EmployeeSlice;
pub use finances::FinanceSlice;
pub use gallery::{GallerySlice, MAX_IMAGE_BYTES};
pub use products::ProductSlice;
pub use registry::Store;
pub use reports::{ReportSlice, ReportsState};
pub use services::ServiceSlice;
pub use slice::SliceState;
