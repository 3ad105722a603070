// ── Store registry ──
//
// One struct owning every slice, all sharing one `ApiClient` (and thus
// one session cookie jar). Slices stay independent; nothing here
// coordinates between them except the shared confirmation slot.

use std::sync::Arc;

use glowdesk_api::ApiClient;
use tokio::sync::watch;

use super::auth::AuthSlice;
use super::booking_flow::BookingFlowSlice;
use super::bookings::BookingSlice;
use super::business_hours::BusinessHoursSlice;
use super::campaigns::CampaignSlice;
use super::confirm::{Confirmation, EntityKind};
use super::employees::EmployeeSlice;
use super::finances::FinanceSlice;
use super::gallery::GallerySlice;
use super::products::ProductSlice;
use super::reports::ReportSlice;
use super::services::ServiceSlice;

/// The application store: every entity slice plus the shared
/// confirmation slot.
pub struct Store {
    auth: AuthSlice,
    bookings: BookingSlice,
    booking_flow: BookingFlowSlice,
    business_hours: BusinessHoursSlice,
    campaigns: CampaignSlice,
    employees: EmployeeSlice,
    finances: FinanceSlice,
    gallery: GallerySlice,
    products: ProductSlice,
    reports: ReportSlice,
    services: ServiceSlice,
    confirmation: watch::Sender<Confirmation>,
}

impl Store {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (confirmation, _) = watch::channel(Confirmation::None);
        Self {
            auth: AuthSlice::new(Arc::clone(&api)),
            bookings: BookingSlice::new(Arc::clone(&api)),
            booking_flow: BookingFlowSlice::new(Arc::clone(&api)),
            business_hours: BusinessHoursSlice::new(Arc::clone(&api)),
            campaigns: CampaignSlice::new(Arc::clone(&api)),
            employees: EmployeeSlice::new(Arc::clone(&api)),
            finances: FinanceSlice::new(Arc::clone(&api)),
            gallery: GallerySlice::new(Arc::clone(&api)),
            products: ProductSlice::new(Arc::clone(&api)),
            reports: ReportSlice::new(Arc::clone(&api)),
            services: ServiceSlice::new(api),
            confirmation,
        }
    }

    // ── Slice accessors ──────────────────────────────────────────────

    pub fn auth(&self) -> &AuthSlice {
        &self.auth
    }

    pub fn bookings(&self) -> &BookingSlice {
        &self.bookings
    }

    pub fn booking_flow(&self) -> &BookingFlowSlice {
        &self.booking_flow
    }

    pub fn business_hours(&self) -> &BusinessHoursSlice {
        &self.business_hours
    }

    pub fn campaigns(&self) -> &CampaignSlice {
        &self.campaigns
    }

    pub fn employees(&self) -> &EmployeeSlice {
        &self.employees
    }

    pub fn finances(&self) -> &FinanceSlice {
        &self.finances
    }

    pub fn gallery(&self) -> &GallerySlice {
        &self.gallery
    }

    pub fn products(&self) -> &ProductSlice {
        &self.products
    }

    pub fn reports(&self) -> &ReportSlice {
        &self.reports
    }

    pub fn services(&self) -> &ServiceSlice {
        &self.services
    }

    // ── Confirmation slot ────────────────────────────────────────────

    /// Ask for confirmation before deleting an entity. Replaces any
    /// confirmation already pending.
    pub fn request_delete(&self, entity: EntityKind, id: u64) {
        self.confirmation
            .send_replace(Confirmation::PendingDelete { entity, id });
    }

    /// Ask for confirmation before discarding unsaved edits.
    pub fn request_discard(&self) {
        self.confirmation.send_replace(Confirmation::PendingDiscard);
    }

    pub fn pending_confirmation(&self) -> Confirmation {
        *self.confirmation.borrow()
    }

    /// Dismiss the pending confirmation (confirmed or cancelled; the
    /// caller performs the actual delete).
    pub fn clear_confirmation(&self) {
        self.confirmation.send_replace(Confirmation::None);
    }

    pub fn subscribe_confirmation(&self) -> watch::Receiver<Confirmation> {
        self.confirmation.subscribe()
    }
}
