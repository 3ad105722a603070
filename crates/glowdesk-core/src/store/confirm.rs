// ── Destructive-action confirmation ──

/// Which entity collection a pending confirmation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum EntityKind {
    Booking,
    Service,
    Employee,
    Product,
    Finance,
    GalleryImage,
    Campaign,
    BusinessHours,
}

/// At most one confirmation is pending at a time; requesting a new one
/// replaces the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    None,
    /// Waiting for the user to confirm a delete.
    PendingDelete { entity: EntityKind, id: u64 },
    /// Waiting for the user to confirm discarding unsaved edits.
    PendingDiscard,
}

impl Confirmation {
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::None)
    }
}
