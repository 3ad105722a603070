// ── Generic entity slice engine ──
//
// One authoritative in-memory copy of a server-backed collection plus
// its load/error state, broadcast through a `watch` channel. Every
// entity slice wraps one of these and layers its HTTP operations on top.

use std::collections::HashMap;

use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;

/// Observable state of one entity collection.
///
/// `current` holds a single fetched-by-id entity for detail views and is
/// independent of `items`. `error` and `field_errors` are separate slots:
/// a 422 validation failure never overwrites the generic error, and each
/// is clearable on its own.
#[derive(Debug, Clone)]
pub struct SliceState<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub field_errors: Option<HashMap<String, Vec<String>>>,
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            field_errors: None,
        }
    }
}

/// State holder shared by all entity slices.
///
/// Operations are not serialized against each other: two concurrent
/// fetches race and the last response to resolve wins. That race is
/// benign — each fetch replaces `items` wholesale — and is deliberately
/// left unguarded (no generation counter, no cancellation).
pub(crate) struct Slice<T: Clone + Send + Sync + 'static> {
    state: watch::Sender<SliceState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Slice<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(SliceState::default());
        Self { state }
    }

    // ── Read-operation transitions ───────────────────────────────────

    /// idle → loading. Clears the generic error; a fresh attempt starts
    /// with a clean banner. Field errors survive until explicitly cleared.
    pub(crate) fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// loading → success: replace `items` wholesale.
    pub(crate) fn finish_items(&self, items: Vec<T>) {
        self.state.send_modify(|s| {
            s.items = items;
            s.loading = false;
            s.error = None;
        });
    }

    /// loading → success for a fetch-by-id: sets `current` only.
    pub(crate) fn finish_current(&self, item: T) {
        self.state.send_modify(|s| {
            s.current = Some(item);
            s.loading = false;
            s.error = None;
        });
    }

    /// loading → error. `items` and `current` keep their last-known
    /// values — a failed refresh never blanks the list.
    pub(crate) fn fail(&self, message: String) {
        debug!("slice operation failed: {message}");
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(message);
        });
    }

    // ── Write-failure recording ──────────────────────────────────────

    /// Translate a write failure into state and hand back the error for
    /// re-throwing. Validation failures go to `field_errors` exclusively;
    /// everything else goes to the generic `error` slot.
    pub(crate) fn record_write_failure(&self, err: glowdesk_api::Error) -> CoreError {
        let err = CoreError::from(err);
        match &err {
            CoreError::Validation { errors } => {
                let errors = errors.clone();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.field_errors = Some(errors);
                });
            }
            other => self.fail(other.to_string()),
        }
        err
    }

    // ── Local mutations ──────────────────────────────────────────────

    /// Remove matching items in place (delete-without-refetch policy).
    pub(crate) fn remove_where(&self, pred: impl Fn(&T) -> bool) {
        self.state.send_modify(|s| s.items.retain(|item| !pred(item)));
    }

    /// Drop the detail-view entity.
    pub(crate) fn clear_current(&self) {
        self.state.send_modify(|s| s.current = None);
    }

    // ── Error-slot management ────────────────────────────────────────

    pub(crate) fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    pub(crate) fn clear_field_errors(&self) {
        self.state.send_modify(|s| s.field_errors = None);
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Clone of the current state.
    pub(crate) fn snapshot(&self) -> SliceState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<SliceState<T>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let slice: Slice<u32> = Slice::new();
        slice.fail("previous failure".into());
        slice.begin();

        let state = slice.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn finish_items_replaces_wholesale() {
        let slice: Slice<u32> = Slice::new();
        slice.finish_items(vec![1, 2, 3]);
        slice.finish_items(vec![9]);

        assert_eq!(slice.snapshot().items, vec![9]);
    }

    #[test]
    fn fail_keeps_last_known_items() {
        let slice: Slice<u32> = Slice::new();
        slice.finish_items(vec![1, 2]);
        slice.begin();
        slice.fail("offline".into());

        let state = slice.snapshot();
        assert_eq!(state.items, vec![1, 2]);
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert!(!state.loading);
    }

    #[test]
    fn validation_failure_spares_generic_error() {
        let slice: Slice<u32> = Slice::new();
        let err = glowdesk_api::Error::Validation {
            errors: [("name".to_owned(), vec!["Name is required".to_owned()])]
                .into_iter()
                .collect(),
        };
        let core_err = slice.record_write_failure(err);

        let state = slice.snapshot();
        assert!(state.error.is_none());
        assert_eq!(
            state.field_errors.unwrap()["name"],
            vec!["Name is required"]
        );
        assert!(core_err.validation_errors().is_some());
    }

    #[test]
    fn error_slots_clear_independently() {
        let slice: Slice<u32> = Slice::new();
        slice.fail("boom".into());
        let err = glowdesk_api::Error::Validation {
            errors: HashMap::new(),
        };
        let _ = slice.record_write_failure(err);

        slice.clear_field_errors();
        assert!(slice.snapshot().field_errors.is_none());
        assert!(slice.snapshot().error.is_some());

        slice.clear_error();
        assert!(slice.snapshot().error.is_none());
    }

    #[test]
    fn remove_where_preserves_relative_order() {
        let slice: Slice<u32> = Slice::new();
        slice.finish_items(vec![1, 2, 3]);
        slice.remove_where(|n| *n == 2);

        assert_eq!(slice.snapshot().items, vec![1, 3]);
    }
}
