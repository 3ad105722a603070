// ── Business hours domain type ──

use serde::{Deserialize, Serialize};

/// Opening hours for one day of the week. When `is_closed` is set the
/// open/close times are null and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessHours {
    pub id: u64,
    pub day: String,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub is_closed: bool,
}

impl BusinessHours {
    /// The `(open, close)` pair, or `None` when the day is closed.
    pub fn open_window(&self) -> Option<(&str, &str)> {
        if self.is_closed {
            return None;
        }
        Some((self.open_time.as_deref()?, self.close_time.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_day_has_no_window() {
        let hours = BusinessHours {
            id: 1,
            day: "Sunday".into(),
            open_time: Some("09:00".into()),
            close_time: Some("17:00".into()),
            is_closed: true,
        };
        assert!(hours.open_window().is_none());
    }

    #[test]
    fn open_day_exposes_times() {
        let hours = BusinessHours {
            id: 2,
            day: "Monday".into(),
            open_time: Some("09:00".into()),
            close_time: Some("17:00".into()),
            is_closed: false,
        };
        assert_eq!(hours.open_window(), Some(("09:00", "17:00")));
    }
}
