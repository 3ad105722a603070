// ── Finance record domain types ──
//
// Aggregates (revenue, expense, net profit) are always derived from the
// current record list, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FinanceKind {
    Revenue,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: u64,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: FinanceKind,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// Derived totals over a set of finance records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinanceTotals {
    pub revenue: f64,
    pub expense: f64,
}

impl FinanceTotals {
    pub fn from_records(records: &[FinanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            match record.kind {
                FinanceKind::Revenue => acc.revenue += record.amount,
                FinanceKind::Expense => acc.expense += record.amount,
            }
            acc
        })
    }

    pub fn net_profit(&self) -> f64 {
        self.revenue - self.expense
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(id: u64, amount: f64, kind: FinanceKind) -> FinanceRecord {
        FinanceRecord {
            id,
            title: format!("record-{id}"),
            amount,
            kind,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            note: None,
        }
    }

    #[test]
    fn totals_split_by_kind() {
        let records = vec![
            record(1, 150.0, FinanceKind::Revenue),
            record(2, 40.0, FinanceKind::Expense),
            record(3, 60.0, FinanceKind::Revenue),
        ];

        let totals = FinanceTotals::from_records(&records);
        assert!((totals.revenue - 210.0).abs() < f64::EPSILON);
        assert!((totals.expense - 40.0).abs() < f64::EPSILON);
        assert!((totals.net_profit() - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn totals_of_empty_list_are_zero() {
        let totals = FinanceTotals::from_records(&[]);
        assert!(totals.revenue.abs() < f64::EPSILON);
        assert!(totals.net_profit().abs() < f64::EPSILON);
    }
}
