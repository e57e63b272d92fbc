//! Dashboard aggregates

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Days covered by the loan histogram, today included
pub const HISTOGRAM_DAYS: i64 = 7;

/// Number of titles in the trending list
pub const TRENDING_LIMIT: i64 = 5;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_books: i64,
    pub total_copies: i64,
    pub total_users: i64,
    pub active_loans: i64,
    pub pending_requests: i64,
    /// Loans started per day, oldest first
    pub loan_chart: Vec<ChartEntry>,
    pub trending_books: Vec<TrendingBook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChartEntry {
    /// Day label (dd/MM)
    pub date: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TrendingBook {
    pub id: i32,
    pub title: String,
    pub borrow_count: i64,
}

/// Build the per-day histogram ending at `today` from sparse (day, count) rows.
/// Days without loans get a zero entry.
pub fn loan_histogram(today: NaiveDate, counts: &[(NaiveDate, i64)]) -> Vec<ChartEntry> {
    (0..HISTOGRAM_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let value = counts
                .iter()
                .filter(|(d, _)| *d == day)
                .map(|(_, c)| *c)
                .sum();
            ChartEntry {
                date: day.format("%d/%m").to_string(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_histogram_is_zero_filled_oldest_first() {
        let chart = loan_histogram(day(3, 2), &[(day(3, 2), 4), (day(2, 26), 1)]);
        assert_eq!(chart.len(), 7);
        assert_eq!(chart[0], ChartEntry { date: "24/02".into(), value: 0 });
        assert_eq!(chart[2], ChartEntry { date: "26/02".into(), value: 1 });
        assert_eq!(chart[6], ChartEntry { date: "02/03".into(), value: 4 });
        assert_eq!(chart.iter().map(|e| e.value).sum::<i64>(), 5);
    }

    #[test]
    fn test_histogram_ignores_days_outside_window() {
        let chart = loan_histogram(day(3, 2), &[(day(2, 1), 9)]);
        assert!(chart.iter().all(|e| e.value == 0));
    }
}
