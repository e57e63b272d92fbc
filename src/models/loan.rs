//! Loan model, loan policy and overdue fine computation

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{enums::LoanStatus, fine::Fine};
use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
};

/// Loan row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookLoan {
    pub id: i32,
    pub user_id: i32,
    pub book_copy_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookLoan {
    /// Only BORROWED loans can be returned
    pub fn ensure_returnable(&self) -> AppResult<()> {
        match self.status {
            LoanStatus::Borrowed => Ok(()),
            LoanStatus::Returned => Err(AppError::AlreadyReturned(self.id)),
            LoanStatus::Rejected | LoanStatus::Nonreturnable => Err(AppError::AlreadyProcessed(
                format!("Loan {} is {} and cannot be returned", self.id, self.status),
            )),
        }
    }
}

/// Loan joined with borrower and title, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub book_copy_id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub is_overdue: bool,
}

/// What a return produced
#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnOutcome {
    pub loan: BookLoan,
    /// Overdue fine, when the book came back late
    pub fine: Option<Fine>,
    /// Subscribers told that the book is available again
    pub notified: u64,
}

/// Query parameters for a user's loan history
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    /// BORROWED, RETURNED, ... or ALL
    pub status: Option<String>,
}

/// Decode the loan history filter.
///
/// Missing, empty and `ALL` mean the whole history. Unrecognized values also
/// fall back to the whole history instead of failing; clients have long relied
/// on that.
pub fn loan_status_filter(raw: Option<&str>) -> Option<LoanStatus> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("ALL") => None,
        Some(s) => match s.parse::<LoanStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                tracing::debug!("Unrecognized loan status filter {:?}, listing all loans", s);
                None
            }
        },
    }
}

/// Fine produced by a late return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueFine {
    pub days: i64,
    pub amount: Decimal,
    pub description: String,
}

/// Loan duration and overdue penalty rules
#[derive(Debug, Clone)]
pub struct LoanPolicy {
    duration: Duration,
    daily_fine: Decimal,
}

impl LoanPolicy {
    pub fn new(duration_days: i64, daily_fine: i64) -> Self {
        Self {
            duration: Duration::days(duration_days),
            daily_fine: Decimal::from(daily_fine),
        }
    }

    pub fn due_date(&self, loan_date: DateTime<Utc>) -> DateTime<Utc> {
        loan_date + self.duration
    }

    /// Whole calendar days between due date and return date; time of day is ignored
    pub fn overdue_days(due_date: DateTime<Utc>, return_date: DateTime<Utc>) -> i64 {
        let due: NaiveDate = due_date.date_naive();
        let returned: NaiveDate = return_date.date_naive();
        returned.signed_duration_since(due).num_days()
    }

    /// Fine owed for a return at `return_date`, if any
    pub fn overdue_fine(
        &self,
        due_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Option<OverdueFine> {
        let days = Self::overdue_days(due_date, return_date);
        if days <= 0 {
            return None;
        }

        Some(OverdueFine {
            days,
            amount: self.daily_fine * Decimal::from(days),
            description: format!(
                "Overdue by {} day(s) (due date: {})",
                days,
                due_date.date_naive().format("%Y-%m-%d")
            ),
        })
    }
}

impl From<&LoansConfig> for LoanPolicy {
    fn from(config: &LoansConfig) -> Self {
        Self::new(config.duration_days, config.daily_fine)
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::from(&LoansConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn loan(status: LoanStatus) -> BookLoan {
        let now = Utc::now();
        BookLoan {
            id: 5,
            user_id: 1,
            book_copy_id: 9,
            loan_date: now,
            due_date: now,
            return_date: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_due_date_is_thirty_days_out() {
        let policy = LoanPolicy::default();
        assert_eq!(policy.due_date(at(2025, 1, 1, 10)), at(2025, 1, 31, 10));
    }

    #[test]
    fn test_same_day_or_early_return_has_no_fine() {
        let policy = LoanPolicy::default();
        let due = at(2025, 3, 10, 9);
        // Later in the day than the due time, but the same calendar day
        assert_eq!(policy.overdue_fine(due, at(2025, 3, 10, 23)), None);
        assert_eq!(policy.overdue_fine(due, at(2025, 3, 2, 8)), None);
    }

    #[test]
    fn test_three_days_late() {
        let policy = LoanPolicy::default();
        let due = at(2025, 3, 10, 18);
        let fine = policy.overdue_fine(due, at(2025, 3, 13, 1)).unwrap();
        assert_eq!(fine.days, 3);
        assert_eq!(fine.amount, Decimal::from(15000));
        assert!(fine.description.contains("3 day(s)"));
        assert!(fine.description.contains("2025-03-10"));
    }

    #[test]
    fn test_return_after_thirty_five_days() {
        let policy = LoanPolicy::default();
        let loaned = at(2025, 5, 1, 14);
        let due = policy.due_date(loaned);
        let returned = loaned + Duration::days(35);
        let fine = policy.overdue_fine(due, returned).unwrap();
        assert_eq!(fine.days, 5);
        assert_eq!(fine.amount, Decimal::from(25000));
    }

    #[test]
    fn test_configured_rate() {
        let policy = LoanPolicy::new(14, 250);
        let loaned = at(2025, 1, 1, 0);
        let due = policy.due_date(loaned);
        assert_eq!(due, at(2025, 1, 15, 0));
        let fine = policy.overdue_fine(due, at(2025, 1, 17, 12)).unwrap();
        assert_eq!(fine.amount, Decimal::from(500));
    }

    #[test]
    fn test_status_filter_fallbacks() {
        assert_eq!(loan_status_filter(None), None);
        assert_eq!(loan_status_filter(Some("")), None);
        assert_eq!(loan_status_filter(Some("ALL")), None);
        assert_eq!(loan_status_filter(Some("all")), None);
        assert_eq!(loan_status_filter(Some("bogus")), None);
        assert_eq!(loan_status_filter(Some("returned")), Some(LoanStatus::Returned));
        assert_eq!(loan_status_filter(Some("BORROWED")), Some(LoanStatus::Borrowed));
    }

    #[test]
    fn test_on_time_return_outcome_has_no_fine() {
        let outcome = ReturnOutcome {
            loan: loan(LoanStatus::Returned),
            fine: None,
            notified: 2,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["loan"]["status"], "RETURNED");
        assert!(json["fine"].is_null());
        assert_eq!(json["notified"], 2);
    }

    #[test]
    fn test_returnable_states() {
        assert!(loan(LoanStatus::Borrowed).ensure_returnable().is_ok());
        assert!(matches!(
            loan(LoanStatus::Returned).ensure_returnable(),
            Err(AppError::AlreadyReturned(5))
        ));
        assert!(matches!(
            loan(LoanStatus::Nonreturnable).ensure_returnable(),
            Err(AppError::AlreadyProcessed(_))
        ));
    }
}
