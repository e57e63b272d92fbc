//! Administrator dashboard figures

use chrono::{Duration, Utc};

use crate::{
    error::AppResult,
    models::{
        dashboard::{loan_histogram, DashboardResponse, HISTOGRAM_DAYS, TRENDING_LIMIT},
        enums::{LoanStatus, RequestStatus},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_dashboard(&self) -> AppResult<DashboardResponse> {
        let today = Utc::now().date_naive();
        let since = today - Duration::days(HISTOGRAM_DAYS - 1);
        let repo = &self.repository;

        let (total_books, total_copies, total_users, active_loans, pending_requests, daily, trending_books) =
            tokio::try_join!(
                repo.books.count(),
                repo.copies.count(),
                repo.users.count(),
                repo.loans.count_by_status(LoanStatus::Borrowed),
                repo.requests.count_by_status(RequestStatus::Pending),
                repo.loans.daily_counts(since),
                repo.loans.trending(TRENDING_LIMIT),
            )?;

        Ok(DashboardResponse {
            total_books,
            total_copies,
            total_users,
            active_loans,
            pending_requests,
            loan_chart: loan_histogram(today, &daily),
            trending_books,
        })
    }
}
