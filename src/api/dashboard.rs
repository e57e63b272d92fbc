//! Administrator dashboard endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{dashboard::DashboardResponse, user::Authority},
};

use super::AuthenticatedUser;

/// Circulation figures for the administrator dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardResponse),
        (status = 403, description = "Missing DASHBOARD_VIEW authority")
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    claims.require(Authority::DashboardView)?;

    let dashboard = state.services.dashboard.get_dashboard().await?;
    Ok(Json(dashboard))
}
