use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use services::attendance_flag_service::{AttendanceFlag, AttendanceFlagService};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiError, ApiResponse},
};

#[derive(Debug, Deserialize)]
pub struct ListFlagsQuery {
    /// Defaults to 50, capped at 200.
    pub limit: Option<u64>,
}

/// GET /api/attendance/flags?limit=50
///
/// Newest fraud flags across every session. Admin only.
pub async fn list_flags(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListFlagsQuery>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<AttendanceFlag>>>), ApiError> {
    let flags = AttendanceFlagService::recent_flags(state.db(), &user.actor(), query.limit).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(flags, "Attendance flags retrieved")),
    ))
}
