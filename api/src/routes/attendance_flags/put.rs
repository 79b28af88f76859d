use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use services::attendance_flag_service::AttendanceFlagService;
use util::state::AppState;
use validator::Validate;

use crate::{
    auth::AuthUser,
    response::{ApiError, ApiResponse},
};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ResolveFlagReq {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Resolution note must be at most 1000 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveFlagResponse {
    pub flag_id: i64,
    pub resolved: bool,
}

/// PUT /api/attendance/flags/{flag_id}/resolve
///
/// Toggles the flag between resolved and unresolved. A non-empty `note` replaces the
/// stored resolution text.
///
/// ### Responses
/// - `200 OK` with `{ "flag_id": 7, "resolved": true }`
/// - `403 Forbidden` when the caller does not teach the flagged session's class
/// - `404 Not Found`
pub async fn resolve_flag(
    State(state): State<AppState>,
    Path(flag_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ResolveFlagReq>,
) -> Result<(StatusCode, Json<ApiResponse<ResolveFlagResponse>>), ApiError> {
    body.validate().map_err(|e| ApiError::validation(&e))?;

    let resolved =
        AttendanceFlagService::resolve_flag(state.db(), &user.actor(), flag_id, body.note.as_deref())
            .await?;

    let message = if resolved {
        "Flag marked as resolved"
    } else {
        "Flag reopened"
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            ResolveFlagResponse { flag_id, resolved },
            message,
        )),
    ))
}
