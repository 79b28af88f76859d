use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::leave_request::LeaveStatus;
use services::AttendanceError;
use services::leave_request_service::{LeaveRequest, LeaveRequestService};
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

use super::common::ReviewLeaveReq;
use crate::{
    auth::AuthUser,
    response::{ApiError, ApiResponse},
};

/// PUT /api/classes/{class_id}/attendance/leave-requests/{request_id}
///
/// Approves or rejects a leave request. Class teacher or admin only.
///
/// ### Request Body
/// ```json
/// { "status": "approved", "note": "Doctor's note received" }
/// ```
pub async fn review_leave(
    State(state): State<AppState>,
    Path((class_id, request_id)): Path<(i64, i64)>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ReviewLeaveReq>,
) -> Result<(StatusCode, Json<ApiResponse<LeaveRequest>>), ApiError> {
    body.validate().map_err(|e| ApiError::validation(&e))?;

    let status = LeaveStatus::from_str(body.status.trim()).map_err(|_| {
        AttendanceError::ValidationFailed("Status must be 'approved' or 'rejected'".to_string())
    })?;

    let reviewed = LeaveRequestService::review_leave(
        state.db(),
        &user.actor(),
        class_id,
        request_id,
        status,
        body.note.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(reviewed, "Leave request reviewed")),
    ))
}
