use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::attendance_session_service::{AttendanceSessionService, RecordWithFlags};
use util::state::AppState;

use super::common::{SessionDetailResponse, SessionResponse};
use crate::{
    auth::AuthUser,
    response::{ApiError, ApiResponse},
};

/// GET /api/classes/{class_id}/attendance/sessions
///
/// Sessions of the class, newest first. Visible to the class teacher, admins and
/// actively enrolled students.
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<SessionResponse>>>), ApiError> {
    let sessions =
        AttendanceSessionService::list_sessions(state.db(), &user.actor(), class_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            sessions.into_iter().map(SessionResponse::from).collect(),
            "Attendance sessions retrieved",
        )),
    ))
}

/// GET /api/classes/{class_id}/attendance/sessions/{session_id}
///
/// The session with its attendance summary. Class teacher or admin only.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3, "name": "Lecture 4", "...": "...",
///     "summary": { "total_students": 40, "present": 31, "late": 4, "excused": 1,
///                  "absent": 4, "leave_requests": 2, "flagged": 2, "attendance_rate": 87.5 }
///   },
///   "message": "Attendance session retrieved"
/// }
/// ```
pub async fn get_session(
    State(state): State<AppState>,
    Path((class_id, session_id)): Path<(i64, i64)>,
    Extension(user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<ApiResponse<SessionDetailResponse>>), ApiError> {
    let (session, summary) =
        AttendanceSessionService::get_session(state.db(), &user.actor(), class_id, session_id)
            .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionDetailResponse {
                session: SessionResponse::from(session),
                summary,
            },
            "Attendance session retrieved",
        )),
    ))
}

/// GET /api/classes/{class_id}/attendance/sessions/{session_id}/records
///
/// Every check-in of the session with its flags. Class teacher or admin only.
pub async fn list_session_records(
    State(state): State<AppState>,
    Path((class_id, session_id)): Path<(i64, i64)>,
    Extension(user): Extension<AuthUser>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<RecordWithFlags>>>), ApiError> {
    let records =
        AttendanceSessionService::session_records(state.db(), &user.actor(), class_id, session_id)
            .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(records, "Attendance records retrieved")),
    ))
}
