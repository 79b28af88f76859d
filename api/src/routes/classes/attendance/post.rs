use axum::{
    Extension, Json,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
};
use axum_extra::extract::TypedHeader;
use checkin::{CheckInAttempt, CheckInPolicy};
use chrono::Utc;
use headers::UserAgent;
use services::{
    attendance_session_service::AttendanceSessionService,
    check_in_service::{CheckInService, CheckInVerdict},
    leave_request_service::{LeaveRequest, LeaveRequestService},
};
use std::net::SocketAddr;
use util::{config, state::AppState};
use validator::Validate;

use super::common::{CheckInReq, CreateSessionReq, LeaveRequestReq, SessionResponse};
use crate::{
    auth::AuthUser,
    response::{ApiError, ApiResponse},
};

/// POST /api/classes/{class_id}/attendance/sessions
///
/// Creates a session. Class teacher or admin only.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Lecture 4",
///   "start_time": "2025-03-10T08:00:00Z",
///   "end_time": "2025-03-10T09:30:00Z",
///   "latitude": -25.7545,
///   "longitude": 28.2314,
///   "allowed_radius_meters": 100
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the session
/// - `400 Bad Request` (`validation_failed`, `invalid_coordinates`)
/// - `403 Forbidden`, `404 Not Found`
pub async fn create_session(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateSessionReq>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    body.validate().map_err(|e| ApiError::validation(&e))?;

    let session = AttendanceSessionService::create_session(
        state.db(),
        &user.actor(),
        class_id,
        body.into(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Attendance session created",
        )),
    ))
}

/// POST /api/classes/{class_id}/attendance/sessions/{session_id}/check-in
///
/// Checks the caller in. The device fingerprint comes from the body or, failing that,
/// the `User-Agent` header; the IP address is the connection peer. Omitted coordinates
/// are treated as "no GPS fix": the check-in is recorded with a location warning.
///
/// ### Responses
/// - `200 OK` with the verdict; `message` carries any warnings
/// - `403 Forbidden` (not enrolled), `404 Not Found`
/// - `409 Conflict` (`already_checked_in`)
/// - `422 Unprocessable Entity` (`window_not_open`, `window_closed`, `session_inactive`)
pub async fn check_in(
    State(state): State<AppState>,
    Path((class_id, session_id)): Path<(i64, i64)>,
    Extension(user): Extension<AuthUser>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<CheckInReq>,
) -> Result<(StatusCode, Json<ApiResponse<CheckInVerdict>>), ApiError> {
    let requested_at = Utc::now();
    body.validate().map_err(|e| ApiError::validation(&e))?;

    let session = AttendanceSessionService::find_in_class(state.db(), class_id, session_id).await?;

    let device_fingerprint = body
        .device_fingerprint
        .filter(|fp| !fp.trim().is_empty())
        .or_else(|| user_agent.map(|TypedHeader(ua)| ua.to_string()));

    let policy = CheckInPolicy::new(
        config::attendance_test_mode(),
        config::attendance_test_mode_distance_meters(),
    );

    let verdict = CheckInService::check_in(
        state.db(),
        policy,
        session.id,
        CheckInAttempt {
            student_id: user.0.sub,
            latitude: body.latitude.unwrap_or(0.0),
            longitude: body.longitude.unwrap_or(0.0),
            device_fingerprint,
            ip_address: Some(addr.ip().to_string()),
            requested_at,
        },
    )
    .await?;

    let message = verdict.message.clone();
    Ok((StatusCode::OK, Json(ApiResponse::success(verdict, message))))
}

/// POST /api/classes/{class_id}/attendance/sessions/{session_id}/leave-requests
///
/// Files a leave request for the caller. One per session.
pub async fn request_leave(
    State(state): State<AppState>,
    Path((class_id, session_id)): Path<(i64, i64)>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<LeaveRequestReq>,
) -> Result<(StatusCode, Json<ApiResponse<LeaveRequest>>), ApiError> {
    body.validate().map_err(|e| ApiError::validation(&e))?;

    let request = LeaveRequestService::request_leave(
        state.db(),
        &user.actor(),
        class_id,
        session_id,
        &body.reason,
        body.evidence_url.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(request, "Leave request submitted")),
    ))
}
