//! `/classes/{class_id}/attendance` routes.
//!
//! Every route requires authentication (applied by the parent router). Authorization
//! (class teacher, admin or enrolled student) is decided by the service layer.

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

mod common;
mod get;
mod post;
mod put;

pub use common::{
    CheckInReq, CreateSessionReq, LeaveRequestReq, ReviewLeaveReq, SessionDetailResponse,
    SessionResponse,
};
pub use get::{get_session, list_session_records, list_sessions};
pub use post::{check_in, create_session, request_leave};
pub use put::review_leave;

pub fn attendance_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}/records", get(list_session_records))
        .route("/sessions/{session_id}/check-in", post(check_in))
        .route("/sessions/{session_id}/leave-requests", post(request_leave))
        .route("/leave-requests/{request_id}", put(review_leave))
        .with_state(app_state)
}
