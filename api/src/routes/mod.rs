//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/classes/{class_id}/attendance` → sessions, check-in, records and leave requests (authenticated)
//! - `/attendance/flags` → fraud flag review and resolution (authenticated; listing is admin-only)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    attendance_flags::attendance_flag_routes, classes::attendance::attendance_routes,
    health::health_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance_flags;
pub mod classes;
pub mod health;

/// Builds the application router for all HTTP endpoints.
///
/// The returned router is mounted under `/api` by the binary and by the test harness.
/// Handlers that need the caller's address extract `ConnectInfo<SocketAddr>`, so the
/// service must be built with `into_make_service_with_connect_info`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest(
            "/classes/{class_id}/attendance",
            attendance_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest("/attendance/flags", attendance_flag_routes(app_state))
}
