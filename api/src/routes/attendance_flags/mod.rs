//! `/attendance/flags` routes.
//!
//! - `GET /attendance/flags` → newest flags across all sessions (admin only)
//! - `PUT /attendance/flags/{flag_id}/resolve` → toggle a flag's resolved state
//!   (class teacher or admin, checked by the service)

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

mod get;
mod put;

pub use get::{ListFlagsQuery, list_flags};
pub use put::{ResolveFlagReq, ResolveFlagResponse, resolve_flag};

pub fn attendance_flag_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_flags).route_layer(from_fn(allow_admin)))
        .route(
            "/{flag_id}/resolve",
            put(resolve_flag).route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
