//! Attendance use cases on top of the `db` models and the `checkin` engine.
//!
//! Every operation takes the database connection explicitly and returns an
//! [`AttendanceError`] on failure. Identity is passed in as an [`Actor`]; this crate does
//! not know about tokens or HTTP.

pub mod attendance_flag_service;
pub mod attendance_session_service;
pub mod check_in_service;
pub mod error;
pub mod leave_request_service;

pub use error::AttendanceError;

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub admin: bool,
}

impl Actor {
    pub fn new(user_id: i64, admin: bool) -> Self {
        Self { user_id, admin }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
