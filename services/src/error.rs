use checkin::CheckInError;
use sea_orm::DbErr;

/// Failure of an attendance operation.
///
/// [`code`](AttendanceError::code) is stable and safe to show to clients; the HTTP layer
/// chooses the status from the variant.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Attendance already recorded for this session")]
    AlreadyCheckedIn,

    #[error("Attendance session has not started yet")]
    WindowNotOpen,

    #[error("Attendance session has already ended")]
    WindowClosed,

    #[error("Attendance session is not active")]
    SessionInactive,

    #[error("{0}")]
    InvalidCoordinates(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl AttendanceError {
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceError::NotFound(_) => "not_found",
            AttendanceError::Forbidden(_) => "forbidden",
            AttendanceError::AlreadyCheckedIn => "already_checked_in",
            AttendanceError::WindowNotOpen => "window_not_open",
            AttendanceError::WindowClosed => "window_closed",
            AttendanceError::SessionInactive => "session_inactive",
            AttendanceError::InvalidCoordinates(_) => "invalid_coordinates",
            AttendanceError::ValidationFailed(_) => "validation_failed",
            AttendanceError::Conflict(_) => "conflict",
            AttendanceError::Database(_) => "database_error",
        }
    }

    pub(crate) fn not_found(what: &str) -> Self {
        AttendanceError::NotFound(format!("{what} not found"))
    }
}

impl From<DbErr> for AttendanceError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => AttendanceError::NotFound(msg),
            other => AttendanceError::Database(other),
        }
    }
}

impl From<CheckInError> for AttendanceError {
    fn from(err: CheckInError) -> Self {
        match err {
            CheckInError::NotEnrolled => AttendanceError::Forbidden(err.to_string()),
            CheckInError::AlreadyCheckedIn => AttendanceError::AlreadyCheckedIn,
            CheckInError::SessionInactive => AttendanceError::SessionInactive,
            CheckInError::WindowNotOpen => AttendanceError::WindowNotOpen,
            CheckInError::WindowClosed => AttendanceError::WindowClosed,
        }
    }
}
