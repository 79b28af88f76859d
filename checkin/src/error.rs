//! Check-in rejection reasons.
//!
//! A [`CheckInError`] means the attempt was refused before anything was written. Every
//! variant maps to a stable [`code`](CheckInError::code) so outer layers can render a
//! specific message without matching on display strings.

/// Reasons a check-in attempt is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckInError {
    /// The student has no active enrolment in the session's class.
    #[error("Student is not enrolled in this class")]
    NotEnrolled,

    /// A record already exists for this student and session.
    #[error("Attendance already recorded for this session")]
    AlreadyCheckedIn,

    /// The session has been switched off by staff.
    #[error("Attendance session is not active")]
    SessionInactive,

    /// The attempt arrived before the session start time.
    #[error("Attendance session has not started yet")]
    WindowNotOpen,

    /// The attempt arrived after the session end time.
    #[error("Attendance session has already ended")]
    WindowClosed,
}

impl CheckInError {
    pub fn code(&self) -> &'static str {
        match self {
            CheckInError::NotEnrolled => "not_enrolled",
            CheckInError::AlreadyCheckedIn => "already_checked_in",
            CheckInError::SessionInactive => "session_inactive",
            CheckInError::WindowNotOpen => "window_not_open",
            CheckInError::WindowClosed => "window_closed",
        }
    }
}
