//! Time window policy for a session.

use chrono::{DateTime, Duration, Utc};

use crate::error::CheckInError;
use crate::types::{AttendanceStatus, SessionSnapshot};

/// Minutes after the start time after which a check-in counts as late.
pub const LATE_THRESHOLD_MINUTES: i64 = 15;

/// Classifies a check-in made at `now`.
///
/// Both ends of the window are inclusive. A check-in exactly at the late threshold is
/// still on time.
pub fn classify(now: DateTime<Utc>, session: &SessionSnapshot) -> Result<AttendanceStatus, CheckInError> {
    if now < session.start_time {
        return Err(CheckInError::WindowNotOpen);
    }
    if now > session.end_time {
        return Err(CheckInError::WindowClosed);
    }

    if now > session.start_time + Duration::minutes(LATE_THRESHOLD_MINUTES) {
        Ok(AttendanceStatus::Late)
    } else {
        Ok(AttendanceStatus::Present)
    }
}
