//! The check-in decision.
//!
//! [`CheckInEngine::decide`] runs the guards in a fixed order (enrolment, existing record,
//! session active, time window) and then evaluates the geofence and shared-device signals.
//! It never writes anything; the returned [`Decision`] carries everything the caller must
//! persist for the record and its flags.

use tracing::debug;

use crate::error::CheckInError;
use crate::fingerprint::{self, DeviceMatch};
use crate::location::{self, Geofence};
use crate::policy::CheckInPolicy;
use crate::types::{AttendanceStatus, CheckInAttempt, Coordinates, FlagKind, PriorCheckIn, SessionSnapshot};
use crate::window;

/// Warning shown to the student when the device did not report a usable position.
pub const INVALID_LOCATION_WARNING: &str = "Could not obtain a valid location from your device";

/// A fraud flag produced by a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct RaisedFlag {
    pub kind: FlagKind,
    pub reason: String,
}

/// Result of a successful decision, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub status: AttendanceStatus,
    /// Submitted position after validation and rounding; `None` when it was not usable.
    pub coordinates: Option<Coordinates>,
    pub distance_meters: f64,
    /// Radius the distance was compared against, after test-mode override.
    pub effective_radius_meters: i32,
    pub out_of_range: bool,
    pub invalid_location: bool,
    pub shared_device: DeviceMatch,
    pub flags: Vec<RaisedFlag>,
}

impl Decision {
    pub fn flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Reasons of every raised flag joined for the record's summary column.
    pub fn flag_summary(&self) -> Option<String> {
        if self.flags.is_empty() {
            return None;
        }
        Some(
            self.flags
                .iter()
                .map(|f| f.reason.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Warnings surfaced to the student. Non-empty whenever the check-in was flagged or
    /// the location could not be verified.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.invalid_location {
            warnings.push(INVALID_LOCATION_WARNING.to_string());
        }
        if self.out_of_range {
            warnings.push(format!(
                "You are {:.0}m from the session location (allowed {}m)",
                self.distance_meters, self.effective_radius_meters
            ));
        }
        if self.shared_device.any() {
            warnings.push(self.shared_device.describe().to_string());
        }
        warnings
    }

    /// Student-facing message for the verdict.
    pub fn message(&self) -> String {
        let warnings = self.warnings();
        if warnings.is_empty() {
            "Checked in successfully".to_string()
        } else {
            format!("Checked in with warnings: {}", warnings.join("; "))
        }
    }
}

/// Decides check-ins under a fixed [`CheckInPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckInEngine {
    policy: CheckInPolicy,
}

impl CheckInEngine {
    pub fn new(policy: CheckInPolicy) -> Self {
        Self { policy }
    }

    /// Decides a check-in attempt.
    ///
    /// # Arguments
    ///
    /// * `session` - The session being checked in to.
    /// * `attempt` - What the student submitted, with the request time.
    /// * `enrolled` - Whether the student is actively enrolled in the session's class.
    /// * `existing` - Every record already stored for this session.
    ///
    /// # Errors
    ///
    /// Returns the first failing guard as a [`CheckInError`].
    pub fn decide(
        &self,
        session: &SessionSnapshot,
        attempt: &CheckInAttempt,
        enrolled: bool,
        existing: &[PriorCheckIn],
    ) -> Result<Decision, CheckInError> {
        if !enrolled {
            return Err(CheckInError::NotEnrolled);
        }
        if existing.iter().any(|r| r.student_id == attempt.student_id) {
            return Err(CheckInError::AlreadyCheckedIn);
        }
        if !session.active {
            return Err(CheckInError::SessionInactive);
        }
        let status = window::classify(attempt.requested_at, session)?;

        let effective_radius_meters = self.policy.effective_radius(session.allowed_radius_meters);
        let coordinates = location::normalize(attempt.latitude, attempt.longitude);
        let fence = Geofence::evaluate(
            location::anchor(session.anchor_latitude, session.anchor_longitude),
            coordinates,
            effective_radius_meters,
        );
        debug!(
            session_id = session.id,
            student_id = attempt.student_id,
            ?fence,
            "Evaluated geofence"
        );

        let shared_device = fingerprint::find_shared_device(
            attempt.student_id,
            attempt.device_fingerprint.as_deref(),
            attempt.ip_address.as_deref(),
            existing,
        );

        let distance_meters = fence.distance_meters();
        let out_of_range = fence.out_of_range();
        let invalid_location = fence.invalid_location();

        let mut flags = Vec::new();
        if !invalid_location {
            if out_of_range {
                flags.push(RaisedFlag {
                    kind: FlagKind::OutOfRange,
                    reason: format!(
                        "distance={:.2}m (allowed={}m)",
                        distance_meters, effective_radius_meters
                    ),
                });
            }
            if shared_device.any() {
                flags.push(RaisedFlag {
                    kind: FlagKind::DuplicateDevice,
                    reason: "Device or IP address shared with another student".to_string(),
                });
            }
        }

        Ok(Decision {
            status,
            coordinates,
            distance_meters,
            effective_radius_meters,
            out_of_range,
            invalid_location,
            shared_device,
            flags,
        })
    }
}
