use serde::{Deserialize, Serialize};

/// Radius applied to every session while test mode is on.
pub const DEFAULT_TEST_MODE_RADIUS_METERS: i32 = 5000;

/// Deployment-wide knobs that change how a decision is made.
///
/// Test mode lets demos and QA check in without real GPS precision. It widens the
/// allowed radius for every session; distance is still measured and enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInPolicy {
    pub test_mode: bool,
    pub test_mode_radius_meters: i32,
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self {
            test_mode: false,
            test_mode_radius_meters: DEFAULT_TEST_MODE_RADIUS_METERS,
        }
    }
}

impl CheckInPolicy {
    pub fn new(test_mode: bool, test_mode_radius_meters: i32) -> Self {
        Self {
            test_mode,
            test_mode_radius_meters,
        }
    }

    /// Radius the geofence is checked against for a session configured with `session_radius`.
    pub fn effective_radius(&self, session_radius: i32) -> i32 {
        if self.test_mode {
            self.test_mode_radius_meters
        } else {
            session_radius
        }
    }
}
