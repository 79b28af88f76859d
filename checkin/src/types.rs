use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status resolved at check-in time. Excused/absent are derived later from leave
/// requests and missing records, never decided here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
}

/// Kinds of fraud flag a check-in can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    OutOfRange,
    DuplicateDevice,
    SuspiciousLocation,
    DuplicateIpAddress,
    Other,
}

/// A latitude/longitude pair in degrees, already validated and rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The parts of an attendance session the engine needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub anchor_latitude: Option<f64>,
    pub anchor_longitude: Option<f64>,
    pub allowed_radius_meters: i32,
    pub active: bool,
}

/// A single check-in submission as received from the student.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInAttempt {
    pub student_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub device_fingerprint: Option<String>,
    pub ip_address: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// A record that already exists for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorCheckIn {
    pub student_id: i64,
    pub device_fingerprint: Option<String>,
    pub ip_address: Option<String>,
}
