use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use services::attendance_session_service::{CreateSessionParams, SessionSummary};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub allowed_radius_meters: i32,
    pub active: bool,
    pub created_at: String,
}

impl From<db::models::attendance_session::Model> for SessionResponse {
    fn from(m: db::models::attendance_session::Model) -> Self {
        Self {
            id: m.id,
            class_id: m.class_id,
            created_by: m.created_by,
            name: m.name,
            description: m.description,
            start_time: m.start_time.to_rfc3339(),
            end_time: m.end_time.to_rfc3339(),
            latitude: m.latitude,
            longitude: m.longitude,
            allowed_radius_meters: m.allowed_radius_meters,
            active: m.active,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub summary: SessionSummary,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionReq {
    #[validate(length(min = 1, max = 100, message = "Session name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Omit both to use the class location; send `0, 0` to disable location checks.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[validate(range(min = 1, max = 100000, message = "Allowed radius must be between 1 and 100000 meters"))]
    pub allowed_radius_meters: Option<i32>,

    pub active: Option<bool>,
}

impl From<CreateSessionReq> for CreateSessionParams {
    fn from(req: CreateSessionReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            start_time: req.start_time,
            end_time: req.end_time,
            latitude: req.latitude,
            longitude: req.longitude,
            allowed_radius_meters: req.allowed_radius_meters,
            active: req.active,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckInReq {
    /// Missing when the device has no fix; checked in as an invalid location.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Falls back to the `User-Agent` header when absent.
    #[validate(length(max = 512, message = "Device fingerprint must be at most 512 characters"))]
    pub device_fingerprint: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LeaveRequestReq {
    #[validate(length(min = 1, max = 1000, message = "Reason must be between 1 and 1000 characters"))]
    pub reason: String,

    #[validate(url(message = "Evidence must be a valid URL"))]
    pub evidence_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewLeaveReq {
    /// `approved` or `rejected`.
    pub status: String,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}
