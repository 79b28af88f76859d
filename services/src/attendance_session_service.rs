use chrono::{DateTime, Utc};
use checkin::location;
use db::models::attendance_flag;
use db::models::attendance_record::{self, AttendanceStatus};
use db::models::attendance_session::{self, CreateAttendanceSession, Entity as SessionEntity};
use db::models::class::{self, Entity as ClassEntity};
use db::models::enrollment;
use db::models::leave_request;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use tracing::info;

use crate::{Actor, AttendanceError};

pub use db::models::attendance_session::Model as AttendanceSession;

const MAX_NAME_LEN: usize = 100;

/// Input for [`AttendanceSessionService::create_session`].
///
/// Omitted coordinates and radius fall back to the class defaults. A `(0, 0)` anchor
/// means the session does not check location.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub allowed_radius_meters: Option<i32>,
    pub active: Option<bool>,
}

/// Attendance counts for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: i64,
    pub total_students: u64,
    pub present: u64,
    pub late: u64,
    /// Approved leave for students who did not check in.
    pub excused: u64,
    pub absent: u64,
    pub leave_requests: u64,
    pub flagged: u64,
    /// Check-ins as a percentage of active enrolments.
    pub attendance_rate: f64,
}

/// A check-in record together with every flag raised on it.
#[derive(Debug, Clone, Serialize)]
pub struct RecordWithFlags {
    #[serde(flatten)]
    pub record: attendance_record::Model,
    pub flags: Vec<attendance_flag::Model>,
}

pub struct AttendanceSessionService;

impl AttendanceSessionService {
    pub(crate) async fn load_class(
        db: &DatabaseConnection,
        class_id: i64,
    ) -> Result<class::Model, AttendanceError> {
        ClassEntity::find_by_id(class_id)
            .one(db)
            .await?
            .ok_or_else(|| AttendanceError::not_found("Class"))
    }

    /// The class teacher or an admin.
    pub(crate) fn ensure_staff(class: &class::Model, actor: &Actor) -> Result<(), AttendanceError> {
        if actor.admin || class.is_teacher(actor.user_id) {
            Ok(())
        } else {
            Err(AttendanceError::Forbidden(
                "Only the class teacher or an admin may do this".to_string(),
            ))
        }
    }

    /// Loads a session and checks that it belongs to `class_id`.
    pub async fn find_in_class(
        db: &DatabaseConnection,
        class_id: i64,
        session_id: i64,
    ) -> Result<AttendanceSession, AttendanceError> {
        SessionEntity::find_by_id(session_id)
            .one(db)
            .await?
            .filter(|s| s.class_id == class_id)
            .ok_or_else(|| AttendanceError::not_found("Attendance session"))
    }

    /// Creates a session for a class.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the class does not exist.
    /// * `Forbidden` unless `actor` teaches the class or is an admin.
    /// * `ValidationFailed` for a blank name, `end <= start` or a non-positive radius.
    /// * `InvalidCoordinates` for a half-given or out-of-range anchor.
    pub async fn create_session(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        params: CreateSessionParams,
    ) -> Result<AttendanceSession, AttendanceError> {
        let class = Self::load_class(db, class_id).await?;
        Self::ensure_staff(&class, actor)?;

        let name = params.name.trim();
        if name.is_empty() {
            return Err(AttendanceError::ValidationFailed(
                "Session name is required".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AttendanceError::ValidationFailed(format!(
                "Session name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if params.end_time <= params.start_time {
            return Err(AttendanceError::ValidationFailed(
                "End time must be after start time".to_string(),
            ));
        }

        let radius = params
            .allowed_radius_meters
            .unwrap_or(class.allowed_distance_meters);
        if radius <= 0 {
            return Err(AttendanceError::ValidationFailed(
                "Allowed radius must be a positive number of meters".to_string(),
            ));
        }

        let anchor = match (params.latitude, params.longitude) {
            (None, None) => location::anchor(class.latitude, class.longitude),
            (Some(lat), Some(lon)) => {
                if location::round_coordinate(lat) == 0.0 && location::round_coordinate(lon) == 0.0 {
                    None
                } else {
                    Some(location::normalize(lat, lon).ok_or_else(|| {
                        AttendanceError::InvalidCoordinates(
                            "Latitude must be within ±90 and longitude within ±180".to_string(),
                        )
                    })?)
                }
            }
            _ => {
                return Err(AttendanceError::InvalidCoordinates(
                    "Latitude and longitude must be provided together".to_string(),
                ));
            }
        };

        let session = attendance_session::Model::create(
            db,
            CreateAttendanceSession {
                class_id,
                created_by: actor.user_id,
                name: name.to_string(),
                description: params
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                start_time: params.start_time,
                end_time: params.end_time,
                latitude: anchor.map(|a| a.latitude),
                longitude: anchor.map(|a| a.longitude),
                allowed_radius_meters: radius,
                active: params.active.unwrap_or(true),
            },
        )
        .await?;

        info!(
            session_id = session.id,
            class_id,
            created_by = actor.user_id,
            geofenced = anchor.is_some(),
            radius,
            "attendance session created"
        );
        Ok(session)
    }

    /// Sessions of a class, visible to staff and to actively enrolled students.
    pub async fn list_sessions(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
    ) -> Result<Vec<AttendanceSession>, AttendanceError> {
        let class = Self::load_class(db, class_id).await?;
        if Self::ensure_staff(&class, actor).is_err()
            && !enrollment::Model::is_enrolled(db, class_id, actor.user_id).await?
        {
            return Err(AttendanceError::Forbidden(
                "You are not a member of this class".to_string(),
            ));
        }

        Ok(attendance_session::Model::find_for_class(db, class_id).await?)
    }

    /// A session with its attendance counts. Staff only.
    pub async fn get_session(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        session_id: i64,
    ) -> Result<(AttendanceSession, SessionSummary), AttendanceError> {
        let class = Self::load_class(db, class_id).await?;
        Self::ensure_staff(&class, actor)?;
        let session = Self::find_in_class(db, class_id, session_id).await?;
        let summary = Self::summarize(db, &session).await?;
        Ok((session, summary))
    }

    pub async fn session_summary(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        session_id: i64,
    ) -> Result<SessionSummary, AttendanceError> {
        Ok(Self::get_session(db, actor, class_id, session_id).await?.1)
    }

    async fn summarize(
        db: &DatabaseConnection,
        session: &AttendanceSession,
    ) -> Result<SessionSummary, AttendanceError> {
        let total_students = enrollment::Model::count_active(db, session.class_id).await?;
        let present =
            attendance_record::Model::count_by_status(db, session.id, AttendanceStatus::Present)
                .await?;
        let late =
            attendance_record::Model::count_by_status(db, session.id, AttendanceStatus::Late)
                .await?;
        let flagged = attendance_record::Model::count_flagged(db, session.id).await?;
        let leave_requests = leave_request::Model::count_for_session(db, session.id, None).await?;

        let checked_in: Vec<i64> = attendance_record::Model::find_for_session(db, session.id)
            .await?
            .into_iter()
            .map(|r| r.student_id)
            .collect();
        let excused = leave_request::Model::approved_student_ids(db, session.id)
            .await?
            .into_iter()
            .filter(|id| !checked_in.contains(id))
            .count() as u64;

        let records = present + late;
        let absent = total_students.saturating_sub(records + excused);
        let attendance_rate = if total_students == 0 {
            0.0
        } else {
            records as f64 / total_students as f64 * 100.0
        };

        Ok(SessionSummary {
            session_id: session.id,
            total_students,
            present,
            late,
            excused,
            absent,
            leave_requests,
            flagged,
            attendance_rate,
        })
    }

    /// Every record of a session with its flags. Staff only.
    pub async fn session_records(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        session_id: i64,
    ) -> Result<Vec<RecordWithFlags>, AttendanceError> {
        let class = Self::load_class(db, class_id).await?;
        Self::ensure_staff(&class, actor)?;
        let session = Self::find_in_class(db, class_id, session_id).await?;

        let records = attendance_record::Model::find_for_session(db, session.id).await?;
        let mut flags = attendance_flag::Model::find_for_session(db, session.id).await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let (own, rest): (Vec<_>, Vec<_>) =
                    flags.drain(..).partition(|f| f.record_id == record.id);
                flags = rest;
                RecordWithFlags { record, flags: own }
            })
            .collect())
    }
}
