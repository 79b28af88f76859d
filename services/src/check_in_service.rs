//! Student check-in: load what the engine needs, let it decide, persist the outcome.

use checkin::{CheckInAttempt, CheckInEngine, CheckInPolicy};
use db::models::attendance_flag::FlagType;
use db::models::attendance_record::{self, AttendanceStatus, NewCheckIn};
use db::models::attendance_session::Entity as SessionEntity;
use db::models::enrollment;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::AttendanceError;

/// What the student is told after a successful check-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInVerdict {
    pub success: bool,
    pub message: String,
    pub record_id: i64,
    pub status: AttendanceStatus,
    pub distance_meters: f64,
    pub flagged: bool,
    pub flags: Vec<FlagType>,
    pub warnings: Vec<String>,
}

pub struct CheckInService;

impl CheckInService {
    /// Checks a student in to a session.
    ///
    /// The decision is made against `attempt.requested_at` and the given `policy`; the
    /// record and its flags are written in one transaction. A concurrent duplicate that
    /// slips past the engine's check is caught by the unique index and reported the same
    /// way.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the session does not exist.
    /// * `Forbidden` if the student is not actively enrolled.
    /// * `AlreadyCheckedIn`, `SessionInactive`, `WindowNotOpen`, `WindowClosed` from the guards.
    pub async fn check_in(
        db: &DatabaseConnection,
        policy: CheckInPolicy,
        session_id: i64,
        attempt: CheckInAttempt,
    ) -> Result<CheckInVerdict, AttendanceError> {
        let session = SessionEntity::find_by_id(session_id)
            .one(db)
            .await?
            .ok_or_else(|| AttendanceError::not_found("Attendance session"))?;

        let enrolled =
            enrollment::Model::is_enrolled(db, session.class_id, attempt.student_id).await?;
        let existing = attendance_record::Model::prior_check_ins(db, session.id).await?;

        let decision = CheckInEngine::new(policy)
            .decide(&session.snapshot(), &attempt, enrolled, &existing)
            .map_err(|err| {
                warn!(
                    session_id,
                    student_id = attempt.student_id,
                    code = err.code(),
                    "check-in rejected"
                );
                AttendanceError::from(err)
            })?;

        let inserted = attendance_record::Model::insert_with_flags(
            db,
            NewCheckIn {
                session_id: session.id,
                student_id: attempt.student_id,
                device_fingerprint: attempt.device_fingerprint.as_deref(),
                ip_address: attempt.ip_address.as_deref(),
                checked_in_at: attempt.requested_at,
                decision: &decision,
            },
        )
        .await;

        let (record, flags) = match inserted {
            Ok(saved) => saved,
            Err(err) if db::is_unique_violation(&err) => {
                warn!(
                    session_id,
                    student_id = attempt.student_id,
                    "concurrent duplicate check-in rejected by unique index"
                );
                return Err(AttendanceError::AlreadyCheckedIn);
            }
            Err(err) => {
                error!(session_id, student_id = attempt.student_id, error = %err, "failed to store check-in");
                return Err(err.into());
            }
        };

        for flag in &flags {
            warn!(
                record_id = record.id,
                session_id,
                student_id = record.student_id,
                flag_type = %flag.flag_type,
                reason = %flag.reason,
                "check-in flagged"
            );
        }
        info!(
            record_id = record.id,
            session_id,
            student_id = record.student_id,
            status = %record.status,
            distance_meters = record.distance_meters,
            flagged = record.flagged,
            test_mode = policy.test_mode,
            "check-in recorded"
        );

        Ok(CheckInVerdict {
            success: true,
            message: decision.message(),
            record_id: record.id,
            status: record.status,
            distance_meters: record.distance_meters,
            flagged: record.flagged,
            flags: flags.iter().map(|f| f.flag_type).collect(),
            warnings: decision.warnings(),
        })
    }
}
