use db::models::enrollment;
use db::models::leave_request::{self, Entity as LeaveEntity, LeaveStatus};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

use crate::attendance_session_service::AttendanceSessionService;
use crate::{Actor, AttendanceError};

pub use db::models::leave_request::Model as LeaveRequest;

pub struct LeaveRequestService;

impl LeaveRequestService {
    /// Files a leave request for an actively enrolled student. One per session.
    pub async fn request_leave(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        session_id: i64,
        reason: &str,
        evidence_url: Option<&str>,
    ) -> Result<LeaveRequest, AttendanceError> {
        let session = AttendanceSessionService::find_in_class(db, class_id, session_id).await?;
        if !enrollment::Model::is_enrolled(db, class_id, actor.user_id).await? {
            return Err(AttendanceError::Forbidden(
                "Student is not enrolled in this class".to_string(),
            ));
        }

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AttendanceError::ValidationFailed(
                "A reason is required".to_string(),
            ));
        }
        let evidence_url = evidence_url.map(str::trim).filter(|u| !u.is_empty());

        match leave_request::Model::create(db, session.id, actor.user_id, reason, evidence_url).await
        {
            Ok(request) => {
                info!(
                    request_id = request.id,
                    session_id = session.id,
                    student_id = actor.user_id,
                    "leave requested"
                );
                Ok(request)
            }
            Err(err) if db::is_unique_violation(&err) => Err(AttendanceError::Conflict(
                "Leave already requested for this session".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Approves or rejects a request. Class teacher or admin only.
    pub async fn review_leave(
        db: &DatabaseConnection,
        actor: &Actor,
        class_id: i64,
        request_id: i64,
        status: LeaveStatus,
        note: Option<&str>,
    ) -> Result<LeaveRequest, AttendanceError> {
        if status == LeaveStatus::Pending {
            return Err(AttendanceError::ValidationFailed(
                "A review must approve or reject the request".to_string(),
            ));
        }

        let request = LeaveEntity::find_by_id(request_id)
            .one(db)
            .await?
            .ok_or_else(|| AttendanceError::not_found("Leave request"))?;
        let session =
            AttendanceSessionService::find_in_class(db, class_id, request.session_id).await?;
        let class = AttendanceSessionService::load_class(db, session.class_id).await?;
        AttendanceSessionService::ensure_staff(&class, actor)?;

        let note = note.map(str::trim).filter(|n| !n.is_empty());
        let reviewed =
            leave_request::Model::review(db, request.id, actor.user_id, status, note).await?;
        info!(
            request_id = reviewed.id,
            status = %reviewed.status,
            by = actor.user_id,
            "leave request reviewed"
        );
        Ok(reviewed)
    }
}
