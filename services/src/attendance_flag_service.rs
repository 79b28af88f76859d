use db::models::attendance_flag::{self, Entity as FlagEntity};
use db::models::attendance_record::Entity as RecordEntity;
use db::models::attendance_session::Entity as SessionEntity;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

use crate::attendance_session_service::AttendanceSessionService;
use crate::{Actor, AttendanceError};

pub use db::models::attendance_flag::Model as AttendanceFlag;

pub const DEFAULT_RECENT_LIMIT: u64 = 50;
pub const MAX_RECENT_LIMIT: u64 = 200;

pub struct AttendanceFlagService;

impl AttendanceFlagService {
    /// Toggles a flag between resolved and unresolved and returns the new state.
    ///
    /// Allowed for the teacher of the flagged session's class and for admins. The record
    /// the flag belongs to is left unchanged.
    pub async fn resolve_flag(
        db: &DatabaseConnection,
        actor: &Actor,
        flag_id: i64,
        note: Option<&str>,
    ) -> Result<bool, AttendanceError> {
        let flag = FlagEntity::find_by_id(flag_id)
            .one(db)
            .await?
            .ok_or_else(|| AttendanceError::not_found("Flag"))?;

        if !actor.admin {
            let record = RecordEntity::find_by_id(flag.record_id)
                .one(db)
                .await?
                .ok_or_else(|| AttendanceError::not_found("Attendance record"))?;
            let session = SessionEntity::find_by_id(record.session_id)
                .one(db)
                .await?
                .ok_or_else(|| AttendanceError::not_found("Attendance session"))?;
            let class = AttendanceSessionService::load_class(db, session.class_id).await?;
            AttendanceSessionService::ensure_staff(&class, actor)?;
        }

        let updated = attendance_flag::Model::toggle_resolved(db, flag.id, note).await?;
        info!(
            flag_id = updated.id,
            record_id = updated.record_id,
            resolved = updated.resolved,
            by = actor.user_id,
            "attendance flag toggled"
        );
        Ok(updated.resolved)
    }

    /// Newest flags across every session, for admin review.
    pub async fn recent_flags(
        db: &DatabaseConnection,
        actor: &Actor,
        limit: Option<u64>,
    ) -> Result<Vec<AttendanceFlag>, AttendanceError> {
        if !actor.admin {
            return Err(AttendanceError::Forbidden(
                "Only admins may review all flags".to_string(),
            ));
        }
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);
        Ok(attendance_flag::Model::recent(db, limit).await?)
    }
}
