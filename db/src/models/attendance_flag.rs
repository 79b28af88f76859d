use chrono::{DateTime, Utc};
use checkin::FlagKind;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, JoinType, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::attendance_record;

/// A fraud signal attached to a check-in record.
///
/// Flags are inserted together with their record and never deleted. Staff only toggle
/// `resolved` (and may leave a `resolution` note); the record itself is unaffected.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_flags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub record_id: i64,
    pub flag_type: FlagType,
    pub reason: String,
    pub flagged_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolution: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_flag_type_enum")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FlagType {
    #[sea_orm(string_value = "out_of_range")]
    OutOfRange,

    #[sea_orm(string_value = "duplicate_device")]
    DuplicateDevice,

    #[sea_orm(string_value = "suspicious_location")]
    SuspiciousLocation,

    #[sea_orm(string_value = "duplicate_ip_address")]
    DuplicateIpAddress,

    #[sea_orm(string_value = "other")]
    Other,
}

impl From<FlagKind> for FlagType {
    fn from(kind: FlagKind) -> Self {
        match kind {
            FlagKind::OutOfRange => FlagType::OutOfRange,
            FlagKind::DuplicateDevice => FlagType::DuplicateDevice,
            FlagKind::SuspiciousLocation => FlagType::SuspiciousLocation,
            FlagKind::DuplicateIpAddress => FlagType::DuplicateIpAddress,
            FlagKind::Other => FlagType::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_record::Entity",
        from = "Column::RecordId",
        to = "super::attendance_record::Column::Id"
    )]
    Record,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Record.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_for_record(
        db: &DatabaseConnection,
        record_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::RecordId.eq(record_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Every flag raised on any record of the session.
    pub async fn find_for_session(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .join(JoinType::InnerJoin, Relation::Record.def())
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Most recently raised flags across all sessions, newest first.
    pub async fn recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::FlaggedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    /// Flips `resolved`. A provided note replaces the stored resolution; without one the
    /// previous note is kept.
    pub async fn toggle_resolved(
        db: &DatabaseConnection,
        flag_id: i64,
        note: Option<&str>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(flag_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Flag not found".to_string()))?;

        let resolved = !model.resolved;
        let mut active_model: ActiveModel = model.into();
        active_model.resolved = Set(resolved);
        if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
            active_model.resolution = Set(Some(note.to_owned()));
        }
        active_model.update(db).await
    }
}
