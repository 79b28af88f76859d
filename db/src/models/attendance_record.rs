use chrono::{DateTime, Utc};
use checkin::{Decision, PriorCheckIn};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::attendance_flag;

/// One student's check-in to one session. Written once and never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    /// Submitted position rounded to six decimals; NULL when the device gave no usable fix.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_meters: f64,
    pub status: AttendanceStatus,
    pub device_fingerprint: Option<String>,
    pub ip_address: Option<String>,
    pub flagged: bool,
    /// Reasons of every flag raised at check-in, `"; "`-separated.
    pub flag_reason: Option<String>,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status_enum")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,

    #[sea_orm(string_value = "late")]
    Late,
}

impl From<checkin::AttendanceStatus> for AttendanceStatus {
    fn from(status: checkin::AttendanceStatus) -> Self {
        match status {
            checkin::AttendanceStatus::Present => AttendanceStatus::Present,
            checkin::AttendanceStatus::Late => AttendanceStatus::Late,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_session::Entity",
        from = "Column::SessionId",
        to = "super::attendance_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::attendance_flag::Entity")]
    Flags,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::attendance_flag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A decided check-in waiting to be written.
#[derive(Debug, Clone, Copy)]
pub struct NewCheckIn<'a> {
    pub session_id: i64,
    pub student_id: i64,
    pub device_fingerprint: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub checked_in_at: DateTime<Utc>,
    pub decision: &'a Decision,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl Model {
    /// Writes the record and all of its flags in one transaction.
    ///
    /// A second check-in for the same (session, student) fails on the unique index;
    /// see [`crate::is_unique_violation`]. Nothing is written when any insert fails.
    pub async fn insert_with_flags(
        db: &DatabaseConnection,
        new: NewCheckIn<'_>,
    ) -> Result<(Model, Vec<attendance_flag::Model>), DbErr> {
        let decision = new.decision;
        let txn = db.begin().await?;

        let record = ActiveModel {
            session_id: Set(new.session_id),
            student_id: Set(new.student_id),
            latitude: Set(decision.coordinates.map(|c| c.latitude)),
            longitude: Set(decision.coordinates.map(|c| c.longitude)),
            distance_meters: Set(decision.distance_meters),
            status: Set(decision.status.into()),
            device_fingerprint: Set(non_blank(new.device_fingerprint)),
            ip_address: Set(non_blank(new.ip_address)),
            flagged: Set(decision.flagged()),
            flag_reason: Set(decision.flag_summary()),
            checked_in_at: Set(new.checked_in_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut flags = Vec::with_capacity(decision.flags.len());
        for raised in &decision.flags {
            let flag = attendance_flag::ActiveModel {
                record_id: Set(record.id),
                flag_type: Set(raised.kind.into()),
                reason: Set(raised.reason.clone()),
                flagged_at: Set(new.checked_in_at),
                resolved: Set(false),
                resolution: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            flags.push(flag);
        }

        txn.commit().await?;
        Ok((record, flags))
    }

    pub async fn find_for_session(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::CheckedInAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Device and network identity of every check-in already stored for the session.
    pub async fn prior_check_ins(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<PriorCheckIn>, DbErr> {
        Ok(Self::find_for_session(db, session_id)
            .await?
            .iter()
            .map(Model::to_prior)
            .collect())
    }

    pub async fn count_by_status(
        db: &DatabaseConnection,
        session_id: i64,
        status: AttendanceStatus,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::Status.eq(status))
            .count(db)
            .await
    }

    pub async fn count_flagged(db: &DatabaseConnection, session_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::Flagged.eq(true))
            .count(db)
            .await
    }

    pub fn to_prior(&self) -> PriorCheckIn {
        PriorCheckIn {
            student_id: self.student_id,
            device_fingerprint: self.device_fingerprint.clone(),
            ip_address: self.ip_address.clone(),
        }
    }
}
