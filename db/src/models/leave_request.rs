use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A student's request to be excused from one session.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub reason: String,
    /// Link to supporting evidence; stored as given.
    pub evidence_url: Option<String>,
    pub status: LeaveStatus,
    pub requested_at: DateTime<Utc>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_status_enum")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
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
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
        reason: &str,
        evidence_url: Option<&str>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            reason: Set(reason.to_owned()),
            evidence_url: Set(evidence_url.map(str::to_owned)),
            status: Set(LeaveStatus::Pending),
            requested_at: Set(Utc::now()),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            review_note: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn count_for_session(
        db: &DatabaseConnection,
        session_id: i64,
        status: Option<LeaveStatus>,
    ) -> Result<u64, DbErr> {
        let mut query = Entity::find().filter(Column::SessionId.eq(session_id));
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        query.count(db).await
    }

    /// Students whose leave for the session was approved.
    pub async fn approved_student_ids(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::Status.eq(LeaveStatus::Approved))
            .all(db)
            .await?
            .into_iter()
            .map(|r| r.student_id)
            .collect())
    }

    pub async fn review(
        db: &DatabaseConnection,
        request_id: i64,
        reviewer_id: i64,
        status: LeaveStatus,
        note: Option<&str>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(request_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Leave request not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.status = Set(status);
        active_model.reviewed_by = Set(Some(reviewer_id));
        active_model.reviewed_at = Set(Some(Utc::now()));
        active_model.review_note = Set(note.map(str::to_owned));
        active_model.update(db).await
    }
}
