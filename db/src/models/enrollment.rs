use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, Set};
use serde::Serialize;

/// A student's membership of a class. Inactive rows are kept for history but do not
/// allow check-in.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    pub active: bool,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn enroll(
        db: &DatabaseConnection,
        class_id: i64,
        student_id: i64,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            active: Set(true),
            enrolled_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn set_active(
        db: &DatabaseConnection,
        class_id: i64,
        student_id: i64,
        active: bool,
    ) -> Result<Model, DbErr> {
        let model = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Enrollment not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.active = Set(active);
        active_model.update(db).await
    }

    /// Whether the student holds an active enrollment in the class.
    pub async fn is_enrolled(
        db: &DatabaseConnection,
        class_id: i64,
        student_id: i64,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Active.eq(true))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_active(db: &DatabaseConnection, class_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Active.eq(true))
            .count(db)
            .await
    }
}
