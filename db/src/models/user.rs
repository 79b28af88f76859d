use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use serde::Serialize;

/// Represents a user in the `users` table.
///
/// Students and teachers share this table; who teaches what is recorded on
/// `classes.teacher_id`, who attends what on `enrollments`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    pub full_name: String,
    /// User's unique email address.
    pub email: String,
    /// Institutional student number, if the user is a student.
    pub student_code: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        full_name: &str,
        email: &str,
        student_code: Option<&str>,
        admin: bool,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            username: Set(username.to_owned()),
            full_name: Set(full_name.to_owned()),
            email: Set(email.to_owned()),
            student_code: Set(student_code.map(str::to_owned)),
            admin: Set(admin),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
