use chrono::{DateTime, Utc};
use checkin::SessionSnapshot;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// A time-boxed attendance session of a class.
///
/// The anchor (`latitude`/`longitude`) and `allowed_radius_meters` are fixed at creation.
/// A NULL anchor means the session does not check location at all.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub allowed_radius_meters: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
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
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Everything needed to insert a session. Values are stored as given; validation
/// happens in the service layer.
#[derive(Debug, Clone)]
pub struct CreateAttendanceSession {
    pub class_id: i64,
    pub created_by: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub allowed_radius_meters: i32,
    pub active: bool,
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        params: CreateAttendanceSession,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            class_id: Set(params.class_id),
            created_by: Set(params.created_by),
            name: Set(params.name),
            description: Set(params.description),
            start_time: Set(params.start_time),
            end_time: Set(params.end_time),
            latitude: Set(params.latitude),
            longitude: Set(params.longitude),
            allowed_radius_meters: Set(params.allowed_radius_meters),
            active: Set(params.active),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Sessions of a class, most recent start first.
    pub async fn find_for_class(
        db: &DatabaseConnection,
        class_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::StartTime)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// The view of this session the check-in engine decides against.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
            anchor_latitude: self.latitude,
            anchor_longitude: self.longitude,
            allowed_radius_meters: self.allowed_radius_meters,
            active: self.active,
        }
    }
}
