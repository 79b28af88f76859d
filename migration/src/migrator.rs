use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202505290001_create_users::Migration),
            Box::new(migrations::m202505290002_create_classes::Migration),
            Box::new(migrations::m202505290003_create_enrollments::Migration),
            Box::new(migrations::m202509080001_create_attendance::Migration),
            Box::new(migrations::m202509080002_create_leave_requests::Migration),
        ]
    }
}
