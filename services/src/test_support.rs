use chrono::{DateTime, Duration, Utc};
use db::models::attendance_session::{self, CreateAttendanceSession};
use db::models::{class, enrollment, user};
use sea_orm::DatabaseConnection;

use crate::Actor;

pub const ANCHOR_LAT: f64 = -25.7545;
pub const ANCHOR_LON: f64 = 28.2314;

pub struct Fixture {
    pub teacher: user::Model,
    pub admin: user::Model,
    pub outsider: user::Model,
    pub students: Vec<user::Model>,
    pub class: class::Model,
}

impl Fixture {
    pub fn teacher_actor(&self) -> Actor {
        Actor::new(self.teacher.id, false)
    }

    pub fn admin_actor(&self) -> Actor {
        Actor::new(self.admin.id, true)
    }

    pub fn student_actor(&self, index: usize) -> Actor {
        Actor::new(self.students[index].id, false)
    }

    pub fn outsider_actor(&self) -> Actor {
        Actor::new(self.outsider.id, false)
    }
}

/// A class taught by `teacher` with `student_count` enrolled students.
pub async fn fixture(db: &DatabaseConnection, student_count: usize) -> Fixture {
    let teacher = user::Model::create(db, "teacher", "Teacher", "teacher@example.com", None, false)
        .await
        .unwrap();
    let admin = user::Model::create(db, "admin", "Admin", "admin@example.com", None, true)
        .await
        .unwrap();
    let outsider = user::Model::create(db, "outsider", "Outsider", "outsider@example.com", None, false)
        .await
        .unwrap();
    let class = class::Model::create(
        db,
        "Software Engineering",
        "COS301",
        teacher.id,
        Some(ANCHOR_LAT),
        Some(ANCHOR_LON),
        150,
    )
    .await
    .unwrap();

    let mut students = Vec::new();
    for i in 0..student_count {
        let student = user::Model::create(
            db,
            &format!("u{:08}", i),
            &format!("Student {i}"),
            &format!("student{i}@example.com"),
            Some(&format!("{:08}", i)),
            false,
        )
        .await
        .unwrap();
        enrollment::Model::enroll(db, class.id, student.id).await.unwrap();
        students.push(student);
    }

    Fixture {
        teacher,
        admin,
        outsider,
        students,
        class,
    }
}

/// An active one-hour session anchored on the class location, starting at `start`.
pub async fn session_starting(
    db: &DatabaseConnection,
    fx: &Fixture,
    start: DateTime<Utc>,
) -> attendance_session::Model {
    attendance_session::Model::create(
        db,
        CreateAttendanceSession {
            class_id: fx.class.id,
            created_by: fx.teacher.id,
            name: "Lecture".to_string(),
            description: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            latitude: Some(ANCHOR_LAT),
            longitude: Some(ANCHOR_LON),
            allowed_radius_meters: 100,
            active: true,
        },
    )
    .await
    .unwrap()
}
