#![allow(dead_code)]

use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
};
use chrono::{DateTime, Duration, Utc};
use db::models::attendance_session::{self, CreateAttendanceSession};
use db::models::{class, enrollment, user};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use util::{config::AppConfig, state::AppState};

pub const ANCHOR_LAT: f64 = -25.7545;
pub const ANCHOR_LON: f64 = 28.2314;
pub const CLIENT_IP: [u8; 4] = [203, 0, 113, 7];

/// Router mounted under `/api` on a fresh in-memory database.
///
/// Resets the attendance test mode, so callers that flip it must run `#[serial]`.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_attendance_test_mode(false);
    AppConfig::set_attendance_test_mode_distance_meters(5000);

    let app_state = AppState::new(setup_test_db().await);
    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}

pub struct TestCtx {
    pub teacher: user::Model,
    pub admin: user::Model,
    pub student: user::Model,
    pub classmate: user::Model,
    pub outsider: user::Model,
    pub class: class::Model,
}

/// A class located at the anchor with two enrolled students.
pub async fn seed(db: &DatabaseConnection) -> TestCtx {
    let teacher = user::Model::create(db, "lect", "Lecturer", "lect@test.com", None, false)
        .await
        .unwrap();
    let admin = user::Model::create(db, "admin", "Admin", "admin@test.com", None, true)
        .await
        .unwrap();
    let student = user::Model::create(
        db,
        "u00000001",
        "Student One",
        "one@test.com",
        Some("00000001"),
        false,
    )
    .await
    .unwrap();
    let classmate = user::Model::create(
        db,
        "u00000002",
        "Student Two",
        "two@test.com",
        Some("00000002"),
        false,
    )
    .await
    .unwrap();
    let outsider = user::Model::create(db, "outsider", "Outsider", "out@test.com", None, false)
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
    enrollment::Model::enroll(db, class.id, student.id).await.unwrap();
    enrollment::Model::enroll(db, class.id, classmate.id).await.unwrap();

    TestCtx {
        teacher,
        admin,
        student,
        classmate,
        outsider,
        class,
    }
}

/// Active one-hour session with a 100 m radius around the anchor.
pub async fn session_starting(
    db: &DatabaseConnection,
    ctx: &TestCtx,
    start: DateTime<Utc>,
) -> attendance_session::Model {
    attendance_session::Model::create(
        db,
        CreateAttendanceSession {
            class_id: ctx.class.id,
            created_by: ctx.teacher.id,
            name: "Lecture 1".to_string(),
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

/// A session that opened a minute ago.
pub async fn open_session(db: &DatabaseConnection, ctx: &TestCtx) -> attendance_session::Model {
    session_starting(db, ctx, Utc::now() - Duration::minutes(1)).await
}

pub fn token_for(user: &user::Model) -> String {
    generate_jwt(user.id, user.admin).unwrap().0
}

/// Attaches a `ConnectInfo<SocketAddr>`, as `into_make_service_with_connect_info` would.
pub fn with_connect_info(mut req: Request<Body>, ip: [u8; 4]) -> Request<Body> {
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::from(ip)), 43210);
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    with_connect_info(builder.body(Body::from(body.to_string())).unwrap(), CLIENT_IP)
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    with_connect_info(builder.body(Body::empty()).unwrap(), CLIENT_IP)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
