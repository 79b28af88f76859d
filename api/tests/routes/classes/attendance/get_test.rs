#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::models::leave_request::{LeaveStatus, Model as LeaveModel};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::helpers::app::{
        ANCHOR_LAT, ANCHOR_LON, body_json, get_request, json_request, make_test_app,
        open_session, seed, session_starting, token_for,
    };

    #[tokio::test]
    #[serial]
    async fn test_list_sessions_newest_first_for_enrolled_student() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let older = session_starting(app_state.db(), &ctx, Utc::now() - Duration::days(1)).await;
        let newer = open_session(app_state.db(), &ctx).await;

        let uri = format!("/api/classes/{}/attendance/sessions", ctx.class.id);
        let resp = app
            .oneshot(get_request(&uri, Some(&token_for(&ctx.student))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_sessions_forbidden_for_outsider() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;

        let uri = format!("/api/classes/{}/attendance/sessions", ctx.class.id);
        let resp = app
            .oneshot(get_request(&uri, Some(&token_for(&ctx.outsider))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_session_summary_after_check_ins() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let session = open_session(app_state.db(), &ctx).await;

        let check_in = format!(
            "/api/classes/{}/attendance/sessions/{}/check-in",
            ctx.class.id, session.id
        );
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                &check_in,
                Some(&token_for(&ctx.student)),
                json!({ "latitude": ANCHOR_LAT, "longitude": ANCHOR_LON }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let leave = LeaveModel::create(app_state.db(), session.id, ctx.classmate.id, "Sick", None)
            .await
            .unwrap();
        LeaveModel::review(
            app_state.db(),
            leave.id,
            ctx.teacher.id,
            LeaveStatus::Approved,
            None,
        )
        .await
        .unwrap();

        let uri = format!(
            "/api/classes/{}/attendance/sessions/{}",
            ctx.class.id, session.id
        );
        let resp = app
            .oneshot(get_request(&uri, Some(&token_for(&ctx.teacher))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["id"], session.id);
        let summary = &json["data"]["summary"];
        assert_eq!(summary["total_students"], 2);
        assert_eq!(summary["present"], 1);
        assert_eq!(summary["late"], 0);
        assert_eq!(summary["excused"], 1);
        assert_eq!(summary["absent"], 0);
        assert_eq!(summary["leave_requests"], 1);
        assert_eq!(summary["flagged"], 0);
        assert_eq!(summary["attendance_rate"], 50.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_session_forbidden_for_student() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let session = open_session(app_state.db(), &ctx).await;

        let uri = format!(
            "/api/classes/{}/attendance/sessions/{}",
            ctx.class.id, session.id
        );
        let resp = app
            .oneshot(get_request(&uri, Some(&token_for(&ctx.student))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_session_records_includes_flags() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let session = open_session(app_state.db(), &ctx).await;

        let check_in = format!(
            "/api/classes/{}/attendance/sessions/{}/check-in",
            ctx.class.id, session.id
        );
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                &check_in,
                Some(&token_for(&ctx.student)),
                json!({ "latitude": -25.7445, "longitude": ANCHOR_LON }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let uri = format!(
            "/api/classes/{}/attendance/sessions/{}/records",
            ctx.class.id, session.id
        );
        let resp = app
            .oneshot(get_request(&uri, Some(&token_for(&ctx.teacher))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let records = json["data"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["student_id"], ctx.student.id);
        assert_eq!(records[0]["flagged"], true);
        assert_eq!(records[0]["flags"][0]["flag_type"], "out_of_range");
        assert_eq!(records[0]["flags"][0]["resolved"], false);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_session_records_requires_token() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let session = open_session(app_state.db(), &ctx).await;

        let uri = format!(
            "/api/classes/{}/attendance/sessions/{}/records",
            ctx.class.id, session.id
        );
        let resp = app.oneshot(get_request(&uri, None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
