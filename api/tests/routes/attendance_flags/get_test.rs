#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::{Router, http::StatusCode};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::helpers::app::{
        ANCHOR_LON, TestCtx, body_json, get_request, json_request, make_test_app, open_session,
        seed, token_for,
    };

    async fn flag_far_check_in(app: &Router, app_state: &util::state::AppState) -> TestCtx {
        let ctx = seed(app_state.db()).await;
        let session = open_session(app_state.db(), &ctx).await;
        let uri = format!(
            "/api/classes/{}/attendance/sessions/{}/check-in",
            ctx.class.id, session.id
        );
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token_for(&ctx.student)),
                json!({ "latitude": -25.7445, "longitude": ANCHOR_LON }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        ctx
    }

    #[tokio::test]
    #[serial]
    async fn test_list_flags_as_admin() {
        let (app, app_state) = make_test_app().await;
        let ctx = flag_far_check_in(&app, &app_state).await;

        let resp = app
            .oneshot(get_request("/api/attendance/flags", Some(&token_for(&ctx.admin))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Attendance flags retrieved");
        let flags = json["data"].as_array().unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0]["flag_type"], "out_of_range");
        assert_eq!(flags[0]["resolved"], false);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_flags_respects_limit() {
        let (app, app_state) = make_test_app().await;
        let ctx = flag_far_check_in(&app, &app_state).await;

        let resp = app
            .oneshot(get_request(
                "/api/attendance/flags?limit=0",
                Some(&token_for(&ctx.admin)),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // clamped up to one
        let json = body_json(resp).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_flags_forbidden_for_teacher() {
        let (app, app_state) = make_test_app().await;
        let ctx = flag_far_check_in(&app, &app_state).await;

        let resp = app
            .oneshot(get_request("/api/attendance/flags", Some(&token_for(&ctx.teacher))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Admin access required");
    }

    #[tokio::test]
    #[serial]
    async fn test_list_flags_requires_token() {
        let (app, _app_state) = make_test_app().await;

        let resp = app
            .oneshot(get_request("/api/attendance/flags", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
