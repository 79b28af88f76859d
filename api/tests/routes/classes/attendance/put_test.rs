#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use db::models::leave_request::{Entity as LeaveEntity, LeaveStatus, Model as LeaveModel};
    use sea_orm::EntityTrait;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::helpers::app::{
        TestCtx, body_json, json_request, make_test_app, open_session, seed, token_for,
    };

    async fn pending_request(db: &sea_orm::DatabaseConnection, ctx: &TestCtx) -> LeaveModel {
        let session = open_session(db, ctx).await;
        LeaveModel::create(db, session.id, ctx.student.id, "Family emergency", None)
            .await
            .unwrap()
    }

    fn review_uri(class_id: i64, request_id: i64) -> String {
        format!("/api/classes/{class_id}/attendance/leave-requests/{request_id}")
    }

    #[tokio::test]
    #[serial]
    async fn test_review_leave_approve_as_teacher() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let request = pending_request(app_state.db(), &ctx).await;

        let resp = app
            .oneshot(json_request(
                "PUT",
                &review_uri(ctx.class.id, request.id),
                Some(&token_for(&ctx.teacher)),
                json!({ "status": "approved", "note": "Get well soon" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Leave request reviewed");
        assert_eq!(json["data"]["status"], "approved");
        assert_eq!(json["data"]["reviewed_by"], ctx.teacher.id);

        let stored = LeaveEntity::find_by_id(request.id)
            .one(app_state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, LeaveStatus::Approved);
        assert_eq!(stored.review_note.as_deref(), Some("Get well soon"));
        assert!(stored.reviewed_at.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_review_leave_status_is_case_insensitive() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let request = pending_request(app_state.db(), &ctx).await;

        let resp = app
            .oneshot(json_request(
                "PUT",
                &review_uri(ctx.class.id, request.id),
                Some(&token_for(&ctx.admin)),
                json!({ "status": "Rejected" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["status"], "rejected");
    }

    #[tokio::test]
    #[serial]
    async fn test_review_leave_rejects_unknown_status() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let request = pending_request(app_state.db(), &ctx).await;

        for status in ["maybe", "pending"] {
            let resp = app
                .clone()
                .oneshot(json_request(
                    "PUT",
                    &review_uri(ctx.class.id, request.id),
                    Some(&token_for(&ctx.teacher)),
                    json!({ "status": status }),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "status {status}");
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_review_leave_forbidden_for_student() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;
        let request = pending_request(app_state.db(), &ctx).await;

        let resp = app
            .oneshot(json_request(
                "PUT",
                &review_uri(ctx.class.id, request.id),
                Some(&token_for(&ctx.student)),
                json!({ "status": "approved" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_review_leave_missing_request_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let ctx = seed(app_state.db()).await;

        let resp = app
            .oneshot(json_request(
                "PUT",
                &review_uri(ctx.class.id, 4242),
                Some(&token_for(&ctx.teacher)),
                json!({ "status": "approved" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
