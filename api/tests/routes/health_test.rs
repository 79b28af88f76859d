#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::helpers::app::{body_json, get_request, make_test_app};

    #[tokio::test]
    #[serial]
    async fn test_health_check_is_public() {
        let (app, _state) = make_test_app().await;

        let resp = app.oneshot(get_request("/api/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }
}
