pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::upload::{MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES};
use crate::{ai, analysis, auth, export, portfolios, templates, upload, versions};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handlers::handle_register))
        .route("/api/auth/login", post(auth::handlers::handle_login))
        .route("/api/auth/logout", post(auth::handlers::handle_logout))
        .route("/api/auth/me", get(auth::handlers::handle_me))
        .route("/api/auth/user", get(auth::handlers::handle_current_user))
        // Portfolios
        .route(
            "/api/portfolios",
            get(portfolios::handlers::handle_list_portfolios)
                .post(portfolios::handlers::handle_create_portfolio),
        )
        .route(
            "/api/portfolios/:id",
            get(portfolios::handlers::handle_get_portfolio)
                .patch(portfolios::handlers::handle_update_portfolio)
                .delete(portfolios::handlers::handle_delete_portfolio),
        )
        .route(
            "/api/public/portfolios/:slug",
            get(portfolios::handlers::handle_public_portfolio),
        )
        // Projects
        .route(
            "/api/portfolios/:id/projects",
            get(portfolios::projects::handle_list_projects)
                .post(portfolios::projects::handle_create_project),
        )
        .route(
            "/api/projects/:id",
            patch(portfolios::projects::handle_update_project)
                .delete(portfolios::projects::handle_delete_project),
        )
        // Templates
        .route("/api/templates", get(templates::handlers::handle_list_templates))
        .route("/api/templates/:id", get(templates::handlers::handle_get_template))
        // Versions
        .route(
            "/api/portfolios/:id/versions",
            get(versions::handlers::handle_list_versions)
                .post(versions::handlers::handle_create_version),
        )
        .route(
            "/api/portfolios/:id/versions/:version_id/revert",
            post(versions::handlers::handle_revert),
        )
        // Export
        .route("/api/portfolios/:id/export", get(export::handlers::handle_export))
        // Upload
        .route(
            "/api/upload",
            post(upload::handle_upload)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        // AI assist
        .route("/api/ai/generate-text", post(ai::handlers::handle_generate_text))
        .route(
            "/api/ai/content-improvements",
            post(ai::handlers::handle_content_improvements),
        )
        .route("/api/ai/templates", post(ai::handlers::handle_template_ideas))
        .route("/api/ai/translate", post(ai::handlers::handle_translate))
        // Analysis
        .route(
            "/api/analysis/performance",
            post(analysis::handlers::handle_performance),
        )
        .route(
            "/api/analysis/accessibility",
            post(analysis::handlers::handle_accessibility),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::for_tests(Arc::new(StubGenerator::replying("ok"))))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for (method, uri) in [
            ("GET", "/api/portfolios"),
            ("GET", "/api/auth/me"),
            ("POST", "/api/ai/generate-text"),
            ("POST", "/api/analysis/performance"),
            ("POST", "/api/upload"),
            (
                "GET",
                "/api/portfolios/00000000-0000-0000-0000-000000000000/export",
            ),
        ] {
            let response = app()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");

            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let response = app()
            .oneshot(
                Request::get("/api/portfolios")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid or expired token"
        );
    }

    #[tokio::test]
    async fn test_malformed_login_body_is_a_400() {
        let response = app()
            .oneshot(
                Request::post("/api/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_path_id_uses_error_envelope() {
        let response = app()
            .oneshot(
                Request::get("/api/templates/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }
}
