use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::context::ApiContext;

pub(crate) mod context;
mod health;
pub(crate) mod login;
pub(crate) mod oauth;
mod open_api;
mod swagger;
pub(crate) mod utils;
pub(crate) mod views;

pub async fn setup_and_serve(ctx: ApiContext, port: usize) -> anyhow::Result<()> {
    let cors = CorsLayer::permissive();

    let environment = ctx.environment;
    let app = api_router(ctx)
        .layer(cors.clone())
        .merge(health::router().layer(cors))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .context("unable to bind listen port")?;

    tracing::info!(
        "\n🔗 relate_server 🔗\nenvironment {:?}\nport: {}",
        environment,
        port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error starting service")
}

fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/login/google", get(login::google::handler))
        .route(
            "/oauth/google/callback",
            get(oauth::google_callback::handler),
        )
        .route("/open-api/core", get(open_api::core_handler))
        .route("/open-api/metadata", get(open_api::metadata_handler))
        .route(
            "/filter-rule-groups/:group_id/filter-rules",
            post(views::create_filter_rule::handler),
        )
        .route(
            "/filter-rule-groups/:group_id/filter-rule-groups",
            post(views::create_filter_rule_group::handler),
        )
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt; // for `collect`
    use model_metadata::standard::standard_objects;
    use relate_entrypoint::Environment;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::service::google_client::GoogleAuthClient;
    use crate::store::{InMemoryFilterStore, View};

    use super::*;

    fn test_context() -> (ApiContext, View) {
        let objects = standard_objects();
        let person_id = objects[0].id;

        let store = InMemoryFilterStore::default();
        let view = store.seed_view("All people", person_id).unwrap();

        let ctx = ApiContext {
            objects: Arc::new(objects),
            store: Arc::new(store),
            google_client: Arc::new(GoogleAuthClient::new(
                "client-id".to_string(),
                "client-secret".to_string(),
                "http://localhost:8080/oauth/google/callback".to_string(),
            )),
            base_url: "http://localhost:3000".parse().unwrap(),
            environment: Environment::Local,
        };

        (ctx, view)
    }

    async fn post_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_not_found() {
        let (ctx, _) = test_context();
        let response = api_router(ctx)
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn open_api_core_serves_generated_components() {
        let (ctx, _) = test_context();
        let response = api_router(ctx)
            .oneshot(
                Request::builder()
                    .uri("/open-api/core")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let document: Value = serde_json::from_slice(&bytes).unwrap();

        let schemas = document["components"]["schemas"].as_object().unwrap();
        assert!(schemas.contains_key("Person"));
        assert!(schemas.contains_key("CompanyForResponse"));
    }

    #[tokio::test]
    async fn appended_rules_take_successive_positions() {
        let (ctx, view) = test_context();
        let uri = format!(
            "/filter-rule-groups/{}/filter-rules",
            view.root_filter_group_id
        );

        let (status, first) = post_json(api_router(ctx.clone()), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["positionInRecordFilterGroup"], 1);
        // person's label identifier is the FullName name field
        assert_eq!(first["type"], "FULL_NAME");
        assert_eq!(first["operand"], "CONTAINS");
        assert_eq!(first["label"], "Name");

        let (status, second) = post_json(api_router(ctx), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["positionInRecordFilterGroup"], 2);
        assert_ne!(second["id"], first["id"]);
    }

    #[tokio::test]
    async fn appended_rule_group_nests_under_the_root() {
        let (ctx, view) = test_context();
        let root_id = view.root_filter_group_id;

        // one existing rule in the root, so the group lands at position 2
        let (status, _) = post_json(
            api_router(ctx.clone()),
            &format!("/filter-rule-groups/{root_id}/filter-rules"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            api_router(ctx.clone()),
            &format!("/filter-rule-groups/{root_id}/filter-rule-groups"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let group = &body["recordFilterGroup"];
        assert_eq!(group["parentRecordFilterGroupId"], root_id.to_string());
        assert_eq!(group["positionInRecordFilterGroup"], 2);
        assert_eq!(group["logicalOperator"], "AND");

        let filter = &body["recordFilter"];
        assert_eq!(filter["recordFilterGroupId"], group["id"]);
        assert_eq!(filter["positionInRecordFilterGroup"], 1);

        // nesting does not go deeper: appending a group to the nested group fails
        let nested_id = group["id"].as_str().unwrap();
        let (status, _) = post_json(
            api_router(ctx),
            &format!("/filter-rule-groups/{nested_id}/filter-rule-groups"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    async fn serve_google_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .unwrap()
        });
        format!("http://{addr}")
    }

    fn context_against(base: &str) -> ApiContext {
        let (mut ctx, _) = test_context();
        ctx.google_client = Arc::new(
            GoogleAuthClient::new(
                "client-id".to_string(),
                "client-secret".to_string(),
                "http://localhost:8080/oauth/google/callback".to_string(),
            )
            .with_endpoints(
                &format!("{base}/authorize"),
                &format!("{base}/token"),
                &format!("{base}/userinfo"),
            ),
        );
        ctx
    }

    #[tokio::test]
    async fn google_callback_sets_cookies_and_redirects_home() {
        let stub = Router::new()
            .route(
                "/token",
                axum::routing::post(|| async {
                    axum::Json(serde_json::json!({
                        "access_token": "access-token",
                        "refresh_token": "refresh-token",
                    }))
                }),
            )
            .route(
                "/userinfo",
                get(|| async {
                    axum::Json(serde_json::json!({
                        "sub": "google-user-1",
                        "email": "ada@example.com",
                        "given_name": "Ada",
                        "family_name": "Lovelace",
                    }))
                }),
            );
        let base = serve_google_stub(stub).await;

        let query = serde_urlencoded::to_string([
            ("code", "auth-code"),
            ("state", r#"{"action":"SIGN_UP"}"#),
        ])
        .unwrap();

        let response = api_router(context_against(&base))
            .oneshot(
                Request::builder()
                    .uri(format!("/oauth/google/callback?{query}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let cookies: Vec<_> = response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert!(cookies.iter().any(|c| c.starts_with("accessToken=access-token")));
        assert!(cookies.iter().any(|c| c.starts_with("refreshToken=refresh-token")));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("http://localhost:3000"));
    }

    #[tokio::test]
    async fn failed_token_exchange_is_an_internal_error() {
        let stub = Router::new().route(
            "/token",
            axum::routing::post(|| async {
                (StatusCode::BAD_GATEWAY, "temporarily unavailable")
            }),
        );
        let base = serve_google_stub(stub).await;

        let response = api_router(context_against(&base))
            .oneshot(
                Request::builder()
                    .uri("/oauth/google/callback?code=auth-code")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "unable to complete google login");
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let (ctx, _) = test_context();
        let (status, _) = post_json(
            api_router(ctx),
            &format!("/filter-rule-groups/{}/filter-rules", Uuid::new_v4()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detached_group_cannot_grow_a_rule_group() {
        let (ctx, _) = test_context();

        // a root group nobody's view points at
        let orphan = record_filter::RecordFilterGroup {
            id: Uuid::new_v4(),
            logical_operator: record_filter::LogicalOperator::And,
            parent_record_filter_group_id: None,
            position_in_record_filter_group: 0,
        };
        use record_filter::RecordFilterStore;
        ctx.store.upsert_record_filter_group(&orphan).await.unwrap();

        let (status, body) = post_json(
            api_router(ctx),
            &format!("/filter-rule-groups/{}/filter-rule-groups", orphan.id),
        )
        .await;
        // no view means no object to take a default field from
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["message"],
            "missing default field metadata item for filter"
        );
    }
}
