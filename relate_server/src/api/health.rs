use axum::{routing::get, Router};

#[utoipa::path(
        get,
        path = "/health",
        operation_id = "health",
        responses(
            (status = 200, body=String),
        )
    )]
pub async fn health_handler() -> String {
    "healthy".to_string()
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_handler))
}
