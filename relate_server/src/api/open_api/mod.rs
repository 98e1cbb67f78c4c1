//! Serves the generated OpenAPI documents. These describe the records held
//! by the workspace objects (core) and the metadata entities themselves
//! (metadata); both are distinct from this service's own `/docs` document.

use axum::{extract::State, Json};
use utoipa::openapi::OpenApi;

use crate::api::context::ApiContext;

/// The schema document of the records held by each workspace object
#[utoipa::path(
        get,
        path = "/open-api/core",
        operation_id = "open_api_core",
        responses(
            (status = 200, description = "An OpenAPI 3.1 document"),
        )
    )]
#[tracing::instrument(skip(ctx))]
pub async fn core_handler(State(ctx): State<ApiContext>) -> Json<OpenApi> {
    Json(open_api_schema::core_document(&ctx.objects))
}

/// The schema document of the object/field metadata entities
#[utoipa::path(
        get,
        path = "/open-api/metadata",
        operation_id = "open_api_metadata",
        responses(
            (status = 200, description = "An OpenAPI 3.1 document"),
        )
    )]
#[tracing::instrument]
pub async fn metadata_handler() -> Json<OpenApi> {
    Json(open_api_schema::metadata_document())
}
