use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use model_error_response::ErrorResponse;
use record_filter::{append::append_filter_rule, storage::persist_rule, RecordFilter};
use uuid::Uuid;

use crate::api::{
    context::ApiContext,
    views::{load_filter_context, InnerErr},
};

/// Appends a new filter rule to a filter group, at the next sibling
/// position. The created rule targets the view's default field with that
/// field's default operand, and is returned so the caller can focus it.
#[utoipa::path(
        post,
        path = "/filter-rule-groups/{group_id}/filter-rules",
        operation_id = "create_filter_rule",
        params(
            ("group_id" = Uuid, Path, description = "The filter group to append to"),
        ),
        responses(
            (status = 200, body=RecordFilter),
            (status = 404, body=ErrorResponse),
            (status = 422, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
        )
    )]
#[tracing::instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<ApiContext>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<RecordFilter>, Response> {
    let fc = load_filter_context(&ctx, group_id).map_err(IntoResponse::into_response)?;

    let filter = append_filter_rule(&fc.group, fc.children.as_children(), fc.default_field.as_ref())
        .map_err(|e| InnerErr::from(e).into_response())?;

    persist_rule(ctx.store.as_ref(), &filter)
        .await
        .map_err(|e| InnerErr::from(e).into_response())?;

    Ok(Json(filter))
}
