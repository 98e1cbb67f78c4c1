use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use model_error_response::ErrorResponse;
use record_filter::{
    append::{append_filter_rule_group, ViewRef},
    storage::persist_rule_group,
    RecordFilter, RecordFilterGroup,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::{
    context::ApiContext,
    views::{load_filter_context, InnerErr},
};

/// A nested rule group and the first rule created inside it
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRuleGroupResponse {
    pub record_filter_group: RecordFilterGroup,
    pub record_filter: RecordFilter,
}

/// Appends a nested rule group to a root-level filter group. The nested
/// group lands at the parent's next sibling position with one rule inside it
/// at position 1. The group is persisted before the rule; a rule persistence
/// failure leaves the group behind.
#[utoipa::path(
        post,
        path = "/filter-rule-groups/{group_id}/filter-rule-groups",
        operation_id = "create_filter_rule_group",
        params(
            ("group_id" = Uuid, Path, description = "The root filter group to append to"),
        ),
        responses(
            (status = 200, body=FilterRuleGroupResponse),
            (status = 400, body=ErrorResponse),
            (status = 404, body=ErrorResponse),
            (status = 422, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
        )
    )]
#[tracing::instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<ApiContext>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<FilterRuleGroupResponse>, Response> {
    let fc = load_filter_context(&ctx, group_id).map_err(IntoResponse::into_response)?;

    let current_view = fc.view.as_ref().map(|v| ViewRef { id: v.id });

    let outcome = append_filter_rule_group(
        &fc.group,
        fc.children.as_children(),
        fc.default_field.as_ref(),
        current_view,
    )
    .map_err(|e| InnerErr::from(e).into_response())?;

    persist_rule_group(ctx.store.as_ref(), &outcome)
        .await
        .map_err(|e| InnerErr::from(e).into_response())?;

    Ok(Json(FilterRuleGroupResponse {
        record_filter_group: outcome.group,
        record_filter: outcome.filter,
    }))
}
