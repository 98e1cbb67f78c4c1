//! The filter-tree endpoints: append a filter rule to a group, or append a
//! nested rule group to a root group. Both resolve the group, its children
//! and the owning view from the store, run the pure append operation, and
//! persist the outcome.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use model_error_response::ErrorResponse;
use model_metadata::FieldMetadata;
use record_filter::{operand::default_field_for_filter, AppendError, RecordFilterGroup};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    api::context::ApiContext,
    store::{ChildNodes, StoreError, View},
};

pub mod create_filter_rule;
pub mod create_filter_rule_group;

#[derive(Debug, Error)]
pub(crate) enum InnerErr {
    #[error("filter group not found")]
    UnknownGroup,
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Append(#[from] AppendError),
}

impl IntoResponse for InnerErr {
    fn into_response(self) -> Response {
        match self {
            InnerErr::UnknownGroup => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    message: "filter group not found",
                }),
            )
                .into_response(),
            InnerErr::Store(_e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "store unavailable",
                }),
            )
                .into_response(),
            InnerErr::Append(AppendError::NotARootGroup) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "rule groups can only be added to a root-level group",
                }),
            )
                .into_response(),
            InnerErr::Append(AppendError::MissingDefaultField) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    message: "missing default field metadata item for filter",
                }),
            )
                .into_response(),
            InnerErr::Append(AppendError::MissingView) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    message: "missing view",
                }),
            )
                .into_response(),
        }
    }
}

/// Everything the append operations need, loaded from the store in one go
pub(crate) struct FilterContext {
    pub group: RecordFilterGroup,
    pub children: ChildNodes,
    pub view: Option<View>,
    pub default_field: Option<FieldMetadata>,
}

pub(crate) fn load_filter_context(
    ctx: &ApiContext,
    group_id: Uuid,
) -> Result<FilterContext, InnerErr> {
    let group = ctx.store.group(group_id)?.ok_or(InnerErr::UnknownGroup)?;
    let children = ctx.store.children(group_id)?;
    let view = ctx.store.view_of_tree(&group)?;

    let default_field = view
        .as_ref()
        .and_then(|v| ctx.object_by_id(v.object_metadata_id))
        .and_then(default_field_for_filter)
        .cloned();

    Ok(FilterContext {
        group,
        children,
        view,
        default_field,
    })
}
