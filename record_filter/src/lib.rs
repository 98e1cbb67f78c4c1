#![deny(missing_docs)]
//! This crate contains the record-filter tree model and the append
//! operations over it. A filter tree node is either a leaf predicate
//! ([RecordFilter]) or a boolean-logic grouping ([RecordFilterGroup]); every
//! node except the tree root belongs to exactly one parent group, and
//! sibling ordering is a dense integer position per sibling set.
//!
//! All persistence happens through the caller: the operations here are pure
//! and hand their outcome to the external upsert collaborators behind
//! [storage::RecordFilterStore].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod append;
pub mod operand;
pub mod storage;

pub use append::{AppendError, GroupAppended};
pub use operand::{FilterableFieldType, RecordFilterOperand};
pub use storage::RecordFilterStore;


/// How the children of a filter group combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOperator {
    /// all children must match
    And,
    /// any child may match
    Or,
}

/// A leaf predicate of the filter tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// unique id of this filter
    pub id: Uuid,
    /// the field this predicate applies to
    pub field_metadata_id: Uuid,
    /// the filter type derived from the field's metadata type
    #[serde(rename = "type")]
    pub filter_type: FilterableFieldType,
    /// the comparison operand
    pub operand: RecordFilterOperand,
    /// raw filter value
    pub value: String,
    /// user visible rendition of the value
    pub display_value: String,
    /// the parent group this filter belongs to
    pub record_filter_group_id: Uuid,
    /// ordering key within the parent group's children
    pub position_in_record_filter_group: i32,
    /// display label, taken from the field's metadata
    pub label: String,
    /// targeted sub field for composite field kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_field_name: Option<String>,
}

/// A boolean-logic grouping node of the filter tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilterGroup {
    /// unique id of this group
    pub id: Uuid,
    /// how this group's children combine
    pub logical_operator: LogicalOperator,
    /// the parent group; `None` for the tree root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_record_filter_group_id: Option<Uuid>,
    /// ordering key within the parent group's children
    pub position_in_record_filter_group: i32,
}

impl RecordFilterGroup {
    /// whether this group is the root of its filter tree
    pub fn is_root(&self) -> bool {
        self.parent_record_filter_group_id.is_none()
    }
}

/// The sibling sets of one group: its child filters and child sub-groups
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupChildren<'a> {
    /// leaf filters directly inside the group
    pub filters: &'a [RecordFilter],
    /// sub-groups directly inside the group
    pub groups: &'a [RecordFilterGroup],
}

impl GroupChildren<'_> {
    /// the highest position among the sibling set, 0 when the group is empty
    pub fn last_child_position(&self) -> i32 {
        let filters = self
            .filters
            .iter()
            .map(|f| f.position_in_record_filter_group);
        let groups = self
            .groups
            .iter()
            .map(|g| g.position_in_record_filter_group);
        filters.chain(groups).max().unwrap_or(0)
    }
}
