//! The append operations: add a filter rule to a group, or add a nested
//! rule group (with its first rule) to a root-level group. Both are pure;
//! the caller persists the outcome through [crate::storage::RecordFilterStore].

use model_metadata::FieldMetadata;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    operand::{default_sub_field_name, filter_type_for, operands_for},
    GroupChildren, LogicalOperator, RecordFilter, RecordFilterGroup,
};

#[cfg(test)]
mod tests;

/// Why an append operation was refused
#[derive(Debug, Error)]
pub enum AppendError {
    /// no filterable default field could be resolved for the object
    #[error("missing default field metadata item for filter")]
    MissingDefaultField,
    /// the group's root is not attached to any view
    #[error("missing view")]
    MissingView,
    /// rule groups can only be appended to the tree root
    #[error("rule groups can only be added to a root-level group")]
    NotARootGroup,
}

/// A nested group appended to a root group, together with the leaf filter
/// created inside it. Persist the group first, then the filter.
#[derive(Debug, Clone)]
pub struct GroupAppended {
    /// the new nested group
    pub group: RecordFilterGroup,
    /// the new leaf filter inside [Self::group], at position 1
    pub filter: RecordFilter,
}

/// Marker that a current view context exists. Only its presence matters to
/// the append operations; the caller resolves it from the group's tree root.
#[derive(Debug, Clone, Copy)]
pub struct ViewRef {
    /// id of the view owning the filter tree
    pub id: Uuid,
}

fn new_rule(
    parent_group_id: Uuid,
    position: i32,
    default_field: &FieldMetadata,
    with_sub_field: bool,
) -> Result<RecordFilter, AppendError> {
    let filter_type =
        filter_type_for(default_field.r#type).ok_or(AppendError::MissingDefaultField)?;

    // operand lists are non-empty for every filterable type
    let operand = operands_for(filter_type)[0];

    let sub_field_name = with_sub_field
        .then(|| default_sub_field_name(filter_type))
        .flatten()
        .map(str::to_string);

    Ok(RecordFilter {
        id: Uuid::new_v4(),
        field_metadata_id: default_field.id,
        filter_type,
        operand,
        value: String::new(),
        display_value: String::new(),
        record_filter_group_id: parent_group_id,
        position_in_record_filter_group: position,
        label: default_field.label.clone(),
        sub_field_name,
    })
}

/// Append a new leaf filter to `group`, at the next sibling position, using
/// the precomputed default field and the first available operand for that
/// field's filter type.
pub fn append_filter_rule(
    group: &RecordFilterGroup,
    children: GroupChildren<'_>,
    default_field: Option<&FieldMetadata>,
) -> Result<RecordFilter, AppendError> {
    let default_field = default_field.ok_or(AppendError::MissingDefaultField)?;
    let position = children.last_child_position() + 1;

    new_rule(group.id, position, default_field, true)
}

/// Append a new nested rule group to the root-level `group`: the nested
/// group lands at the parent's next sibling position, and one leaf filter is
/// created inside it at position 1.
pub fn append_filter_rule_group(
    group: &RecordFilterGroup,
    children: GroupChildren<'_>,
    default_field: Option<&FieldMetadata>,
    current_view: Option<ViewRef>,
) -> Result<GroupAppended, AppendError> {
    if !group.is_root() {
        return Err(AppendError::NotARootGroup);
    }

    let default_field = default_field.ok_or(AppendError::MissingDefaultField)?;
    current_view.ok_or(AppendError::MissingView)?;

    let nested = RecordFilterGroup {
        id: Uuid::new_v4(),
        logical_operator: LogicalOperator::And,
        parent_record_filter_group_id: Some(group.id),
        position_in_record_filter_group: children.last_child_position() + 1,
    };

    let filter = new_rule(nested.id, 1, default_field, false)?;

    Ok(GroupAppended {
        group: nested,
        filter,
    })
}
