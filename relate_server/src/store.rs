//! In-memory filter-tree store. Stands in for the external persistence
//! collaborators: it implements the upsert seam plus the read side the
//! handlers need (group lookup, children, owning view).

use std::collections::HashMap;
use std::sync::RwLock;

use record_filter::{
    GroupChildren, LogicalOperator, RecordFilter, RecordFilterGroup, RecordFilterStore,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;


/// A saved view over one object's records, owning one filter tree
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// unique id of this view
    pub id: Uuid,
    /// display name
    pub name: String,
    /// the object whose records this view lists
    pub object_metadata_id: Uuid,
    /// root group of the view's filter tree
    pub root_filter_group_id: Uuid,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
}

/// The owned sibling sets of one group, borrowable as [GroupChildren]
#[derive(Debug, Default)]
pub struct ChildNodes {
    pub filters: Vec<RecordFilter>,
    pub groups: Vec<RecordFilterGroup>,
}

impl ChildNodes {
    pub fn as_children(&self) -> GroupChildren<'_> {
        GroupChildren {
            filters: &self.filters,
            groups: &self.groups,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    views: Vec<View>,
    groups: HashMap<Uuid, RecordFilterGroup>,
    filters: HashMap<Uuid, RecordFilter>,
}

/// The in-memory store behind the filter endpoints
#[derive(Debug, Default)]
pub struct InMemoryFilterStore {
    inner: RwLock<Inner>,
}

impl InMemoryFilterStore {
    /// Create a view with an empty root filter group
    pub fn seed_view(&self, name: &str, object_metadata_id: Uuid) -> Result<View, StoreError> {
        let root = RecordFilterGroup {
            id: Uuid::new_v4(),
            logical_operator: LogicalOperator::And,
            parent_record_filter_group_id: None,
            position_in_record_filter_group: 0,
        };

        let view = View {
            id: Uuid::new_v4(),
            name: name.to_string(),
            object_metadata_id,
            root_filter_group_id: root.id,
        };

        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.groups.insert(root.id, root);
        inner.views.push(view.clone());

        Ok(view)
    }

    pub fn group(&self, id: Uuid) -> Result<Option<RecordFilterGroup>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.groups.get(&id).cloned())
    }

    /// The direct children of a group, in no particular order
    pub fn children(&self, group_id: Uuid) -> Result<ChildNodes, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;

        Ok(ChildNodes {
            filters: inner
                .filters
                .values()
                .filter(|f| f.record_filter_group_id == group_id)
                .cloned()
                .collect(),
            groups: inner
                .groups
                .values()
                .filter(|g| g.parent_record_filter_group_id == Some(group_id))
                .cloned()
                .collect(),
        })
    }

    /// The view owning the tree `group` belongs to: walk the parent chain to
    /// the root, then find the view rooted there.
    pub fn view_of_tree(&self, group: &RecordFilterGroup) -> Result<Option<View>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;

        let mut current = group.clone();
        // parent chains are short; the cap only guards against cycles
        for _ in 0..=inner.groups.len() {
            let Some(parent_id) = current.parent_record_filter_group_id else {
                let root_id = current.id;
                return Ok(inner
                    .views
                    .iter()
                    .find(|v| v.root_filter_group_id == root_id)
                    .cloned());
            };

            match inner.groups.get(&parent_id) {
                Some(parent) => current = parent.clone(),
                None => return Ok(None),
            }
        }

        Ok(None)
    }
}

impl RecordFilterStore for InMemoryFilterStore {
    type Err = StoreError;

    async fn upsert_record_filter(&self, filter: &RecordFilter) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.filters.insert(filter.id, filter.clone());
        Ok(())
    }

    async fn upsert_record_filter_group(&self, group: &RecordFilterGroup) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner.groups.insert(group.id, group.clone());
        Ok(())
    }
}
