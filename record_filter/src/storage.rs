//! The seam to the external upsert collaborators. Implementations are
//! assumed idempotent on id. The drivers persist sequentially with no
//! atomicity between the two calls: a failure after the group upsert leaves
//! a partially created group behind.

use std::future::Future;

use crate::{append::GroupAppended, RecordFilter, RecordFilterGroup};

/// External collaborators persisting filter-tree nodes
pub trait RecordFilterStore {
    /// the error type returned from the store
    type Err;

    /// Create or replace a leaf filter
    fn upsert_record_filter(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;

    /// Create or replace a filter group
    fn upsert_record_filter_group(
        &self,
        group: &RecordFilterGroup,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// Persist an appended rule
pub async fn persist_rule<S: RecordFilterStore>(
    store: &S,
    filter: &RecordFilter,
) -> Result<(), S::Err> {
    store.upsert_record_filter(filter).await
}

/// Persist an appended rule group: group first, then its leaf filter
pub async fn persist_rule_group<S: RecordFilterStore>(
    store: &S,
    outcome: &GroupAppended,
) -> Result<(), S::Err> {
    store.upsert_record_filter_group(&outcome.group).await?;
    store.upsert_record_filter(&outcome.filter).await
}
