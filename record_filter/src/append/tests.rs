use std::sync::Mutex;

use cool_asserts::assert_matches;
use uuid::Uuid;

use super::*;
use crate::{
    storage::{persist_rule_group, RecordFilterStore},
    GroupChildren, LogicalOperator, RecordFilterOperand,
};
use model_metadata::standard;

fn root_group() -> RecordFilterGroup {
    RecordFilterGroup {
        id: Uuid::new_v4(),
        logical_operator: LogicalOperator::And,
        parent_record_filter_group_id: None,
        position_in_record_filter_group: 1,
    }
}

fn rule_at(group_id: Uuid, position: i32) -> RecordFilter {
    RecordFilter {
        id: Uuid::new_v4(),
        field_metadata_id: Uuid::new_v4(),
        filter_type: crate::FilterableFieldType::Text,
        operand: RecordFilterOperand::Contains,
        value: String::new(),
        display_value: String::new(),
        record_filter_group_id: group_id,
        position_in_record_filter_group: position,
        label: "Name".to_string(),
        sub_field_name: None,
    }
}

#[test]
fn it_appends_after_existing_siblings() {
    let root = root_group();
    let filters = vec![
        rule_at(root.id, 1),
        rule_at(root.id, 2),
        rule_at(root.id, 3),
    ];
    let children = GroupChildren {
        filters: &filters,
        groups: &[],
    };

    let person = standard::person();
    let default_field = person.label_identifier_field();

    let rule = append_filter_rule(&root, children, default_field).unwrap();

    assert_eq!(rule.position_in_record_filter_group, 4);
    assert_eq!(rule.record_filter_group_id, root.id);
    assert_eq!(rule.field_metadata_id, default_field.unwrap().id);
    assert_eq!(rule.label, "Name");
    assert!(rule.value.is_empty());
    assert!(rule.display_value.is_empty());
}

#[test]
fn a_new_rule_starts_with_the_first_operand_and_default_sub_field() {
    let root = root_group();
    let company = standard::company();
    let arr = company
        .fields
        .iter()
        .find(|f| f.name == "annualRecurringRevenue");

    let rule = append_filter_rule(&root, GroupChildren::default(), arr).unwrap();

    assert_matches!(rule.filter_type, crate::FilterableFieldType::Currency);
    assert_matches!(rule.operand, RecordFilterOperand::GreaterThanOrEqual);
    assert_eq!(rule.sub_field_name.as_deref(), Some("amountMicros"));
    assert_eq!(rule.position_in_record_filter_group, 1);
}

#[test]
fn it_refuses_to_append_without_a_default_field() {
    let root = root_group();
    let res = append_filter_rule(&root, GroupChildren::default(), None);
    assert_matches!(res, Err(AppendError::MissingDefaultField));
}

#[test]
fn it_appends_a_rule_group_with_its_first_rule() {
    let root = root_group();
    let filters = vec![rule_at(root.id, 1), rule_at(root.id, 2)];
    let children = GroupChildren {
        filters: &filters,
        groups: &[],
    };

    let person = standard::person();
    let default_field = person.label_identifier_field();
    let view = ViewRef { id: Uuid::new_v4() };

    let outcome =
        append_filter_rule_group(&root, children, default_field, Some(view)).unwrap();

    assert_eq!(outcome.group.parent_record_filter_group_id, Some(root.id));
    assert_eq!(outcome.group.position_in_record_filter_group, 3);
    assert_matches!(outcome.group.logical_operator, LogicalOperator::And);

    assert_eq!(outcome.filter.record_filter_group_id, outcome.group.id);
    assert_eq!(outcome.filter.position_in_record_filter_group, 1);
    // the group path never targets a composite sub field
    assert_matches!(outcome.filter.sub_field_name, None);
}

#[test]
fn rule_groups_are_root_only() {
    let mut nested = root_group();
    nested.parent_record_filter_group_id = Some(Uuid::new_v4());

    let person = standard::person();
    let res = append_filter_rule_group(
        &nested,
        GroupChildren::default(),
        person.label_identifier_field(),
        Some(ViewRef { id: Uuid::new_v4() }),
    );
    assert_matches!(res, Err(AppendError::NotARootGroup));
}

#[test]
fn rule_groups_require_a_view() {
    let root = root_group();
    let person = standard::person();
    let res = append_filter_rule_group(
        &root,
        GroupChildren::default(),
        person.label_identifier_field(),
        None,
    );
    assert_matches!(res, Err(AppendError::MissingView));
}

#[derive(Debug, Default)]
struct DummyStore {
    log: Mutex<Vec<&'static str>>,
    fail_on_filter: bool,
}

impl RecordFilterStore for DummyStore {
    type Err = &'static str;

    async fn upsert_record_filter(&self, _filter: &RecordFilter) -> Result<(), Self::Err> {
        self.log.lock().unwrap().push("filter");
        if self.fail_on_filter {
            return Err("filter upsert failed");
        }
        Ok(())
    }

    async fn upsert_record_filter_group(
        &self,
        _group: &RecordFilterGroup,
    ) -> Result<(), Self::Err> {
        self.log.lock().unwrap().push("group");
        Ok(())
    }
}

#[tokio::test]
async fn persisting_a_rule_group_upserts_group_then_filter() {
    let root = root_group();
    let person = standard::person();
    let outcome = append_filter_rule_group(
        &root,
        GroupChildren::default(),
        person.label_identifier_field(),
        Some(ViewRef { id: Uuid::new_v4() }),
    )
    .unwrap();

    let store = DummyStore::default();
    persist_rule_group(&store, &outcome).await.unwrap();

    assert_eq!(*store.log.lock().unwrap(), ["group", "filter"]);
}

#[tokio::test]
async fn a_failed_filter_upsert_leaves_the_group_behind() {
    let root = root_group();
    let person = standard::person();
    let outcome = append_filter_rule_group(
        &root,
        GroupChildren::default(),
        person.label_identifier_field(),
        Some(ViewRef { id: Uuid::new_v4() }),
    )
    .unwrap();

    let store = DummyStore {
        fail_on_filter: true,
        ..Default::default()
    };
    let res = persist_rule_group(&store, &outcome).await;

    assert_matches!(res, Err("filter upsert failed"));
    // the group upsert already happened; no rollback is attempted
    assert_eq!(*store.log.lock().unwrap(), ["group", "filter"]);
}
