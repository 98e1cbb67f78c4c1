//! Built-in standard objects. These seed the metadata set when no metadata
//! file is configured and keep the generator and filter crates honest in
//! tests without dragging the metadata administration surface into scope.

use serde_json::json;
use uuid::Uuid;

use crate::{
    FieldMetadata, FieldMetadataOption, FieldMetadataSettings, FieldMetadataType, NumberDataType,
    ObjectMetadata, RelationType,
};

fn field(name: &str, label: &str, r#type: FieldMetadataType) -> FieldMetadata {
    FieldMetadata {
        id: Uuid::new_v4(),
        name: name.to_string(),
        label: label.to_string(),
        description: None,
        r#type,
        is_nullable: true,
        default_value: None,
        options: Vec::new(),
        settings: None,
    }
}

fn server_assigned_fields() -> Vec<FieldMetadata> {
    let mut id = field("id", "Id", FieldMetadataType::Uuid);
    id.is_nullable = false;
    id.default_value = Some(json!("uuid"));

    let mut created_at = field("createdAt", "Creation date", FieldMetadataType::DateTime);
    created_at.is_nullable = false;
    created_at.default_value = Some(json!("now"));

    let mut updated_at = field("updatedAt", "Last update", FieldMetadataType::DateTime);
    updated_at.is_nullable = false;
    updated_at.default_value = Some(json!("now"));

    let deleted_at = field("deletedAt", "Deleted at", FieldMetadataType::DateTime);

    vec![id, created_at, updated_at, deleted_at]
}

fn relation(
    name: &str,
    label: &str,
    relation_type: RelationType,
    target_name_singular: &str,
) -> FieldMetadata {
    let mut f = field(name, label, FieldMetadataType::Relation);
    f.settings = Some(FieldMetadataSettings {
        relation_type: Some(relation_type),
        relation_target_name_singular: Some(target_name_singular.to_string()),
        ..Default::default()
    });
    f
}

/// The standard `person` object
pub fn person() -> ObjectMetadata {
    let mut name = field("name", "Name", FieldMetadataType::FullName);
    name.is_nullable = false;
    let name_id = name.id;

    let mut fields = server_assigned_fields();
    fields.extend([
        name,
        field("emails", "Emails", FieldMetadataType::Emails),
        field("phones", "Phones", FieldMetadataType::Phones),
        field("jobTitle", "Job title", FieldMetadataType::Text),
        field("city", "City", FieldMetadataType::Text),
        relation("company", "Company", RelationType::ManyToOne, "company"),
    ]);

    ObjectMetadata {
        id: Uuid::new_v4(),
        name_singular: "person".to_string(),
        name_plural: "people".to_string(),
        description: Some("A person".to_string()),
        label_identifier_field_metadata_id: Some(name_id),
        fields,
    }
}

/// The standard `company` object
pub fn company() -> ObjectMetadata {
    let mut name = field("name", "Name", FieldMetadataType::Text);
    name.is_nullable = false;
    let name_id = name.id;

    let mut employees = field("employees", "Employees", FieldMetadataType::Number);
    employees.settings = Some(FieldMetadataSettings {
        data_type: Some(NumberDataType::Int),
        ..Default::default()
    });

    let mut stage = field("stage", "Stage", FieldMetadataType::Select);
    stage.options = vec![
        FieldMetadataOption {
            value: "LEAD".to_string(),
            label: "Lead".to_string(),
            color: Some("blue".to_string()),
            position: 0,
        },
        FieldMetadataOption {
            value: "CUSTOMER".to_string(),
            label: "Customer".to_string(),
            color: Some("green".to_string()),
            position: 1,
        },
        FieldMetadataOption {
            value: "CHURNED".to_string(),
            label: "Churned".to_string(),
            color: Some("red".to_string()),
            position: 2,
        },
    ];

    let mut fields = server_assigned_fields();
    fields.extend([
        name,
        field("domainName", "Domain name", FieldMetadataType::Links),
        field("address", "Address", FieldMetadataType::Address),
        employees,
        stage,
        field(
            "annualRecurringRevenue",
            "ARR",
            FieldMetadataType::Currency,
        ),
        field(
            "idealCustomerProfile",
            "ICP",
            FieldMetadataType::Boolean,
        ),
        relation("people", "People", RelationType::OneToMany, "person"),
    ]);

    ObjectMetadata {
        id: Uuid::new_v4(),
        name_singular: "company".to_string(),
        name_plural: "companies".to_string(),
        description: Some("A company".to_string()),
        label_identifier_field_metadata_id: Some(name_id),
        fields,
    }
}

/// All built-in standard objects
pub fn standard_objects() -> Vec<ObjectMetadata> {
    vec![person(), company()]
}
