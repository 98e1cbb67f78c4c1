use serde_json::{json, Value};

use super::*;

fn schemas_as_json() -> Value {
    let schemas = compute_metadata_schema_components(&standard_meta_entities());
    serde_json::to_value(&schemas).unwrap()
}

#[test]
fn both_entities_yield_singular_plural_and_variants() {
    let schemas = schemas_as_json();
    for name in [
        "Object",
        "Objects",
        "ObjectForUpdate",
        "ObjectForResponse",
        "ObjectsForResponse",
        "Field",
        "Fields",
        "FieldForUpdate",
        "FieldForResponse",
        "FieldsForResponse",
    ] {
        assert!(schemas.get(name).is_some(), "missing schema {name}");
    }
}

#[test]
fn plural_schemas_are_arrays_of_references() {
    let schemas = schemas_as_json();

    assert_eq!(schemas["Objects"]["type"], json!("array"));
    assert_eq!(
        schemas["Objects"]["items"]["$ref"],
        json!("#/components/schemas/Object")
    );
    assert_eq!(
        schemas["FieldsForResponse"]["items"]["$ref"],
        json!("#/components/schemas/FieldForResponse")
    );
}

#[test]
fn field_type_enum_covers_every_field_kind() {
    let schemas = schemas_as_json();
    let values = schemas["Field"]["properties"]["type"]["enum"]
        .as_array()
        .unwrap();

    assert!(values.contains(&json!("TEXT")));
    assert!(values.contains(&json!("MULTI_SELECT")));
    assert!(values.contains(&json!("TS_VECTOR")));
    assert_eq!(values.len(), 24);
}

#[test]
fn field_required_list_only_on_the_create_variant() {
    let schemas = schemas_as_json();

    let required = schemas["Field"]["required"].as_array().unwrap();
    for name in ["type", "name", "label", "objectMetadataId"] {
        assert!(required.contains(&json!(name)), "{name} not required");
    }

    assert!(schemas["FieldForUpdate"].get("required").is_none());
    assert!(schemas["FieldForResponse"].get("required").is_none());
}

#[test]
fn update_variants_drop_immutable_fields() {
    let schemas = schemas_as_json();

    let update = schemas["FieldForUpdate"]["properties"].as_object().unwrap();
    assert!(!update.contains_key("type"));
    assert!(!update.contains_key("objectMetadataId"));
    assert!(update.contains_key("label"));

    let object_update = schemas["ObjectForUpdate"]["properties"].as_object().unwrap();
    assert_eq!(
        object_update.keys().collect::<Vec<_>>(),
        vec!["isActive"]
    );
}

#[test]
fn response_variants_add_server_assigned_fields() {
    let schemas = schemas_as_json();

    for entity in ["ObjectForResponse", "FieldForResponse"] {
        let props = schemas[entity]["properties"].as_object().unwrap();
        assert_eq!(props["id"], json!({ "type": "string", "format": "uuid" }));
        assert_eq!(
            props["createdAt"],
            json!({ "type": "string", "format": "date-time" })
        );
        assert!(props.contains_key("isCustom"));
    }

    let fields = &schemas["ObjectForResponse"]["properties"]["fields"];
    assert_eq!(
        fields["properties"]["edges"]["properties"]["node"]["items"]["$ref"],
        json!("#/components/schemas/FieldForResponse")
    );
}
