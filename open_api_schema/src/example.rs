//! Synthesized example payloads for the create-variant schemas. Values are
//! deterministic stand-ins shaped like each field kind's wire format.

use model_metadata::{FieldMetadata, FieldMetadataType, NumberDataType, ObjectMetadata};
use serde_json::{json, Value};

use crate::camel_to_title_case;

/// An example value shaped like the field's wire format
pub fn example_value(field: &FieldMetadata) -> Value {
    match field.r#type {
        FieldMetadataType::Uuid => json!("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
        FieldMetadataType::Text | FieldMetadataType::RichText => json!("Lorem ipsum"),
        FieldMetadataType::RichTextV2 => json!({
            "blocknote": "",
            "markdown": "Lorem ipsum",
        }),
        FieldMetadataType::DateTime => json!("2024-05-01T12:00:00.000Z"),
        FieldMetadataType::Date => json!("2024-05-01"),
        FieldMetadataType::Number => {
            let is_float = field
                .settings
                .as_ref()
                .map(|s| {
                    s.data_type == Some(NumberDataType::Float)
                        || s.decimals.is_some_and(|d| d > 0)
                })
                .unwrap_or(false);
            if is_float {
                json!(10.5)
            } else {
                json!(42)
            }
        }
        FieldMetadataType::Numeric | FieldMetadataType::Position => json!(1),
        FieldMetadataType::Boolean => json!(true),
        FieldMetadataType::RawJson => json!({ "key": "value" }),
        FieldMetadataType::Select | FieldMetadataType::Rating => field
            .options
            .first()
            .map(|o| json!(o.value))
            .unwrap_or(Value::Null),
        FieldMetadataType::MultiSelect => {
            let values: Vec<_> = field.options.iter().take(1).map(|o| &o.value).collect();
            json!(values)
        }
        FieldMetadataType::Currency => json!({
            "amountMicros": 100_000_000,
            "currencyCode": "USD",
        }),
        FieldMetadataType::FullName => json!({
            "firstName": "John",
            "lastName": "Doe",
        }),
        FieldMetadataType::Address => json!({
            "addressStreet1": "1 Infinite Loop",
            "addressStreet2": "",
            "addressCity": "Cupertino",
            "addressPostcode": "95014",
            "addressState": "CA",
            "addressCountry": "US",
            "addressLat": 37.33,
            "addressLng": -122.03,
        }),
        FieldMetadataType::Emails => json!({
            "primaryEmail": "john.doe@example.com",
            "additionalEmails": [],
        }),
        FieldMetadataType::Phones => json!({
            "primaryPhoneNumber": "5551234567",
            "primaryPhoneCallingCode": "+1",
            "primaryPhoneCountryCode": "US",
            "additionalPhones": [],
        }),
        FieldMetadataType::Links => json!({
            "primaryLinkLabel": "Website",
            "primaryLinkUrl": "https://www.example.com",
            "secondaryLinks": [],
        }),
        FieldMetadataType::Actor => json!({ "source": "MANUAL" }),
        FieldMetadataType::Array => json!(["value1", "value2"]),
        FieldMetadataType::Relation | FieldMetadataType::TsVector => Value::Null,
    }
}

/// The example block of an object's create variant. Required fields always
/// contribute; beyond those, only the `name` text field and the kinds with a
/// non-obvious wire shape are worth illustrating.
pub fn object_example(item: &ObjectMetadata) -> Value {
    let mut example = serde_json::Map::new();

    for field in &item.fields {
        if field.is_required() {
            example.insert(field.name.clone(), example_value(field));
            continue;
        }

        match field.r#type {
            FieldMetadataType::Text => {
                if field.name == "name" {
                    example.insert(
                        field.name.clone(),
                        json!(format!(
                            "{} name",
                            camel_to_title_case(&item.name_singular)
                        )),
                    );
                }
            }
            FieldMetadataType::Emails
            | FieldMetadataType::Links
            | FieldMetadataType::Currency
            | FieldMetadataType::FullName
            | FieldMetadataType::Select
            | FieldMetadataType::MultiSelect
            | FieldMetadataType::Phones => {
                example.insert(field.name.clone(), example_value(field));
            }
            _ => {}
        }
    }

    Value::Object(example)
}
