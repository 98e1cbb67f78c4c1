//! Per-object schema components. Each object metadata item yields three
//! variants: `<Name>` (create payload), `<Name>ForUpdate` and
//! `<Name>ForResponse`.

use std::collections::BTreeMap;

use model_metadata::{
    capitalize, FieldMetadata, FieldMetadataType, NumberDataType, ObjectMetadata, RelationType,
};
use utoipa::openapi::{
    schema::{ArrayBuilder, KnownFormat, ObjectBuilder, OneOfBuilder, SchemaFormat, Type},
    Ref, RefOr, Schema,
};

use crate::example;


fn typed(schema_type: Type) -> ObjectBuilder {
    ObjectBuilder::new().schema_type(schema_type)
}

fn formatted(schema_type: Type, format: KnownFormat) -> ObjectBuilder {
    typed(schema_type).format(Some(SchemaFormat::KnownFormat(format)))
}

fn uuid_schema() -> Schema {
    Schema::Object(formatted(Type::String, KnownFormat::Uuid).build())
}

fn string_enum(values: Vec<&str>) -> ObjectBuilder {
    typed(Type::String).enum_values(Some(values))
}

/// The scalar mapping of [FieldMetadataType]s that do not have a composite
/// wire shape. Everything unknown degrades to a plain string.
fn scalar_property(field: &FieldMetadata) -> Schema {
    let builder = match field.r#type {
        FieldMetadataType::Uuid => formatted(Type::String, KnownFormat::Uuid),
        FieldMetadataType::Text | FieldMetadataType::RichText => typed(Type::String),
        FieldMetadataType::DateTime => formatted(Type::String, KnownFormat::DateTime),
        FieldMetadataType::Date => formatted(Type::String, KnownFormat::Date),
        FieldMetadataType::Number => {
            let settings = field.settings.as_ref();
            let is_float = settings
                .map(|s| {
                    s.data_type == Some(NumberDataType::Float)
                        || s.decimals.is_some_and(|d| d > 0)
                })
                .unwrap_or(false);
            if is_float {
                typed(Type::Number)
            } else {
                typed(Type::Integer)
            }
        }
        FieldMetadataType::Numeric | FieldMetadataType::Position => typed(Type::Number),
        FieldMetadataType::Boolean => typed(Type::Boolean),
        FieldMetadataType::RawJson => typed(Type::Object),
        _ => typed(Type::String),
    };
    Schema::Object(builder.build())
}

fn links_shape() -> Schema {
    let secondary_link = typed(Type::Object)
        .description(Some("A secondary link"))
        .property("url", formatted(Type::String, KnownFormat::Uri))
        .property("label", typed(Type::String));

    Schema::Object(
        typed(Type::Object)
            .property("primaryLinkLabel", typed(Type::String))
            .property("primaryLinkUrl", typed(Type::String))
            .property(
                "secondaryLinks",
                ArrayBuilder::new().items(secondary_link),
            )
            .build(),
    )
}

fn currency_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property("amountMicros", typed(Type::Number))
            .property("currencyCode", typed(Type::String))
            .build(),
    )
}

fn full_name_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property("firstName", typed(Type::String))
            .property("lastName", typed(Type::String))
            .build(),
    )
}

fn address_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property("addressStreet1", typed(Type::String))
            .property("addressStreet2", typed(Type::String))
            .property("addressCity", typed(Type::String))
            .property("addressPostcode", typed(Type::String))
            .property("addressState", typed(Type::String))
            .property("addressCountry", typed(Type::String))
            .property("addressLat", typed(Type::Number))
            .property("addressLng", typed(Type::Number))
            .build(),
    )
}

fn actor_shape(for_response: bool) -> Schema {
    let mut builder = typed(Type::Object).property(
        "source",
        string_enum(vec![
            "EMAIL", "CALENDAR", "WORKFLOW", "API", "IMPORT", "MANUAL", "SYSTEM", "WEBHOOK",
        ]),
    );

    if for_response {
        builder = builder
            .property(
                "workspaceMemberId",
                formatted(Type::String, KnownFormat::Uuid),
            )
            .property("name", typed(Type::String));
    }

    Schema::Object(builder.build())
}

fn emails_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property("primaryEmail", typed(Type::String))
            .property(
                "additionalEmails",
                ArrayBuilder::new().items(formatted(Type::String, KnownFormat::Email)),
            )
            .build(),
    )
}

fn phones_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property(
                "additionalPhones",
                ArrayBuilder::new().items(typed(Type::String)),
            )
            .property("primaryPhoneCountryCode", typed(Type::String))
            .property("primaryPhoneCallingCode", typed(Type::String))
            .property("primaryPhoneNumber", typed(Type::String))
            .build(),
    )
}

fn rich_text_v2_shape() -> Schema {
    Schema::Object(
        typed(Type::Object)
            .property("blocknote", typed(Type::String))
            .property("markdown", typed(Type::String))
            .build(),
    )
}

fn with_description(mut schema: Schema, description: Option<&str>) -> Schema {
    let Some(description) = description else {
        return schema;
    };
    match &mut schema {
        Schema::Object(object) => object.description = Some(description.to_string()),
        Schema::Array(array) => array.description = Some(description.to_string()),
        Schema::OneOf(one_of) => one_of.description = Some(description.to_string()),
        _ => {}
    }
    schema
}

/// whether the field appears in create/update payloads at all
fn is_field_available(field: &FieldMetadata, for_response: bool) -> bool {
    for_response || !field.is_server_assigned()
}

/// The property a field contributes to the flat (non relation-expanded)
/// property set, keyed by its wire name. `None` when the field contributes
/// nothing (search vectors, one-to-many relations, unavailable fields).
fn property_for(
    field: &FieldMetadata,
    for_response: bool,
) -> Option<(String, Schema)> {
    if !is_field_available(field, for_response) || field.r#type == FieldMetadataType::TsVector {
        return None;
    }

    if field.r#type == FieldMetadataType::Relation {
        return match field.relation_type() {
            // the foreign key column
            Some(RelationType::ManyToOne) => Some((format!("{}Id", field.name), uuid_schema())),
            Some(RelationType::OneToMany) => None,
            // relation without settings degrades to the default mapping
            None => Some((
                field.name.clone(),
                with_description(scalar_property(field), field.description.as_deref()),
            )),
        };
    }

    let schema = match field.r#type {
        FieldMetadataType::MultiSelect => Schema::Array(
            ArrayBuilder::new()
                .items(string_enum(field.option_values()))
                .build(),
        ),
        FieldMetadataType::Select | FieldMetadataType::Rating => {
            Schema::Object(string_enum(field.option_values()).build())
        }
        FieldMetadataType::Array => Schema::Array(
            ArrayBuilder::new().items(typed(Type::String)).build(),
        ),
        FieldMetadataType::Links => links_shape(),
        FieldMetadataType::Currency => currency_shape(),
        FieldMetadataType::FullName => full_name_shape(),
        FieldMetadataType::Address => address_shape(),
        FieldMetadataType::Actor => actor_shape(for_response),
        FieldMetadataType::Emails => emails_shape(),
        FieldMetadataType::Phones => phones_shape(),
        FieldMetadataType::RichTextV2 => rich_text_v2_shape(),
        _ => scalar_property(field),
    };

    Some((
        field.name.clone(),
        with_description(schema, field.description.as_deref()),
    ))
}

/// The relation-expanded properties of the response variant: many-to-one
/// becomes a single nested reference, one-to-many an array of references.
fn relation_properties(item: &ObjectMetadata) -> Vec<(String, Schema)> {
    item.fields
        .iter()
        .filter(|f| f.r#type == FieldMetadataType::Relation)
        .filter_map(|field| {
            let target = field.relation_target()?;
            let reference = Ref::from_schema_name(format!(
                "{}ForResponse",
                capitalize(target)
            ));
            let schema = match field.relation_type()? {
                RelationType::ManyToOne => Schema::OneOf(
                    OneOfBuilder::new().item(reference).build(),
                ),
                RelationType::OneToMany => Schema::Array(
                    ArrayBuilder::new().items(reference).build(),
                ),
            };
            Some((
                field.name.clone(),
                with_description(schema, field.description.as_deref()),
            ))
        })
        .collect()
}

fn required_fields(item: &ObjectMetadata) -> Vec<&str> {
    item.fields
        .iter()
        .filter(|f| f.is_required())
        .map(|f| f.name.as_str())
        .collect()
}

fn schema_variant(item: &ObjectMetadata, for_response: bool, for_update: bool) -> Schema {
    let with_relations = for_response && !for_update;
    let with_required_fields = !for_response && !for_update;
    let with_example = with_required_fields;

    let mut builder = typed(Type::Object).description(item.description.as_deref());

    for field in &item.fields {
        if let Some((name, schema)) = property_for(field, for_response) {
            builder = builder.property(name, schema);
        }
    }

    if with_relations {
        for (name, schema) in relation_properties(item) {
            builder = builder.property(name, schema);
        }
    }

    if with_example {
        builder = builder.examples([example::object_example(item)]);
    }

    if with_required_fields {
        for name in required_fields(item) {
            builder = builder.required(name);
        }
    }

    Schema::Object(builder.build())
}

/// For each object, emit the three schema variants keyed
/// `<Capitalized nameSingular>`, `...ForUpdate` and `...ForResponse`.
pub fn compute_schema_components(
    objects: &[ObjectMetadata],
) -> BTreeMap<String, RefOr<Schema>> {
    let mut schemas = BTreeMap::new();

    for item in objects {
        let base = capitalize(&item.name_singular);
        schemas.insert(base.clone(), RefOr::T(schema_variant(item, false, false)));
        schemas.insert(
            format!("{base}ForUpdate"),
            RefOr::T(schema_variant(item, false, true)),
        );
        schemas.insert(
            format!("{base}ForResponse"),
            RefOr::T(schema_variant(item, true, false)),
        );
    }

    schemas
}
