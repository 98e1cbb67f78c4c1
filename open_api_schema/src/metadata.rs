//! Static schema shapes for the metadata API's own entities (`object` and
//! `field`). These do not depend on any object metadata instance.

use std::collections::BTreeMap;

use model_metadata::{capitalize, FieldMetadataType};
use strum::IntoEnumIterator;
use utoipa::openapi::{
    schema::{ArrayBuilder, KnownFormat, ObjectBuilder, SchemaFormat, Type},
    Ref, RefOr, Schema,
};

#[cfg(test)]
mod tests;

/// A meta-entity the metadata API exposes
#[derive(Debug, Clone)]
pub struct MetaEntity {
    /// singular name, e.g. `object`
    pub name_singular: String,
    /// plural name, e.g. `objects`
    pub name_plural: String,
}

impl MetaEntity {
    fn new(name_singular: &str, name_plural: &str) -> Self {
        MetaEntity {
            name_singular: name_singular.to_string(),
            name_plural: name_plural.to_string(),
        }
    }
}

/// The meta-entities of the metadata API
pub fn standard_meta_entities() -> Vec<MetaEntity> {
    vec![
        MetaEntity::new("object", "objects"),
        MetaEntity::new("field", "fields"),
    ]
}

fn typed(schema_type: Type) -> ObjectBuilder {
    ObjectBuilder::new().schema_type(schema_type)
}

fn uuid_property() -> ObjectBuilder {
    typed(Type::String).format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid)))
}

fn date_time_property() -> ObjectBuilder {
    typed(Type::String).format(Some(SchemaFormat::KnownFormat(KnownFormat::DateTime)))
}

fn list_of(name_plural: &str, item_ref: Ref) -> Schema {
    Schema::Array(
        ArrayBuilder::new()
            .description(Some(format!("A list of {name_plural}")))
            .items(item_ref)
            .build(),
    )
}

fn object_base() -> ObjectBuilder {
    typed(Type::Object)
        .description(Some("An object"))
        .property("nameSingular", typed(Type::String))
        .property("namePlural", typed(Type::String))
        .property("labelSingular", typed(Type::String))
        .property("labelPlural", typed(Type::String))
        .property("description", typed(Type::String))
        .property("icon", typed(Type::String))
        .property("labelIdentifierFieldMetadataId", uuid_property())
        .property("imageIdentifierFieldMetadataId", uuid_property())
}

fn object_for_response() -> Schema {
    let fields_connection = typed(Type::Object).property(
        "edges",
        typed(Type::Object).property(
            "node",
            ArrayBuilder::new().items(Ref::from_schema_name("FieldForResponse")),
        ),
    );

    Schema::Object(
        object_base()
            .property("id", uuid_property())
            .property("dataSourceId", uuid_property())
            .property("isCustom", typed(Type::Boolean))
            .property("isActive", typed(Type::Boolean))
            .property("isSystem", typed(Type::Boolean))
            .property("createdAt", date_time_property())
            .property("updatedAt", date_time_property())
            .property("fields", fields_connection)
            .build(),
    )
}

fn field_base(with_immutable_fields: bool, with_required_fields: bool) -> ObjectBuilder {
    let option_shape = typed(Type::Object)
        .property("color", typed(Type::String))
        .property("label", typed(Type::String))
        .property(
            "value",
            typed(Type::String)
                .pattern(Some("^[A-Z0-9]+_[A-Z0-9]+$"))
                .examples(["OPTION_1"]),
        )
        .property("position", typed(Type::Number));

    let mut builder = typed(Type::Object).description(Some("A field"));

    if with_immutable_fields {
        builder = builder
            .property(
                "type",
                typed(Type::String).enum_values(Some(
                    FieldMetadataType::iter().map(|t| t.to_string()),
                )),
            )
            .property("objectMetadataId", uuid_property());
    }

    builder = builder
        .property("name", typed(Type::String))
        .property("label", typed(Type::String))
        .property("description", typed(Type::String))
        .property("icon", typed(Type::String))
        // any json value
        .property("defaultValue", ObjectBuilder::new())
        .property("isNullable", typed(Type::Boolean))
        .property("settings", typed(Type::Object))
        .property(
            "options",
            ArrayBuilder::new()
                .description(Some(
                    "For enum field types like SELECT or MULTI_SELECT",
                ))
                .items(option_shape),
        );

    if with_required_fields {
        for name in ["type", "name", "label", "objectMetadataId"] {
            builder = builder.required(name);
        }
    }

    builder
}

fn field_for_response() -> Schema {
    Schema::Object(
        field_base(true, false)
            .property("id", uuid_property())
            .property("isCustom", typed(Type::Boolean))
            .property("isActive", typed(Type::Boolean))
            .property("isSystem", typed(Type::Boolean))
            .property("createdAt", date_time_property())
            .property("updatedAt", date_time_property())
            .build(),
    )
}

/// Static schema components for the metadata API entities, following the
/// same `<Name>` / `...ForUpdate` / `...ForResponse` naming as the record
/// schemas, plus plural array aliases.
pub fn compute_metadata_schema_components(
    entities: &[MetaEntity],
) -> BTreeMap<String, RefOr<Schema>> {
    let mut schemas = BTreeMap::new();

    for entity in entities {
        let singular = capitalize(&entity.name_singular);
        let plural = capitalize(&entity.name_plural);

        match entity.name_singular.as_str() {
            "object" => {
                schemas.insert(
                    singular.clone(),
                    RefOr::T(Schema::Object(object_base().build())),
                );
                schemas.insert(
                    plural.clone(),
                    RefOr::T(list_of(
                        &entity.name_plural,
                        Ref::from_schema_name(&singular),
                    )),
                );
                schemas.insert(
                    format!("{singular}ForUpdate"),
                    RefOr::T(Schema::Object(
                        typed(Type::Object)
                            .description(Some("An object"))
                            .property("isActive", typed(Type::Boolean))
                            .build(),
                    )),
                );
                schemas.insert(
                    format!("{singular}ForResponse"),
                    RefOr::T(object_for_response()),
                );
                schemas.insert(
                    format!("{plural}ForResponse"),
                    RefOr::T(list_of(
                        &entity.name_plural,
                        Ref::from_schema_name(format!("{singular}ForResponse")),
                    )),
                );
            }
            "field" => {
                schemas.insert(
                    singular.clone(),
                    RefOr::T(Schema::Object(field_base(true, true).build())),
                );
                schemas.insert(
                    plural.clone(),
                    RefOr::T(list_of(
                        &entity.name_plural,
                        Ref::from_schema_name(&singular),
                    )),
                );
                schemas.insert(
                    format!("{singular}ForUpdate"),
                    RefOr::T(Schema::Object(field_base(false, false).build())),
                );
                schemas.insert(
                    format!("{singular}ForResponse"),
                    RefOr::T(field_for_response()),
                );
                schemas.insert(
                    format!("{plural}ForResponse"),
                    RefOr::T(list_of(
                        &entity.name_plural,
                        Ref::from_schema_name(format!("{singular}ForResponse")),
                    )),
                );
            }
            // unknown meta entities contribute nothing
            _ => {}
        }
    }

    schemas
}
