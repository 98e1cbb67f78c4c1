//! Assembles the served OpenAPI documents from computed schema components.

use model_metadata::ObjectMetadata;
use utoipa::openapi::{ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder};

use crate::{components, metadata};

fn document_with_schemas(
    title: &str,
    description: &str,
    schemas: impl IntoIterator<Item = (String, utoipa::openapi::RefOr<utoipa::openapi::Schema>)>,
) -> OpenApi {
    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(title)
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(description))
                .build(),
        )
        .components(Some(
            ComponentsBuilder::new().schemas_from_iter(schemas).build(),
        ))
        .build()
}

/// The record-facing document: one schema component triple per object.
pub fn core_document(objects: &[ObjectMetadata]) -> OpenApi {
    document_with_schemas(
        "Core API",
        "Schemas of the records held by each workspace object.",
        components::compute_schema_components(objects),
    )
}

/// The metadata-facing document: static schemas for objects and fields
/// themselves.
pub fn metadata_document() -> OpenApi {
    document_with_schemas(
        "Metadata API",
        "Schemas describing workspace objects and their fields.",
        metadata::compute_metadata_schema_components(&metadata::standard_meta_entities()),
    )
}
