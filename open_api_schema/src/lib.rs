#![deny(missing_docs)]
//! Generates OpenAPI 3.1 schema components from the runtime object/field
//! metadata model. This is a pure, single-pass transformation: the same
//! metadata always yields the same components, and malformed metadata
//! degrades silently (empty enum lists, omitted descriptions) rather than
//! failing.
//!
//! Components are built on the programmatic [utoipa::openapi] schema types
//! so the output plugs straight into a served [utoipa::openapi::OpenApi]
//! document.

pub mod components;
pub mod document;
pub mod example;
pub mod metadata;

pub use components::compute_schema_components;
pub use document::{core_document, metadata_document};
pub use metadata::{compute_metadata_schema_components, standard_meta_entities, MetaEntity};

/// `myObject` -> `My Object`. Used for synthesized example labels.
pub(crate) fn camel_to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
