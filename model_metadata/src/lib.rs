#![deny(missing_docs)]
//! This crate contains the runtime object/field metadata model: the
//! description of user-defined objects and their columns that drives schema
//! generation and record filtering. The metadata itself is administered
//! elsewhere; from this workspace's perspective it is read-only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod field;
pub mod standard;

pub use field::{
    FieldMetadata, FieldMetadataOption, FieldMetadataSettings, FieldMetadataType, NumberDataType,
    RelationType,
};


/// A named entity with an ordered set of field descriptors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// unique id of this object descriptor
    pub id: Uuid,
    /// singular name, camelCase. e.g. `person`
    pub name_singular: String,
    /// plural name, camelCase. e.g. `people`
    pub name_plural: String,
    /// human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// the field whose value labels a record of this object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_identifier_field_metadata_id: Option<Uuid>,
    /// the ordered column descriptors of this object
    pub fields: Vec<FieldMetadata>,
}

impl ObjectMetadata {
    /// look a field up by its metadata id
    pub fn field_by_id(&self, id: Uuid) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// the field referenced by [Self::label_identifier_field_metadata_id], if any
    pub fn label_identifier_field(&self) -> Option<&FieldMetadata> {
        self.label_identifier_field_metadata_id
            .and_then(|id| self.field_by_id(id))
    }
}

/// Uppercase the first character only. Used to derive schema component names
/// such as `Person` or `CompaniesForResponse` from camelCase object names.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
