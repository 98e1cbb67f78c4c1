//! Field-level metadata: the type enum over the supported column kinds and
//! the per-field descriptor with its options and settings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// The kinds of columns a user-defined object can carry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    Display,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldMetadataType {
    /// uuid primary keys and foreign keys
    Uuid,
    /// plain text
    Text,
    /// legacy rich text stored as a single string
    RichText,
    /// rich text stored as blocknote + markdown renditions
    RichTextV2,
    /// integer or float depending on [NumberDataType] settings
    Number,
    /// arbitrary precision number
    Numeric,
    /// fractional ordering key
    Position,
    /// true/false
    Boolean,
    /// timestamp with timezone
    DateTime,
    /// calendar date
    Date,
    /// single choice over [FieldMetadataOption]s
    Select,
    /// multiple choices over [FieldMetadataOption]s
    MultiSelect,
    /// rating value, also option backed
    Rating,
    /// primary link plus secondary links
    Links,
    /// amount in micros plus currency code
    Currency,
    /// first/last name pair
    FullName,
    /// postal address
    Address,
    /// primary email plus additional emails
    Emails,
    /// primary phone plus additional phones
    Phones,
    /// who/what created a record
    Actor,
    /// array of strings
    Array,
    /// free-form json
    RawJson,
    /// link to another object
    Relation,
    /// server-side full text search column, never exposed
    TsVector,
}

/// Storage representation of a [FieldMetadataType::Number] field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberDataType {
    /// floating point
    Float,
    /// 32 bit integer
    Int,
    /// 64 bit integer
    BigInt,
}

/// Cardinality of a [FieldMetadataType::Relation] field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// this object holds the foreign key
    ManyToOne,
    /// the target object holds the foreign key
    OneToMany,
}

/// One choice of an enum-like field (SELECT, MULTI_SELECT, RATING)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadataOption {
    /// stored value, e.g. `OPTION_1`
    pub value: String,
    /// display label
    pub label: String,
    /// display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// ordering among the sibling options
    pub position: i32,
}

/// Type-specific settings of a field descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadataSettings {
    /// number storage type, NUMBER fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<NumberDataType>,
    /// decimal places, NUMBER fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    /// relation cardinality, RELATION fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<RelationType>,
    /// singular name of the relation target object, RELATION fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_target_name_singular: Option<String>,
}

/// Describes one column of a user-defined object
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// unique id of this field descriptor
    pub id: Uuid,
    /// column name, camelCase. e.g. `createdAt`
    pub name: String,
    /// display label
    pub label: String,
    /// human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// the column kind
    #[serde(rename = "type")]
    pub r#type: FieldMetadataType,
    /// whether null is an accepted value
    pub is_nullable: bool,
    /// server-side default, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub default_value: Option<serde_json::Value>,
    /// choices for enum-like kinds; empty otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldMetadataOption>,
    /// type-specific settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FieldMetadataSettings>,
}

impl FieldMetadata {
    /// whether this column is assigned by the server and therefore absent
    /// from create/update payloads
    pub fn is_server_assigned(&self) -> bool {
        matches!(self.name.as_str(), "id" | "createdAt" | "updatedAt" | "deletedAt")
    }

    /// non-nullable with no default: the caller must provide a value
    pub fn is_required(&self) -> bool {
        !self.is_nullable && self.default_value.is_none()
    }

    /// the relation cardinality, for RELATION fields that carry one
    pub fn relation_type(&self) -> Option<RelationType> {
        self.settings.as_ref().and_then(|s| s.relation_type)
    }

    /// singular name of the relation target object, if any
    pub fn relation_target(&self) -> Option<&str> {
        self.settings
            .as_ref()
            .and_then(|s| s.relation_target_name_singular.as_deref())
    }

    /// the stored option values, in option order. Empty when the field has
    /// no options, including malformed enum-like fields.
    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}
