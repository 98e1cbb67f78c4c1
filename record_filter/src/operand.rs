//! The filter-type and operand catalog: which filter type a field's metadata
//! type maps to, which operands that filter type offers (the first entry is
//! the default), and the default composite sub field per filter type.

use model_metadata::{FieldMetadata, FieldMetadataType, ObjectMetadata};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// The filter type a predicate operates with, derived from the field's
/// metadata type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterableFieldType {
    /// substring comparisons
    Text,
    /// numeric comparisons
    Number,
    /// calendar date comparisons
    Date,
    /// timestamp comparisons
    DateTime,
    /// true/false
    Boolean,
    /// currency amount comparisons
    Currency,
    /// single choice
    Select,
    /// multiple choice
    MultiSelect,
    /// rating comparisons
    Rating,
    /// related record comparisons
    Relation,
    /// email composite
    Emails,
    /// phone composite
    Phones,
    /// link composite
    Links,
    /// address composite
    Address,
    /// name composite
    FullName,
    /// string array membership
    Array,
    /// raw json containment
    RawJson,
    /// actor source comparisons
    Actor,
}

/// The comparison operand of a leaf predicate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordFilterOperand {
    /// equals
    Is,
    /// does not equal
    IsNot,
    /// contains the value
    Contains,
    /// does not contain the value
    DoesNotContain,
    /// `>=`
    GreaterThanOrEqual,
    /// `<=`
    LessThanOrEqual,
    /// has no value
    IsEmpty,
    /// has a value
    IsNotEmpty,
    /// strictly before the date
    IsBefore,
    /// strictly after the date
    IsAfter,
    /// any moment before now
    IsInPast,
    /// any moment after now
    IsInFuture,
    /// within the current day
    IsToday,
    /// relative date expression, e.g. "last 3 months"
    IsRelative,
}

/// Map a field's metadata type to its filter type. `None` for kinds that can
/// never be filtered on (server-side search vectors).
pub fn filter_type_for(field_type: FieldMetadataType) -> Option<FilterableFieldType> {
    use FieldMetadataType as F;
    let filter_type = match field_type {
        F::Uuid | F::Text | F::RichText | F::RichTextV2 => FilterableFieldType::Text,
        F::Number | F::Numeric | F::Position => FilterableFieldType::Number,
        F::Boolean => FilterableFieldType::Boolean,
        F::DateTime => FilterableFieldType::DateTime,
        F::Date => FilterableFieldType::Date,
        F::Select => FilterableFieldType::Select,
        F::MultiSelect => FilterableFieldType::MultiSelect,
        F::Rating => FilterableFieldType::Rating,
        F::Links => FilterableFieldType::Links,
        F::Currency => FilterableFieldType::Currency,
        F::FullName => FilterableFieldType::FullName,
        F::Address => FilterableFieldType::Address,
        F::Emails => FilterableFieldType::Emails,
        F::Phones => FilterableFieldType::Phones,
        F::Actor => FilterableFieldType::Actor,
        F::Array => FilterableFieldType::Array,
        F::RawJson => FilterableFieldType::RawJson,
        F::Relation => FilterableFieldType::Relation,
        F::TsVector => return None,
    };
    Some(filter_type)
}

/// The ordered operand list for a filter type. The first entry is the
/// default operand a newly appended rule starts with.
pub fn operands_for(filter_type: FilterableFieldType) -> &'static [RecordFilterOperand] {
    use RecordFilterOperand as Op;
    match filter_type {
        FilterableFieldType::Text
        | FilterableFieldType::FullName
        | FilterableFieldType::Emails
        | FilterableFieldType::Phones
        | FilterableFieldType::Links
        | FilterableFieldType::Address
        | FilterableFieldType::Array
        | FilterableFieldType::RawJson
        | FilterableFieldType::Actor => &[
            Op::Contains,
            Op::DoesNotContain,
            Op::IsEmpty,
            Op::IsNotEmpty,
        ],
        FilterableFieldType::Number | FilterableFieldType::Currency => &[
            Op::GreaterThanOrEqual,
            Op::LessThanOrEqual,
            Op::IsEmpty,
            Op::IsNotEmpty,
        ],
        FilterableFieldType::Date | FilterableFieldType::DateTime => &[
            Op::Is,
            Op::IsRelative,
            Op::IsInPast,
            Op::IsInFuture,
            Op::IsToday,
            Op::IsBefore,
            Op::IsAfter,
            Op::IsEmpty,
            Op::IsNotEmpty,
        ],
        FilterableFieldType::Boolean => &[Op::Is],
        FilterableFieldType::Select | FilterableFieldType::Relation => {
            &[Op::Is, Op::IsNot, Op::IsEmpty, Op::IsNotEmpty]
        }
        FilterableFieldType::MultiSelect => &[
            Op::Contains,
            Op::DoesNotContain,
            Op::IsEmpty,
            Op::IsNotEmpty,
        ],
        FilterableFieldType::Rating => &[
            Op::Is,
            Op::GreaterThanOrEqual,
            Op::LessThanOrEqual,
            Op::IsEmpty,
            Op::IsNotEmpty,
        ],
    }
}

/// The sub field a predicate over a composite filter type targets by default
pub fn default_sub_field_name(filter_type: FilterableFieldType) -> Option<&'static str> {
    match filter_type {
        FilterableFieldType::Currency => Some("amountMicros"),
        FilterableFieldType::Emails => Some("primaryEmail"),
        FilterableFieldType::Phones => Some("primaryPhoneNumber"),
        FilterableFieldType::Links => Some("primaryLinkUrl"),
        FilterableFieldType::Address => Some("addressStreet1"),
        FilterableFieldType::Actor => Some("name"),
        _ => None,
    }
}

/// The precomputed default field a new rule starts with: the object's label
/// identifier field when filterable, otherwise the first filterable field.
pub fn default_field_for_filter(object: &ObjectMetadata) -> Option<&FieldMetadata> {
    if let Some(label_field) = object.label_identifier_field() {
        if filter_type_for(label_field.r#type).is_some() {
            return Some(label_field);
        }
    }

    object
        .fields
        .iter()
        .find(|f| filter_type_for(f.r#type).is_some())
}
