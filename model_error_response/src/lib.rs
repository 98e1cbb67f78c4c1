#![deny(missing_docs)]
//! This crate holds the shared response bodies used by the http services,
//! split out into a leaf crate to keep coupling between services low

/// A plain old json error response for use with axum.
#[derive(serde::Serialize, serde::Deserialize, Debug, utoipa::ToSchema)]
pub struct ErrorResponse<'a> {
    /// Message to explain failure
    pub message: &'a str,
}

/// An intentionally empty json response body
#[derive(serde::Serialize, serde::Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct EmptyResponse {}
