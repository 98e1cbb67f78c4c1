use axum::{
    extract::{self, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use model_error_response::ErrorResponse;
use param_codec::JsonPacked;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_cookies::Cookies;
use utoipa::ToSchema;

use crate::{
    api::{
        context::ApiContext,
        login::SocialSsoState,
        utils::{create_access_token_cookie, create_refresh_token_cookie, html_redirect},
    },
    service::google_client::{GoogleClientError, GoogleProfile},
};

#[cfg(test)]
mod tests;

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleCbParams {
    code: String,
    state: Option<JsonPacked<SocialSsoState>>,
}

/// The provider profile merged with the correlation state, the shape handed
/// to the sign-in completion
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialSsoUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(flatten)]
    pub state: SocialSsoState,
}

/// Handles the Google redirect back to us
#[utoipa::path(
        get,
        path = "/oauth/google/callback",
        operation_id = "google_callback",
        responses(
            (status = 200),
            (status = 400, body=ErrorResponse),
            (status = 401, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
        )
    )]
#[tracing::instrument(skip(ctx, cookies, params))]
pub async fn handler(
    State(ctx): State<ApiContext>,
    cookies: Cookies,
    extract::Query(params): extract::Query<GoogleCbParams>,
) -> Result<Response, Response> {
    let state = decode_state(params.state).map_err(IntoResponse::into_response)?;

    let tokens = ctx
        .google_client
        .exchange_code(&params.code)
        .await
        .map_err(|e| InnerErr::from(e).into_response())?;

    let profile = ctx
        .google_client
        .fetch_profile(&tokens.access_token)
        .await
        .map_err(|e| InnerErr::from(e).into_response())?;

    let user = merge_profile(state, profile).map_err(IntoResponse::into_response)?;

    tracing::debug!(email=%user.email, action=%user.state.action, "google login completed");

    // Set cookies
    cookies.add(create_access_token_cookie(&tokens.access_token));
    if let Some(refresh_token) = tokens.refresh_token.as_deref() {
        cookies.add(create_refresh_token_cookie(refresh_token));
    }

    Ok(html_redirect(&ctx.base_url))
}

#[derive(Debug, Error)]
enum InnerErr {
    #[error("{0}")]
    State(#[from] serde_json::Error),
    #[error("google profile carries no email address")]
    MissingEmail,
    #[error("{0}")]
    Google(#[from] GoogleClientError),
}

impl IntoResponse for InnerErr {
    fn into_response(self) -> Response {
        match self {
            InnerErr::State(_error) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "failed to deserialize state",
                }),
            )
                .into_response(),
            InnerErr::MissingEmail => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    message: "google profile carries no email address",
                }),
            )
                .into_response(),
            InnerErr::Google(_e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "unable to complete google login",
                }),
            )
                .into_response(),
        }
    }
}

/// An absent `state` parameter is a plain sign-in; a present but malformed
/// one is the caller's error.
fn decode_state(state: Option<JsonPacked<SocialSsoState>>) -> Result<SocialSsoState, InnerErr> {
    match state {
        Some(state) => Ok(state.decode()?),
        None => Ok(SocialSsoState::default()),
    }
}

#[tracing::instrument(err)]
fn merge_profile(
    state: SocialSsoState,
    profile: GoogleProfile,
) -> Result<SocialSsoUser, InnerErr> {
    let email = profile
        .email
        .filter(|e| !e.is_empty())
        .ok_or(InnerErr::MissingEmail)?;

    // the state's locale wins over the profile's
    let locale = state.locale.clone().or(profile.locale);

    Ok(SocialSsoUser {
        email,
        first_name: profile.given_name.unwrap_or_default(),
        last_name: profile.family_name.unwrap_or_default(),
        picture: profile.picture,
        state: SocialSsoState { locale, ..state },
    })
}
