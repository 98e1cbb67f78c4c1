use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use model_error_response::ErrorResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{
    context::ApiContext,
    login::{SignInUpAction, SocialSsoState},
};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginQueryParams {
    workspace_id: Option<Uuid>,
    workspace_invite_hash: Option<String>,
    workspace_personal_invite_token: Option<String>,
    billing_checkout_session_state: Option<String>,
    #[serde(default)]
    action: SignInUpAction,
    locale: Option<String>,
}

/// Initiates a Google login
#[utoipa::path(
        get,
        path = "/login/google",
        operation_id = "google_login",
        params(
            ("workspace_id" = String, Query, description = "**OPTIONAL**. The workspace to sign into."),
            ("workspace_invite_hash" = String, Query, description = "**OPTIONAL**. Public invite hash of the workspace."),
            ("workspace_personal_invite_token" = String, Query, description = "**OPTIONAL**. Personal invite token."),
            ("billing_checkout_session_state" = String, Query, description = "**OPTIONAL**. Billing checkout session to resume after login."),
            ("action" = SignInUpAction, Query, description = "**OPTIONAL**. What the user set out to do. Defaults to SIGN_IN."),
            ("locale" = String, Query, description = "**OPTIONAL**. The user's locale."),
        ),
        responses(
            (status = 307),
            (status = 400, body=ErrorResponse),
        )
    )]
#[tracing::instrument(skip(ctx))]
pub async fn handler(
    State(ctx): State<ApiContext>,
    Query(params): Query<LoginQueryParams>,
) -> Result<Response, Response> {
    let state = SocialSsoState {
        workspace_id: params.workspace_id,
        workspace_invite_hash: params.workspace_invite_hash,
        workspace_personal_invite_token: params.workspace_personal_invite_token,
        billing_checkout_session_state: params.billing_checkout_session_state,
        action: params.action,
        locale: params.locale,
    };

    let sso_url = ctx
        .google_client
        .construct_authorize_url(Some(&state))
        .map_err(|e| {
            tracing::error!(error=?e, "unable to construct oauth2 authorize url");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "unable to serialize state into string",
                }),
            )
                .into_response()
        })?;

    tracing::info!(sso_url=%sso_url, "SSO URL");

    Ok(Redirect::temporary(&sso_url).into_response())
}
