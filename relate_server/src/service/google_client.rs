//! Outbound client for Google's OAuth2 endpoints: authorization url
//! construction, authorization-code exchange and the OpenID userinfo fetch.
//! Endpoint urls are injectable so tests never hit the network.

use std::time::Duration;

use anyhow::Context;
use param_codec::JsonPacked;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Debug, Error)]
pub enum GoogleClientError {
    #[error("failed to reach google: {0}")]
    Http(#[from] reqwest::Error),
    #[error("google returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest {
    client_id: String,
    client_secret: String,
    code: String,
    grant_type: String,
    redirect_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// The OpenID userinfo profile, reduced to the claims we consume
#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleProfile {
    /// Google user id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug)]
pub struct GoogleAuthClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    authorize_url: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleAuthClient {
    pub fn new(client_id: String, client_secret: String, callback_url: String) -> Self {
        GoogleAuthClient {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            callback_url,
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            userinfo_url: USERINFO_URL.to_string(),
        }
    }

    /// Point the client at alternative endpoints. Tests only.
    pub fn with_endpoints(
        mut self,
        authorize_url: &str,
        token_url: &str,
        userinfo_url: &str,
    ) -> Self {
        self.authorize_url = authorize_url.to_string();
        self.token_url = token_url.to_string();
        self.userinfo_url = userinfo_url.to_string();
        self
    }

    /// Construct the authorization url carrying `state` json-encoded inside
    /// the provider's opaque `state` parameter.
    pub fn construct_authorize_url<T>(&self, state: Option<&T>) -> anyhow::Result<String>
    where
        for<'de> T: Serialize + Deserialize<'de> + std::fmt::Debug,
    {
        let mut url = Url::parse(&self.authorize_url).context("invalid authorize url")?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("access_type", "offline");

        if let Some(state) = state {
            tracing::trace!(state=?state, "state provided");
            let state_str = JsonPacked::<T>::encode_to_string(state)
                .context("should be able to serialize state into string")?;
            url.query_pairs_mut().append_pair("state", &state_str);
        }

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokenResponse, GoogleClientError> {
        let token_request = TokenExchangeRequest {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            code: code.to_string(),
            grant_type: "authorization_code".to_string(),
            redirect_uri: self.callback_url.clone(),
        };

        let response = self
            .client
            .post(&self.token_url)
            .form(&token_request)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error=?e, "failed to send google token request"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            tracing::error!(status=?status, body=?body, "token exchange failed");
            return Err(GoogleClientError::Status { status, body });
        }

        let token_response = response
            .json::<GoogleTokenResponse>()
            .await
            .inspect_err(|e| tracing::error!(error=?e, "failed to parse token response"))?;

        Ok(token_response)
    }

    /// Fetch the OpenID userinfo profile with a bearer access token
    pub async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<GoogleProfile, GoogleClientError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error=?e, "failed to send userinfo request"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            tracing::error!(status=?status, body=?body, "userinfo fetch failed");
            return Err(GoogleClientError::Status { status, body });
        }

        let profile = response
            .json::<GoogleProfile>()
            .await
            .inspect_err(|e| tracing::error!(error=?e, "failed to parse userinfo response"))?;

        Ok(profile)
    }
}
