use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod google;

/// What the user set out to do when the login flow started
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SignInUpAction {
    /// log into an existing account
    #[default]
    SignIn,
    /// create a new account
    SignUp,
    /// accept a workspace invitation
    JoinWorkspace,
}

/// The correlation fields carried across the provider redirect round trip,
/// json-encoded inside the opaque `state` parameter. Ephemeral; never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialSsoState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_invite_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_personal_invite_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_checkout_session_state: Option<String>,
    #[serde(default)]
    pub action: SignInUpAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}
