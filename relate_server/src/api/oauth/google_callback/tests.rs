use axum::{extract::FromRequestParts, http::Request};
use cool_asserts::assert_matches;
use url::Url;

use crate::api::login::SignInUpAction;

use super::*;

#[tokio::test]
async fn it_should_deserialize_query_params() {
    let state = SocialSsoState {
        workspace_invite_hash: Some("hash-123".to_string()),
        action: SignInUpAction::JoinWorkspace,
        ..Default::default()
    };

    let json = serde_json::to_string(&state).unwrap();

    let mut url: Url = "https://test.com".parse().unwrap();
    url.query_pairs_mut()
        .append_pair("code", "test123")
        .append_pair("state", &json);

    let (mut parts, ()) = Request::builder()
        .uri(url.as_str())
        .body(())
        .unwrap()
        .into_parts();

    let extract::Query(data) =
        extract::Query::<GoogleCbParams>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

    assert_matches!(data, GoogleCbParams { code, state: Some(packed) } => {
        assert_eq!(code, "test123");
        assert_matches!(packed.decode().unwrap(), SocialSsoState { workspace_invite_hash: Some(hash), action: SignInUpAction::JoinWorkspace, .. } => {
            assert_eq!(hash, "hash-123");
        })
    });
}

#[test]
fn malformed_state_surfaces_at_decode() {
    let mut url: Url = "https://test.com".parse().unwrap();
    url.query_pairs_mut()
        .append_pair("code", "test123")
        .append_pair("state", "{not json");

    let params: GoogleCbParams =
        serde_urlencoded::from_str(url.query().unwrap()).unwrap();

    assert_matches!(decode_state(params.state), Err(InnerErr::State(_)));
}

#[test]
fn missing_state_defaults_to_sign_in() {
    let state = decode_state(None).unwrap();
    assert_eq!(state.action, SignInUpAction::SignIn);
    assert!(state.workspace_id.is_none());
}

fn profile(email: Option<&str>) -> GoogleProfile {
    GoogleProfile {
        sub: "109932394068261169409".to_string(),
        email: email.map(str::to_string),
        given_name: Some("Ada".to_string()),
        family_name: Some("Lovelace".to_string()),
        picture: Some("https://lh3.example.com/photo".to_string()),
        locale: Some("en".to_string()),
    }
}

#[test]
fn merge_carries_state_and_profile_into_the_user() {
    let state = SocialSsoState {
        workspace_id: Some(uuid::Uuid::new_v4()),
        locale: Some("fr".to_string()),
        ..Default::default()
    };

    let user = merge_profile(state.clone(), profile(Some("ada@example.com"))).unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.last_name, "Lovelace");
    assert_eq!(user.state.workspace_id, state.workspace_id);
    // the state's locale wins
    assert_eq!(user.state.locale.as_deref(), Some("fr"));
}

#[test]
fn merge_without_email_is_refused() {
    assert_matches!(
        merge_profile(SocialSsoState::default(), profile(None)),
        Err(InnerErr::MissingEmail)
    );
    assert_matches!(
        merge_profile(SocialSsoState::default(), profile(Some(""))),
        Err(InnerErr::MissingEmail)
    );
}

#[test]
fn merged_user_serializes_flat() {
    let user = merge_profile(
        SocialSsoState {
            workspace_invite_hash: Some("hash".to_string()),
            ..Default::default()
        },
        profile(Some("ada@example.com")),
    )
    .unwrap();

    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["email"], "ada@example.com");
    assert_eq!(value["workspaceInviteHash"], "hash");
    assert_eq!(value["action"], "SIGN_IN");
}
