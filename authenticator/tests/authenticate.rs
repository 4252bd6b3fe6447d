use httpmock::prelude::*;
use role_gate_authenticator::{
    authenticate_with_config, verify, FlowError, LinkedAccount, RequiredRoles, RoleAuthenticator,
    RoleGateConfig, VerifyError, VerifyResult,
};
use serde_json::json;
use std::collections::HashMap;

const TOKEN: &str = "test-bot-token";

fn config(server: &MockServer, required: &str) -> RoleGateConfig {
    let mut config = RoleGateConfig::new("100", RequiredRoles::parse(required), TOKEN);
    config.api_base = server.base_url();
    config
}

fn linked(id: &str) -> LinkedAccount {
    LinkedAccount::new("alice", Some(id.to_string()))
}

#[tokio::test]
async fn member_with_a_required_role_is_allowed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/guilds/100/members/200")
                .header("authorization", "Bot test-bot-token");
            then.status(200).json_body(json!({ "roles": ["111", "222"] }));
        })
        .await;

    let authenticator = RoleAuthenticator::new(config(&server, "222"));
    let result = authenticator.authenticate(&linked("200")).await;

    assert!(result.is_allowed());
    assert_eq!(result.flow_error(), None);
}

#[tokio::test]
async fn member_without_required_roles_is_denied() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/guilds/100/members/200");
            then.status(200).json_body(json!({ "roles": ["333"] }));
        })
        .await;

    let authenticator = RoleAuthenticator::new(config(&server, "111,222"));
    let result = authenticator.authenticate(&linked("200")).await;

    assert!(matches!(result, VerifyResult::Deny));
    assert_eq!(result.flow_error(), Some(FlowError::InvalidUser));
}

#[tokio::test]
async fn unknown_member_is_an_error_with_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/guilds/100/members/200");
            then.status(404).json_body(json!({ "message": "Unknown Member" }));
        })
        .await;

    let config = config(&server, "111");
    let result = verify(&config.client(), "100", "200", &config.required_roles).await;

    match result {
        VerifyResult::Error(err) => {
            assert!(matches!(err, VerifyError::Discord(_)));
            assert_eq!(err.status_code(), 404);
        }
        other => panic!("Expected Error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error_with_status_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/guilds/100/members/200");
            then.status(200).body("not json");
        })
        .await;

    let authenticator = RoleAuthenticator::new(config(&server, "111"));
    let result = authenticator.authenticate(&linked("200")).await;

    match result {
        VerifyResult::Error(err) => assert_eq!(err.status_code(), 0),
        other => panic!("Expected Error, got: {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_an_internal_error() {
    let mut config = RoleGateConfig::new("100", RequiredRoles::parse("111"), TOKEN);
    config.api_base = "http://127.0.0.1:1".to_string();

    let result = RoleAuthenticator::new(config)
        .authenticate(&linked("200"))
        .await;

    assert_eq!(result.flow_error(), Some(FlowError::InternalError));
    match result {
        VerifyResult::Error(err) => assert_eq!(err.status_code(), 0),
        other => panic!("Expected Error, got: {other:?}"),
    }
}

#[tokio::test]
async fn unlinked_user_is_skipped_and_never_queried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/guilds/100/members/200");
            then.status(200).json_body(json!({ "roles": ["111"] }));
        })
        .await;

    let authenticator = RoleAuthenticator::new(config(&server, "111"));
    let user = LinkedAccount::new("bob", None);

    assert!(!authenticator.configured_for(&user));
    assert!(matches!(
        authenticator.authenticate(&user).await,
        VerifyResult::Deny
    ));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn host_config_map_drives_the_step() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/guilds/100/members/200");
            then.status(200).json_body(json!({ "roles": ["222"] }));
        })
        .await;

    let config = HashMap::from([
        ("guildId".to_string(), "100".to_string()),
        ("requiredRoles".to_string(), " 111 , 222 ".to_string()),
        ("botToken".to_string(), TOKEN.to_string()),
        ("apiBase".to_string(), server.base_url()),
    ]);

    assert!(authenticate_with_config(&config, &linked("200"))
        .await
        .is_allowed());
}

#[tokio::test]
async fn incomplete_host_config_is_an_internal_error() {
    let config = HashMap::from([
        ("guildId".to_string(), "100".to_string()),
        ("requiredRoles".to_string(), "111".to_string()),
    ]);

    let result = authenticate_with_config(&config, &linked("200")).await;

    assert_eq!(result.flow_error(), Some(FlowError::InternalError));
    match result {
        VerifyResult::Error(err) => {
            assert!(matches!(err, VerifyError::Config(_)));
            assert_eq!(err.status_code(), 0);
        }
        other => panic!("Expected Error, got: {other:?}"),
    }
}
