use discord::Client;
use std::collections::HashMap;

use crate::{
    config::RoleGateConfig,
    outcome::VerifyResult,
    policy::{self, RequiredRoles},
};

/// User attribute holding the id of the linked Discord account.
pub const DISCORD_USER_ID_ATTRIBUTE: &str = "discord_user_id";

/// The host's view of the user being authenticated.
pub trait LinkedUser {
    fn username(&self) -> &str;

    fn first_attribute(&self, name: &str) -> Option<&str>;

    fn discord_user_id(&self) -> Option<&str> {
        self.first_attribute(DISCORD_USER_ID_ATTRIBUTE)
    }
}

/// A user identified only by username and an optional Discord link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkedAccount {
    pub username: String,
    pub discord_user_id: Option<String>,
}

impl LinkedAccount {
    pub fn new(username: impl Into<String>, discord_user_id: Option<String>) -> Self {
        Self {
            username: username.into(),
            discord_user_id,
        }
    }
}

impl LinkedUser for LinkedAccount {
    fn username(&self) -> &str {
        &self.username
    }

    fn first_attribute(&self, name: &str) -> Option<&str> {
        if name == DISCORD_USER_ID_ATTRIBUTE {
            self.discord_user_id.as_deref()
        } else {
            None
        }
    }
}

/// Fetches the member and checks it against the requirement.
pub async fn verify(
    client: &Client,
    guild_id: &str,
    discord_user_id: &str,
    required: &RequiredRoles,
) -> VerifyResult {
    match client.get_member_info(guild_id, discord_user_id).await {
        Ok(member) => {
            if policy::evaluate(&member, required) {
                VerifyResult::Allow
            } else {
                VerifyResult::Deny
            }
        }
        Err(err) => VerifyResult::Error(err.into()),
    }
}

#[derive(Clone, Debug)]
pub struct RoleAuthenticator {
    config: RoleGateConfig,
    client: Client,
}

impl RoleAuthenticator {
    pub fn new(config: RoleGateConfig) -> Self {
        let client = config.client();
        Self { config, client }
    }

    pub fn config(&self) -> &RoleGateConfig {
        &self.config
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Users without a linked Discord account are not subject to this step.
    pub fn configured_for<U: LinkedUser + ?Sized>(&self, user: &U) -> bool {
        user.discord_user_id().is_some()
    }

    pub async fn authenticate<U: LinkedUser + ?Sized>(&self, user: &U) -> VerifyResult {
        let username = user.username();
        let discord_user_id = match user.discord_user_id() {
            Some(id) => id,
            None => {
                tracing::warn!(user = username, "User missing {} attribute", DISCORD_USER_ID_ATTRIBUTE);
                return VerifyResult::Deny;
            }
        };

        let result = verify(
            &self.client,
            &self.config.guild_id,
            discord_user_id,
            &self.config.required_roles,
        )
        .await;

        match &result {
            VerifyResult::Allow => {
                tracing::info!(user = username, discord_user_id, "User authenticated with Discord role");
            }
            VerifyResult::Deny => {
                tracing::warn!(user = username, discord_user_id, "User lacks required Discord role");
            }
            VerifyResult::Error(err) => {
                tracing::error!(
                    user = username,
                    discord_user_id,
                    status = err.status_code(),
                    err = %err,
                    "Discord API error"
                );
            }
        }
        result
    }
}

/// Runs the step with a config map supplied by the host for this execution.
///
/// An incomplete config is an internal error, never a pass.
pub async fn authenticate_with_config<U: LinkedUser + ?Sized>(
    config: &HashMap<String, String>,
    user: &U,
) -> VerifyResult {
    match RoleGateConfig::from_map(config) {
        Ok(config) => RoleAuthenticator::new(config).authenticate(user).await,
        Err(err) => {
            tracing::error!(err = %err, "Discord authenticator not properly configured");
            VerifyResult::Error(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_account_exposes_only_the_discord_attribute() {
        let user = LinkedAccount::new("alice", Some("200".to_string()));
        assert_eq!(user.username(), "alice");
        assert_eq!(user.discord_user_id(), Some("200"));
        assert_eq!(user.first_attribute("email"), None);
    }

    #[test]
    fn configured_for_requires_a_link() {
        let config = RoleGateConfig::new("100", RequiredRoles::parse("111"), "token");
        let authenticator = RoleAuthenticator::new(config);

        assert!(authenticator.configured_for(&LinkedAccount::new("alice", Some("200".to_string()))));
        assert!(!authenticator.configured_for(&LinkedAccount::new("bob", None)));
    }
}
