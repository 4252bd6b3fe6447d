use discord::{Client, API_BASE, DEFAULT_TIMEOUT};
use secrecy::SecretString;
use std::{collections::HashMap, time::Duration};
use thiserror::Error as ThisError;

use crate::policy::RequiredRoles;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// A required value is unset or blank.
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Names under which each setting is looked up in a given source.
struct Keys {
    guild_id: &'static str,
    required_roles: &'static str,
    bot_token: &'static str,
    api_base: &'static str,
    request_timeout: &'static str,
}

/// Keys of the authenticator config map handed over by the host.
const HOST_KEYS: Keys = Keys {
    guild_id: "guildId",
    required_roles: "requiredRoles",
    bot_token: "botToken",
    api_base: "apiBase",
    request_timeout: "requestTimeout",
};

const ENV_KEYS: Keys = Keys {
    guild_id: "DISCORD_GUILD_ID",
    required_roles: "DISCORD_REQUIRED_ROLES",
    bot_token: "DISCORD_BOT_TOKEN",
    api_base: "DISCORD_API_BASE",
    request_timeout: "DISCORD_REQUEST_TIMEOUT",
};

#[derive(Clone, Debug)]
pub struct RoleGateConfig {
    pub guild_id: String,
    pub required_roles: RequiredRoles,
    pub bot_token: SecretString,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl RoleGateConfig {
    pub fn new(
        guild_id: impl Into<String>,
        required_roles: RequiredRoles,
        bot_token: impl Into<SecretString>,
    ) -> Self {
        Self {
            guild_id: guild_id.into(),
            required_roles,
            bot_token: bot_token.into(),
            api_base: API_BASE.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the host's authenticator config (`guildId`, `requiredRoles`, `botToken`,
    /// optionally `apiBase` and `requestTimeout` in seconds).
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(&HOST_KEYS, |key| config.get(key).cloned())
    }

    /// Reads `DISCORD_GUILD_ID`, `DISCORD_REQUIRED_ROLES`, `DISCORD_BOT_TOKEN`,
    /// and optionally `DISCORD_API_BASE` and `DISCORD_REQUEST_TIMEOUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ENV_KEYS, |key| std::env::var(key).ok())
    }

    fn load(keys: &Keys, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));

        let guild_id = required(keys.guild_id)?;
        let required_roles = RequiredRoles::parse(&required(keys.required_roles)?);
        if required_roles.is_empty() {
            return Err(ConfigError::Missing(keys.required_roles));
        }
        let bot_token = required(keys.bot_token)?;

        let mut config = Self::new(guild_id, required_roles, bot_token);
        if let Some(api_base) = value(keys.api_base) {
            config.api_base = api_base;
        }
        if let Some(timeout) = value(keys.request_timeout) {
            let secs = timeout
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    key: keys.request_timeout,
                    reason: e.to_string(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn client(&self) -> Client {
        Client::new(self.bot_token.clone())
            .with_api_base(self.api_base.clone())
            .with_timeout(self.request_timeout)
    }
}
