use serde_json::Value;

use crate::route::CdnRoute;

/// Snapshot of a user's membership in a guild, as returned by one
/// `GET /guilds/{guild}/members/{user}` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberInfo {
    guild_id: String,
    user_id: String,
    roles: Vec<String>,
    guild_avatar: Option<String>,
    global_avatar: Option<String>,
}

impl MemberInfo {
    /// Reads a guild member object.
    ///
    /// Missing or mistyped fields are tolerated: `roles` falls back to an
    /// empty list and null or empty avatar hashes are treated as absent.
    pub fn from_value(guild_id: &str, user_id: &str, json: &Value) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            roles: role_ids(&json["roles"]),
            guild_avatar: avatar_hash(&json["avatar"]),
            global_avatar: avatar_hash(&json["user"]["avatar"]),
        }
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn into_roles(self) -> Vec<String> {
        self.roles
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }

    pub fn guild_avatar(&self) -> Option<&str> {
        self.guild_avatar.as_deref()
    }

    pub fn global_avatar(&self) -> Option<&str> {
        self.global_avatar.as_deref()
    }

    pub fn guild_avatar_url(&self) -> Option<String> {
        self.guild_avatar.as_deref().map(|hash| {
            CdnRoute::GuildMemberAvatar {
                guild_id: &self.guild_id,
                user_id: &self.user_id,
                hash,
            }
            .to_string()
        })
    }

    pub fn global_avatar_url(&self) -> Option<String> {
        self.global_avatar.as_deref().map(|hash| {
            CdnRoute::UserAvatar {
                user_id: &self.user_id,
                hash,
            }
            .to_string()
        })
    }

    /// The guild-specific avatar if the member set one, otherwise their account avatar.
    pub fn avatar_url(&self) -> Option<String> {
        self.guild_avatar_url().or_else(|| self.global_avatar_url())
    }
}

fn role_ids(roles: &Value) -> Vec<String> {
    let roles = match roles.as_array() {
        Some(roles) => roles,
        None => return Vec::new(),
    };
    roles
        .iter()
        .filter_map(|role| match role {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn avatar_hash(avatar: &Value) -> Option<String> {
    avatar
        .as_str()
        .filter(|hash| !hash.is_empty())
        .map(ToOwned::to_owned)
}
