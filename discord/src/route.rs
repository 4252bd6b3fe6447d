use std::fmt::{Display, Formatter, Result as FmtResult};

pub const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Path of a REST endpoint, relative to the API base.
pub enum Route<'a> {
    GuildMember { guild_id: &'a str, user_id: &'a str },
}

impl Display for Route<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Route::GuildMember { guild_id, user_id } => {
                write!(f, "/guilds/{}/members/{}", guild_id, user_id)
            }
        }
    }
}

/// Absolute CDN location of an avatar image, requested at 256px.
pub enum CdnRoute<'a> {
    GuildMemberAvatar {
        guild_id: &'a str,
        user_id: &'a str,
        hash: &'a str,
    },
    UserAvatar {
        user_id: &'a str,
        hash: &'a str,
    },
}

impl Display for CdnRoute<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CdnRoute::GuildMemberAvatar {
                guild_id,
                user_id,
                hash,
            } => write!(
                f,
                "{}/guilds/{}/users/{}/avatars/{}.{}?size=256",
                CDN_BASE,
                guild_id,
                user_id,
                hash,
                extension(hash)
            ),
            CdnRoute::UserAvatar { user_id, hash } => write!(
                f,
                "{}/avatars/{}/{}.{}?size=256",
                CDN_BASE,
                user_id,
                hash,
                extension(hash)
            ),
        }
    }
}

/// Animated avatar hashes are prefixed with `a_` and served as gifs.
pub fn extension(hash: &str) -> &'static str {
    if hash.starts_with("a_") {
        "gif"
    } else {
        "png"
    }
}
