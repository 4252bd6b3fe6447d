#![deny(clippy::all, clippy::pedantic)]

use clap::Parser;
use role_gate_authenticator::{LinkedAccount, RoleAuthenticator, RoleGateConfig, VerifyResult};
use std::{error::Error, process::ExitCode};
use tracing_subscriber::EnvFilter;

/// Checks whether Discord accounts hold one of the required roles in the configured guild.
///
/// Configuration comes from the environment (or a `.env` file):
/// `DISCORD_GUILD_ID`, `DISCORD_REQUIRED_ROLES`, `DISCORD_BOT_TOKEN`,
/// and optionally `DISCORD_API_BASE` and `DISCORD_REQUEST_TIMEOUT`.
#[derive(Debug, Parser)]
#[command(name = "role-gate", version)]
struct Args {
    /// Discord user ids to verify
    #[arg(required = true)]
    discord_user_ids: Vec<String>,

    /// Print each member's roles and avatar before the verdict
    #[arg(long)]
    show_member: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = RoleGateConfig::from_env()?;
    tracing::info!(
        guild_id = %config.guild_id,
        required_roles = config.required_roles.len(),
        timeout = ?config.request_timeout,
        "Loaded configuration"
    );
    let authenticator = RoleAuthenticator::new(config);

    let mut all_allowed = true;
    for discord_user_id in &args.discord_user_ids {
        if args.show_member {
            show_member(&authenticator, discord_user_id).await;
        }

        let user = LinkedAccount::new(discord_user_id.clone(), Some(discord_user_id.clone()));
        let result = authenticator.authenticate(&user).await;
        match &result {
            VerifyResult::Allow => println!("{}: allow", discord_user_id),
            VerifyResult::Deny => println!("{}: deny", discord_user_id),
            VerifyResult::Error(err) => println!(
                "{}: error (status {}) - {}",
                discord_user_id,
                err.status_code(),
                err
            ),
        }
        all_allowed &= result.is_allowed();
    }

    Ok(if all_allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn show_member(authenticator: &RoleAuthenticator, discord_user_id: &str) {
    let guild_id = &authenticator.config().guild_id;
    match authenticator
        .client()
        .get_member_info(guild_id, discord_user_id)
        .await
    {
        Ok(member) => {
            println!("{}: roles [{}]", discord_user_id, member.roles().join(", "));
            if let Some(avatar) = member.avatar_url() {
                println!("{}: avatar {}", discord_user_id, avatar);
            }
        }
        Err(err) => tracing::warn!(discord_user_id, err = %err, "Failed to fetch member"),
    }
}
