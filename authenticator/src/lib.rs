#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! Authentication step that only lets through users holding one of a set of
//! roles in a Discord guild.
//!
//! The host resolves the user, calls [`RoleAuthenticator::configured_for`] to
//! decide whether the step applies, then [`RoleAuthenticator::authenticate`]
//! and maps the [`VerifyResult`] onto its own flow.

pub mod authenticator;
pub mod config;
pub mod outcome;
pub mod policy;

pub use authenticator::{
    authenticate_with_config, verify, LinkedAccount, LinkedUser, RoleAuthenticator,
    DISCORD_USER_ID_ATTRIBUTE,
};
pub use config::{ConfigError, RoleGateConfig};
pub use outcome::{FlowError, VerifyError, VerifyResult};
pub use policy::{evaluate, RequiredRoles};
