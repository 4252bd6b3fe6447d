use thiserror::Error as ThisError;

use crate::config::ConfigError;

/// Result of checking one user against the role requirement.
#[derive(Debug)]
pub enum VerifyResult {
    Allow,
    Deny,
    Error(VerifyError),
}

impl VerifyResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, VerifyResult::Allow)
    }

    /// How the host's flow should fail, if at all.
    pub fn flow_error(&self) -> Option<FlowError> {
        match self {
            VerifyResult::Allow => None,
            VerifyResult::Deny => Some(FlowError::InvalidUser),
            VerifyResult::Error(_) => Some(FlowError::InternalError),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum VerifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discord(#[from] discord::Error),
}

impl VerifyError {
    /// Discord's HTTP status for API errors, `0` otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            VerifyError::Config(_) => 0,
            VerifyError::Discord(err) => err.status_code(),
        }
    }
}

/// Failure vocabulary of the host authentication flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowError {
    /// The user is known but may not pass this step.
    InvalidUser,
    /// The step could not reach a decision.
    InternalError,
}
