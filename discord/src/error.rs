use hyper::{header::InvalidHeaderValue, http::Error as HttpError, Error as HyperError, StatusCode};
use serde_json::Error as SerdeError;
use std::time::Duration;
use thiserror::Error as ThisError;

/// Failure of a single Discord API call.
///
/// Every variant except [`Error::APIError`] reports a status code of `0`:
/// the request never produced a usable HTTP answer.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Building Request Error - {0}")]
    BuildingRequest(#[from] HttpError),
    #[error("Invalid Bot Token - {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
    #[error("Request Error - {0}")]
    Request(#[from] HyperError),
    #[error("Request Error - no response within {0:?}")]
    Timeout(Duration),
    #[error("Parsing Error - {0}")]
    Parsing(#[from] SerdeError),
    #[error("API Error - {0}")]
    APIError(StatusCode),
}

impl Error {
    /// The HTTP status returned by Discord, or `0` for connectivity and parsing failures.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::APIError(status) => status.as_u16(),
            _ => 0,
        }
    }
}
