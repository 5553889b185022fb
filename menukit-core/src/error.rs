use thiserror::Error;
use twilight_http::{
    error::{Error as HttpError, ErrorType},
    response::{DeserializeBodyError, StatusCode},
};

const FORBIDDEN_STATUS: u16 = 403;

/// Failure reported by a [`crate::Messenger`] implementation.
#[derive(Error, Debug)]
pub enum MessengerError {
    /// The bot lacks the permission for this action (also the case for reactions in DMs).
    #[error("missing permissions for this action")]
    Forbidden,

    #[error("http request failed: {0}")]
    Http(#[source] HttpError),

    #[error("failed to deserialize response body: {0}")]
    Body(#[from] DeserializeBodyError),

    #[error("event relay closed")]
    RelayClosed,
}

impl MessengerError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, MessengerError::Forbidden)
    }
}

fn is_forbidden_status(status: &StatusCode) -> bool {
    status.get() == FORBIDDEN_STATUS
}

impl From<HttpError> for MessengerError {
    fn from(source: HttpError) -> Self {
        match source.kind() {
            ErrorType::Response { status, .. } if is_forbidden_status(status) => {
                MessengerError::Forbidden
            }
            _ => MessengerError::Http(source),
        }
    }
}

/// Failure while reading configuration from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {name} must be a positive number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
}
