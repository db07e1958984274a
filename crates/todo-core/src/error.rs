use crate::constants::FETCH_FAILED_MESSAGE;

/// A failed page resolution. Scoped to one page and one attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("{}", FETCH_FAILED_MESSAGE)]
    Status { status: u16 },
    /// The request never completed (DNS, connect, timeout, ...)
    #[error("{message}")]
    Transport { message: String, offline: bool },
    #[error("Invalid todos payload: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Whether the failure looks like lost connectivity rather than a server problem
    pub fn is_offline(&self) -> bool {
        matches!(self, FetchError::Transport { offline: true, .. })
    }

    /// Underlying cause, when one was captured
    pub fn cause(&self) -> Option<String> {
        match self {
            FetchError::Status { status } => Some(format!("HTTP {}", status)),
            FetchError::Transport { message, .. } | FetchError::Decode { message } => {
                Some(message.clone())
            }
        }
    }

    pub fn status(status: u16) -> Self {
        FetchError::Status { status }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::Decode {
                message: err.to_string(),
            };
        }
        if let Some(status) = err.status() {
            return FetchError::Status {
                status: status.as_u16(),
            };
        }
        FetchError::Transport {
            offline: err.is_connect() || err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// Rejected user input on the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
}
