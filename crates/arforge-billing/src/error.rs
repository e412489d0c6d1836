use thiserror::Error;

/// Failure of one billing proxy call.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Billing request failed: {0}")]
    Transport(String),

    /// The proxy answered with a non-success status
    #[error("Billing request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        /// The proxy's `error` field, when the body carried one
        message: Option<String>,
    },

    /// The proxy answered 2xx with a body that does not match the expected shape
    #[error("Malformed billing response: {0}")]
    Malformed(String),
}

impl ActionError {
    /// Message to show the user: the proxy's own error when it sent one, otherwise `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ActionError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message,
            _ => fallback,
        }
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ActionError::Malformed(err.to_string())
        } else {
            ActionError::Transport(err.to_string())
        }
    }
}
