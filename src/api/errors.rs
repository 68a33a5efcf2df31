use thiserror::Error;

/// Failures surfaced by the HTTP layer. Every variant carries a message that is
/// safe to show to the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    /// The backend answered 2xx but flagged the record as invalid.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Message without the variant prefix, used where the UI renders its own label.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Parse(message)
            | Self::Serialization(message)
            | Self::Rejected(message)
            | Self::Http { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_for_http_errors() {
        let err = ApiError::Http {
            status: 404,
            message: "Usuario nao encontrado".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (404): Usuario nao encontrado");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_is_detected_from_status() {
        let err = ApiError::Http {
            status: 401,
            message: "Request failed.".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(ApiError::Network("down".to_string()).status(), None);
    }

    #[test]
    fn user_message_strips_prefix() {
        let err = ApiError::Timeout("Request timed out. Please try again.".to_string());
        assert!(err.is_timeout());
        assert_eq!(err.user_message(), "Request timed out. Please try again.");
    }
}
