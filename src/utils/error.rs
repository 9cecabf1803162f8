use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Failure reported by a backend gateway call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered and reported an error value.
    #[error("backend rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The call never produced a backend answer.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("could not decode backend response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Rejected { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rejections_count_as_rejections() {
        let rejected = GatewayError::Rejected {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert!(rejected.is_rejection());
        assert!(!GatewayError::Transport("connection reset".to_string()).is_rejection());
        assert!(!GatewayError::Decode("eof".to_string()).is_rejection());
    }

    #[test]
    fn test_config_error_display() {
        let err = LeadError::InvalidConfigValueError {
            field: "backend.url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'ftp://x' for backend.url: Unsupported URL scheme: ftp"
        );
    }
}
