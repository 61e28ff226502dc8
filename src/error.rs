use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsketchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Endpoint not configured: {0}")]
    NotConfigured(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
}

impl RsketchError {
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, RsketchError::InvalidUrl(_))
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, RsketchError::NotConfigured(_))
    }
}

impl From<serde_json::Error> for RsketchError {
    fn from(err: serde_json::Error) -> Self {
        RsketchError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for RsketchError {
    fn from(err: reqwest::Error) -> Self {
        RsketchError::RequestError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RsketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RsketchError::InvalidUrl("not-a-url".into());
        assert_eq!(err.to_string(), "Invalid URL: not-a-url");
        assert!(err.is_invalid_url());
        assert!(!err.is_not_configured());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RsketchError = io.into();
        assert!(matches!(err, RsketchError::IoError(_)));
    }
}
