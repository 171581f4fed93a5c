use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn test_network_error_display() {
        let err = AppError::NetworkError("Connection timeout".to_string());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("Connection timeout"));
    }

    #[test]
    fn test_url_error_display() {
        let err = AppError::UrlError("Invalid URL format".to_string());
        assert!(err.to_string().contains("Invalid URL"));
        assert!(err.to_string().contains("Invalid URL format"));
    }

    #[test]
    fn test_invalid_input_from_parse_int() {
        let parse_err = "99999999999999999999999".parse::<usize>().unwrap_err();
        let err = AppError::from(parse_err);
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_io_error_becomes_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::from(io_err);
        assert!(matches!(err, AppError::IoError(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_app_error_implements_error_trait() {
        use std::error::Error;
        let err: Box<dyn Error> = Box::new(AppError::NetworkError("test".to_string()));
        assert!(!err.to_string().is_empty());
    }
}
