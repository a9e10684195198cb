//! Unified error handling for the configuration-center client
//!
//! Every failure the attribute client can produce maps onto one variant of
//! [`CmdbError`]. The client never retries or recovers; classification is
//! exposed through [`CmdbErrorTrait`] for callers that want it.

use thiserror::Error;

// ============================================================================
// CmdbError - Main error type
// ============================================================================

/// Main error type for the configuration-center client
#[derive(Debug, Error)]
pub enum CmdbError {
    // ======================================
    // Transport Errors
    // ======================================
    /// Network or I/O failure reported by the HTTP transport
    #[error("Transport error: {0}")]
    Transport(String),

    // ======================================
    // Request Errors
    // ======================================
    /// The condition payload lacks a usable field (checked before sending)
    #[error("Invalid condition field '{field}': {reason}")]
    Precondition { field: String, reason: String },

    // ======================================
    // Envelope Errors
    // ======================================
    /// Envelope reported `result: false`; carries `bk_error_msg` verbatim
    #[error("{0}")]
    Server(String),

    /// Envelope reported success but carried no data
    #[error("data is empty")]
    EmptyData,

    /// Malformed JSON in a request or response body
    #[error("Decode error: {0}")]
    Decode(String),

    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias using CmdbError
pub type CmdbResult<T> = Result<T, CmdbError>;

impl CmdbError {
    /// Create a precondition error for a condition field
    pub fn precondition(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Precondition {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a server-reported error from `bk_error_msg`
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }
}

// Conversion traits for common error types
impl From<serde_json::Error> for CmdbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for CmdbError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// CmdbError implements CmdbErrorTrait
// ============================================================================

impl CmdbErrorTrait for CmdbError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Precondition { .. } => "PRECONDITION_FAILED",
            Self::Server(_) => "SERVER_ERROR",
            Self::EmptyData => "EMPTY_DATA",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Network,
            Self::Precondition { .. } => ErrorCategory::Validation,
            Self::Server(_) | Self::EmptyData => ErrorCategory::Remote,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }
}

// ============================================================================
// Error Trait - Architectural layer
// ============================================================================

/// Error category enum - used for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    // Infrastructure layer
    Configuration,
    Network,

    // Request layer
    Validation,

    // Response layer
    Remote,
    Decode,
}

/// Error capability trait
///
/// Gives error types a common outward-facing interface (code, category,
/// log level) without giving up their own variants.
pub trait CmdbErrorTrait: std::error::Error + Send + Sync + 'static {
    /// Get error code (for logs and CLI output)
    fn error_code(&self) -> &'static str;

    /// Get error category
    fn category(&self) -> ErrorCategory;

    /// Whether the failure happened before anything reached the server
    fn is_local(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Configuration
        )
    }

    /// Get log level
    fn log_level(&self) -> tracing::Level {
        use tracing::Level;
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Decode => Level::ERROR,
            ErrorCategory::Network | ErrorCategory::Remote => Level::WARN,
            ErrorCategory::Validation => Level::INFO,
        }
    }
}

// Tests
#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_verbatim() {
        let err = CmdbError::server("attribute already exists");
        assert_eq!(err.to_string(), "attribute already exists");
        assert_eq!(err.error_code(), "SERVER_ERROR");
    }

    #[test]
    fn test_empty_data_message() {
        assert_eq!(CmdbError::EmptyData.to_string(), "data is empty");
        assert_eq!(CmdbError::EmptyData.category(), ErrorCategory::Remote);
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let err: CmdbError = serde_json::from_str::<serde_json::Value>("[{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CmdbError::Decode(_)));
        assert_eq!(err.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_local_errors() {
        assert!(CmdbError::precondition("id", "field not found").is_local());
        assert!(CmdbError::Configuration("bad".into()).is_local());
        assert!(!CmdbError::Transport("refused".into()).is_local());
        assert!(!CmdbError::server("x").is_local());
    }
}
