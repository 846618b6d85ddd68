//! Error types for Arbor.
//!
//! Provides structured errors with:
//! - Unique error codes for API responses
//! - Source error chaining
//! - Client vs server error categorization
//!
//! The Merkle operations themselves never fail with an error: generation
//! returns `None` and verification returns `false`. These errors cover the
//! surrounding surface (hex parsing, configuration, `Result`-returning proof
//! checks).

use thiserror::Error;

/// Result type for Arbor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for API responses.
///
/// Codes are structured as:
/// - 1xxx: Validation errors (client)
/// - 6xxx: Serialization errors (server)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    InvalidHash = 1001,
    InvalidProof = 1006,
    InvalidFormat = 1008,
    InvalidConfig = 1009,

    // Serialization errors (6xxx)
    Serialization = 6001,
}

impl ErrorCode {
    /// Get the numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(self) -> bool {
        (1000..5000).contains(&self.code())
    }

    /// Check if this is a server error (5xx equivalent).
    pub fn is_server_error(self) -> bool {
        self.code() >= 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Errors that can occur in Arbor.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Validation Errors (client errors)
    // ========================================================================
    /// Invalid hash format or value.
    #[error("[{code}] invalid hash: {message}")]
    InvalidHash {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Proof verification failed.
    #[error("[{code}] invalid proof: {message}")]
    InvalidProof { code: ErrorCode, message: String },

    /// Input could not be parsed into the expected shape.
    #[error("[{code}] invalid format: {message}")]
    InvalidFormat {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration rejected.
    #[error("[{code}] invalid config: {message}")]
    InvalidConfig { code: ErrorCode, message: String },

    // ========================================================================
    // Serialization Errors (server errors)
    // ========================================================================
    /// Serialization/deserialization failed.
    #[error("[{code}] serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidHash { code, .. } => *code,
            Error::InvalidProof { code, .. } => *code,
            Error::InvalidFormat { code, .. } => *code,
            Error::InvalidConfig { code, .. } => *code,
            Error::Serialization { code, .. } => *code,
        }
    }

    /// Check if this is a client error.
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.code().is_server_error()
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Create an InvalidHash error.
    pub fn invalid_hash(message: impl Into<String>) -> Self {
        Error::InvalidHash {
            code: ErrorCode::InvalidHash,
            message: message.into(),
            source: None,
        }
    }

    /// Create an InvalidProof error.
    pub fn invalid_proof(message: impl Into<String>) -> Self {
        Error::InvalidProof {
            code: ErrorCode::InvalidProof,
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            code: ErrorCode::InvalidConfig,
            message: message.into(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        // Malformed input is the caller's fault; I/O and EOF are not.
        let message = e.to_string();
        if e.is_syntax() || e.is_data() {
            Error::InvalidFormat {
                code: ErrorCode::InvalidFormat,
                message,
                source: Some(Box::new(e)),
            }
        } else {
            Error::Serialization {
                code: ErrorCode::Serialization,
                message,
                source: Some(Box::new(e)),
            }
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHash {
            code: ErrorCode::InvalidHash,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}
