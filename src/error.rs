use thiserror::Error;

/// Errors that can occur when using UniLink
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UnilinkError {
    // ============================================================================
    // I/O and System Errors
    // ============================================================================
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serde JSON error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Device Identity Errors
    // ============================================================================
    #[error("Storage backend '{backend}' unavailable: {message}")]
    StorageUnavailable { backend: String, message: String },

    #[error("Entropy source failed: {message}")]
    Signal { message: String },

    // ============================================================================
    // Purchase Errors
    // ============================================================================
    #[error("Invalid purchase: {message}")]
    InvalidPurchase { message: String },

    #[error("Payment could not be started: {message}")]
    PaymentRejected { message: String },

    #[error("Payment verification failed: {message}")]
    VerificationFailed { message: String },

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    #[error("Request failed with HTTP {status}: {message}")]
    HttpFailed { status: u16, message: String },
}

impl UnilinkError {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a storage error for the named backend
    pub fn storage(backend: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            backend: backend.into(),
            message: msg.into(),
        }
    }

    /// Create an entropy source error with a message
    pub fn signal(msg: impl Into<String>) -> Self {
        Self::Signal {
            message: msg.into(),
        }
    }

    /// Create an invalid purchase error with a message
    pub fn invalid_purchase(msg: impl Into<String>) -> Self {
        Self::InvalidPurchase {
            message: msg.into(),
        }
    }

    /// Create a payment rejected error with a message
    pub fn payment_rejected(msg: impl Into<String>) -> Self {
        Self::PaymentRejected {
            message: msg.into(),
        }
    }

    /// Create a verification failed error with a message
    pub fn verification_failed(msg: impl Into<String>) -> Self {
        Self::VerificationFailed {
            message: msg.into(),
        }
    }

    /// Create an HTTP failed error
    pub fn http_failed(status: u16, message: impl Into<String>) -> Self {
        Self::HttpFailed {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnilinkError>;
