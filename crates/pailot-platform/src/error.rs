// ============================================================================
// PAILOT-PLATFORM - Error Types
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    // ==================== SDK Errors ====================
    #[error("Pi SDK not found. Please run in Pi Browser.")]
    SdkUnavailable,

    #[error("Pi SDK error: {0}")]
    Sdk(String),

    #[error("Not supported by this wallet SDK: {0}")]
    Unsupported(String),

    // ==================== Session Errors ====================
    #[error("Not signed in")]
    NotSignedIn,

    // ==================== Backend Errors ====================
    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Network request failed: {0}")]
    Network(String),

    // ==================== Configuration Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        PlatformError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Serialization(err.to_string())
    }
}
