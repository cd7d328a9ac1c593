/*!
 * Error types for the yatr application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Classification of every failure the engine can surface.
///
/// Each `GatewayError` and `EngineError` variant collapses to exactly one
/// kind; the kind is what ends up in a `TranslationOutcome::Error` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// API key missing or still the placeholder value
    Unconfigured,
    /// Provider rejected the credential
    AuthFailed,
    /// Quota exhausted or request rejected by the provider
    QuotaOrProviderRejected,
    /// Request exceeded its time bound
    Timeout,
    /// Transport-level failure (DNS, refused connection, ...)
    NetworkFailure,
    /// Response body did not have the expected shape
    MalformedResponse,
    /// Action invoked without its required session state
    PreconditionUnmet,
    /// History or config file could not be parsed
    FileCorrupt,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unconfigured => "unconfigured",
            Self::AuthFailed => "auth_failed",
            Self::QuotaOrProviderRejected => "quota_or_provider_rejected",
            Self::Timeout => "timeout",
            Self::NetworkFailure => "network_failure",
            Self::MalformedResponse => "malformed_response",
            Self::PreconditionUnmet => "precondition_unmet",
            Self::FileCorrupt => "file_corrupt",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur when calling a provider API.
///
/// The gateway never lets a provider fault escape as anything other than
/// one of these variants.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// API key for the provider is missing or a known placeholder
    #[error("{0} API key not configured")]
    Unconfigured(String),

    /// The provider rejected the credential
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Quota exceeded, rate limited, or otherwise rejected by the provider
    #[error("Provider rejected the request: {0}")]
    QuotaOrProviderRejected(String),

    /// The request timed out
    #[error("Network timeout connecting to {0}")]
    Timeout(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// Response body could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Map the variant to its outcome classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unconfigured(_) => ErrorKind::Unconfigured,
            Self::AuthFailed(_) => ErrorKind::AuthFailed,
            Self::QuotaOrProviderRejected(_) => ErrorKind::QuotaOrProviderRejected,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Errors raised outside the provider boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error from a provider call
    #[error("Provider error: {0}")]
    Gateway(#[from] GatewayError),

    /// An action was invoked without its required session state
    #[error("Precondition unmet: {0}")]
    PreconditionUnmet(String),

    /// History or config file could not be parsed
    #[error("Corrupt file: {0}")]
    FileCorrupt(String),

    /// File system failure around the history or config files
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl EngineError {
    /// Map the variant to its outcome classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Gateway(e) => e.kind(),
            Self::PreconditionUnmet(_) => ErrorKind::PreconditionUnmet,
            Self::FileCorrupt(_) => ErrorKind::FileCorrupt,
            Self::File(_) | Self::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
