//! Error types for platform secret operations.

use thiserror::Error;

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur while talking to a hosting platform.
///
/// The taxonomy separates "the credential is bad" ([`PlatformError::Auth`])
/// from "the platform is unreachable or misbehaving"
/// ([`PlatformError::Transport`]) so callers can decide whether a retry makes
/// sense. This layer never retries on its own.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The remote store holds no value for the key at the given scope.
    #[error("Secret not found: {key}")]
    NotFound { key: String },

    /// The platform rejected the held credential (401/403).
    #[error("Platform rejected credentials (status {status}): {detail}")]
    Auth { status: u16, detail: String },

    /// Network failure, or a non-2xx status other than 401/403.
    /// `status` is `None` when the request never produced a response.
    #[error("Platform request failed: {detail}")]
    Transport { status: Option<u16>, detail: String },

    /// A provisioning write exceeded its deadline.
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },

    /// The account/site coordinate is malformed.
    #[error("Invalid account scope: {reason}")]
    InvalidScope { reason: String },

    /// The secret key is malformed.
    #[error("Invalid secret key: {key} - {reason}")]
    InvalidKey { key: String, reason: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Adapter construction or configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PlatformError {
    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an auth error from a rejected-credential response.
    pub fn auth(status: u16, detail: impl Into<String>) -> Self {
        Self::Auth { status, detail: detail.into() }
    }

    /// Create a transport error without a status code (request never completed).
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport { status: None, detail: detail.into() }
    }

    /// Create a transport error carrying the remote status code.
    pub fn transport_status(status: u16, detail: impl Into<String>) -> Self {
        Self::Transport { status: Some(status), detail: detail.into() }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Self::Timeout { operation: operation.into(), duration_ms }
    }

    /// Create an invalid scope error.
    pub fn invalid_scope(reason: impl Into<String>) -> Self {
        Self::InvalidScope { reason: reason.into() }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into(), reason: reason.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// True when the error means "no value stored for this key".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error means the credential was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = PlatformError::not_found("GITHUB_TOKEN");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Secret not found: GITHUB_TOKEN");

        let err = PlatformError::auth(401, "bad token");
        assert!(err.is_auth());
        assert!(err.to_string().contains("401"));

        let err = PlatformError::transport_status(502, "bad gateway");
        assert!(matches!(err, PlatformError::Transport { status: Some(502), .. }));

        let err = PlatformError::transport("connection refused");
        assert!(matches!(err, PlatformError::Transport { status: None, .. }));
    }

    #[test]
    fn test_timeout_display() {
        let err = PlatformError::timeout("store GITHUB_TOKEN", 30_000);
        assert!(err.to_string().contains("store GITHUB_TOKEN"));
        assert!(err.to_string().contains("30000ms"));
    }

    #[test]
    fn test_scope_and_key_errors_are_distinct() {
        let scope_err = PlatformError::invalid_scope("account_id cannot be empty");
        let key_err = PlatformError::invalid_key("bad/key", "cannot contain '/'");

        assert!(matches!(scope_err, PlatformError::InvalidScope { .. }));
        assert!(matches!(key_err, PlatformError::InvalidKey { .. }));
    }
}
