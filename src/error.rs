//! Error types for the client core.
//!
//! Almost everything "error-like" in this crate is a policy outcome rather
//! than an error: unroutable events become ignored-notifications, duplicate
//! buffer adds are idempotent, removals of unknown titles are no-ops, and
//! malformed formatting codes degrade to literal text. The variants here
//! cover the few genuinely irrecoverable misuses.

use thiserror::Error;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors raised by the client core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// A session was bound to a router that already has one.
    ///
    /// Route correctness depends on a single session identity for the
    /// lifetime of the directory, so rebinding is rejected outright.
    #[error("session already bound: rebinding is not supported")]
    SessionRebound,

    /// An event was routed before any session was bound.
    #[error("no session bound")]
    SessionNotBound,

    /// The configured URL detection pattern failed to compile.
    #[error("invalid url pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            format!("{}", ClientError::SessionNotBound),
            "no session bound"
        );
        assert_eq!(
            format!("{}", ClientError::SessionRebound),
            "session already bound: rebinding is not supported"
        );
    }

    #[test]
    fn pattern_error_conversion() {
        let err = regex::Regex::new("(").unwrap_err();
        let client: ClientError = err.into();
        assert!(matches!(client, ClientError::Pattern(_)));
    }
}
