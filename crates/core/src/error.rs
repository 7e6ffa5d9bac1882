use thiserror::Error;

/// Error-text fragment identifying the one transient transport failure that
/// warrants an immediate second attempt.
///
/// The underlying client surfaces this condition only as a connection error
/// whose message contains this fragment; there is no structured error code
/// for it.
pub const CONNECTION_RESET_SIGNATURE: &str = "Connection reset by peer";

/// Errors that can occur while talking to the email provider.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider did not respond within the allowed duration.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The provider rejected the request due to rate limiting.
    #[error("request throttled")]
    Throttled,

    /// The provider returned a service-level error.
    #[error("service error: {0}")]
    Service(String),

    /// The transport was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The message payload could not be built or was rejected as malformed.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl TransportError {
    /// Returns `true` if this is the known transient connection-reset
    /// failure, detected by matching [`CONNECTION_RESET_SIGNATURE`] against
    /// the connection error text.
    pub fn is_connection_reset(&self) -> bool {
        matches!(self, Self::Connection(msg) if msg.contains(CONNECTION_RESET_SIGNATURE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_reset_matches_signature() {
        let err = TransportError::Connection(
            "dispatch failure: io error: Connection reset by peer (os error 104)".into(),
        );
        assert!(err.is_connection_reset());
    }

    #[test]
    fn other_connection_errors_do_not_match() {
        let err = TransportError::Connection("dns error: failed to lookup address".into());
        assert!(!err.is_connection_reset());
    }

    #[test]
    fn non_connection_variants_never_match() {
        let err = TransportError::Service(format!("odd: {CONNECTION_RESET_SIGNATURE}"));
        assert!(!err.is_connection_reset());
        assert!(!TransportError::Throttled.is_connection_reset());
        assert!(!TransportError::Timeout("timed out".into()).is_connection_reset());
    }

    #[test]
    fn error_display() {
        let err = TransportError::Connection("reset".into());
        assert_eq!(err.to_string(), "connection error: reset");

        let err = TransportError::Service("MessageRejected".into());
        assert_eq!(err.to_string(), "service error: MessageRejected");

        assert_eq!(TransportError::Throttled.to_string(), "request throttled");
    }
}
