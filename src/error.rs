//! Error types for the trade context.
//!
//! Validation failures are raised locally, before the gateway is
//! contacted, and all display with the same `ERROR. ` prefix. Failures
//! reported by the gateway are carried through with their original code
//! and message.

use thiserror::Error;

/// Prefix shared by every locally-raised validation message.
pub const ERROR_STR_PREFIX: &str = "ERROR. ";

/// A specialized `Result` type for trade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all trade context operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter failed local validation
    #[error("ERROR. {0}")]
    InvalidParam(String),

    /// No cached account matches the requested environment
    #[error("ERROR. No one available account!")]
    NoAccount,

    /// A real-money trading action was attempted before a successful unlock
    #[error("ERROR. trade is locked, call unlock_trade first")]
    NotUnlocked,

    /// The gateway answered with a failure; message is passed through verbatim
    #[error("{message}")]
    Gateway {
        /// Return code reported by the gateway
        code: i32,
        /// Message reported by the gateway
        message: String,
    },

    /// The transport could not deliver the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Packing a request or unpacking a response failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a parameter error naming the offending argument.
    pub(crate) fn wrong_param(name: &str) -> Self {
        Error::InvalidParam(format!("the type of {} param is wrong ", name))
    }

    /// Returns `true` if the error was raised locally, before any request
    /// reached the gateway.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParam(_) | Error::NoAccount | Error::NotUnlocked
        )
    }

    /// Returns `true` if the gateway itself rejected the request.
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, Error::Gateway { .. })
    }

    /// Returns `true` if the failure is potentially transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// The gateway return code, if the gateway produced this error.
    pub fn gateway_code(&self) -> Option<i32> {
        match self {
            Error::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_prefixed() {
        let errors = [
            Error::wrong_param("environment"),
            Error::NoAccount,
            Error::NotUnlocked,
        ];
        for err in errors {
            assert!(err.to_string().starts_with(ERROR_STR_PREFIX), "{}", err);
            assert!(err.is_validation_error());
        }
    }

    #[test]
    fn test_gateway_message_is_verbatim() {
        let err = Error::Gateway {
            code: -1,
            message: "Order quantity exceeds limit".to_string(),
        };
        assert_eq!(err.to_string(), "Order quantity exceeds limit");
        assert_eq!(err.gateway_code(), Some(-1));
        assert!(err.is_gateway_error());
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::Connection("socket closed".into()).is_retryable());
        assert!(!Error::NoAccount.is_retryable());
    }
}
