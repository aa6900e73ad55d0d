//! Error types for the waitlist core.

use thiserror::Error;

/// Failure reported by a [`crate::WaitlistStore`].
///
/// The message is optional because remote stores do not always explain a
/// rejection; callers fall back to a generic text in that case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store answered and refused the write.
    #[error("Insert rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The write never got an answer (DNS, connection, TLS).
    #[error("Transport error: {}", .message.as_deref().unwrap_or("no message"))]
    Transport { message: Option<String> },

    /// The store is not usable with the current configuration.
    #[error("Store misconfigured: {0}")]
    Misconfigured(String),
}

impl StoreError {
    /// Create a rejection with a message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// Create a transport failure with a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: Some(message.into()),
        }
    }

    /// The human-readable message carried by this failure, if any.
    ///
    /// Blank messages count as missing.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::Rejected { message, .. } | Self::Transport { message } => message.as_deref(),
            Self::Misconfigured(message) => Some(message.as_str()),
        };
        message.filter(|m| !m.trim().is_empty())
    }
}

/// Errors loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_present() {
        let err = StoreError::rejected(409, "duplicate email");
        assert_eq!(err.message(), Some("duplicate email"));
        assert_eq!(err.to_string(), "Insert rejected (409): duplicate email");
    }

    #[test]
    fn test_blank_message_counts_as_missing() {
        let err = StoreError::Rejected {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.message(), None);

        let err = StoreError::Transport { message: None };
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "Transport error: no message");
    }
}
