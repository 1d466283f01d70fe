//! Error types for sqlfrag

use thiserror::Error;

/// The main error type for fragment rendering
#[derive(Error, Debug)]
pub enum Error {
    /// Input tree has a shape the assembler cannot render
    #[error("Unsupported input shape: {message}")]
    UnsupportedShape { message: String },

    /// Join kind token not recognized
    #[error("Unknown join kind '{token}'")]
    UnknownJoinKind { token: String },

    /// Operand does not fit its operator
    #[error("Invalid operand for '{operator}': {message}")]
    InvalidOperand { operator: String, message: String },

    /// Group or join nesting exceeded the render depth limit
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    /// Invalid quoter or assembler configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for sqlfrag operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new unsupported shape error
    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            message: message.into(),
        }
    }

    /// Create a new unknown join kind error
    pub fn unknown_join_kind(token: impl Into<String>) -> Self {
        Self::UnknownJoinKind {
            token: token.into(),
        }
    }

    /// Create a new invalid operand error
    pub fn invalid_operand(operator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operator: operator.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
