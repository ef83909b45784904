use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid cost '{0}'")]
    InvalidCost(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        StorageError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StorageError::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
