use std::fmt;

/// Result type for ares operations
pub type Result<T> = std::result::Result<T, AresError>;

/// Main error type for the ares trainer
#[derive(Debug, Clone)]
pub enum AresError {
    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Numerical computation errors
    NumericalError(String),

    /// Empty buffer or container
    EmptyBuffer(String),

    /// Environment contract violation
    Environment(String),

    /// Training error
    TrainingError(String),
}

impl fmt::Display for AresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AresError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            AresError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            AresError::IoError(msg) => write!(f, "IO error: {}", msg),
            AresError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AresError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            AresError::EmptyBuffer(msg) => write!(f, "Empty buffer: {}", msg),
            AresError::Environment(msg) => write!(f, "Environment error: {}", msg),
            AresError::TrainingError(msg) => write!(f, "Training error: {}", msg),
        }
    }
}

impl std::error::Error for AresError {}

// Conversion from std::io::Error
impl From<std::io::Error> for AresError {
    fn from(err: std::io::Error) -> Self {
        AresError::IoError(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for AresError {
    fn from(err: bincode::Error) -> Self {
        AresError::SerializationError(err.to_string())
    }
}

impl AresError {
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        AresError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
