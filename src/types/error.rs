//! Error types for synthetic embedding generation.
//!
//! Uses `thiserror` for error definitions with automatic `From` implementations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthError>;

/// Error type for all generator operations.
///
/// Every variant carries the operation or inputs that failed so callers can
/// tell which call went wrong without extra logging.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Random source unavailable or failed
    #[error("Random generation failed ({context}): {source}")]
    GenerationError {
        context: String,
        #[source]
        source: rand::Error,
    },

    /// Operands of differing dimension
    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Dimension not usable by the operation (e.g. zero)
    #[error("Invalid dimension for {operation}: {dimension}")]
    InvalidDimension {
        operation: &'static str,
        dimension: usize,
    },

    /// Zero-norm basis vector, zero final query component, etc.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Score solver exhausted its retry budget
    #[error("Score solver did not reach an independent vector after {attempts} attempts")]
    ConvergenceError { attempts: usize },

    /// More mutually orthogonal vectors requested than the space can hold
    #[error("Cannot build {count} mutually orthogonal vectors in dimension {dimension}")]
    BasisOverflow { count: usize, dimension: usize },

    /// Target score outside [0, 1] or not finite
    #[error("Score must be in [0, 1], got {0}")]
    InvalidScore(f64),

    /// Mock embedder asked for text it has no vector for
    #[error("No mock vector for document: {0}")]
    UnknownDocument(String),

    /// Two fixture documents share the same content
    #[error("Duplicate fixture document: {0}")]
    DuplicateDocument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl SynthError {
    /// Create a degenerate-input error with context.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Create a configuration error with context.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Wrap a random-source failure.
    ///
    /// # Arguments
    ///
    /// * `context` - What was being generated when the source failed
    /// * `source` - Underlying `rand` error
    pub fn generation(context: impl Into<String>, source: rand::Error) -> Self {
        Self::GenerationError {
            context: context.into(),
            source,
        }
    }

    /// Check if error is recoverable.
    ///
    /// # Returns
    ///
    /// `true` if retrying with fresh randomness may succeed, `false` for usage errors
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConvergenceError { .. } | Self::GenerationError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_inputs() {
        let err = SynthError::DimensionMismatch {
            operation: "dot",
            expected: 3,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in dot: expected 3, got 4"
        );

        let err = SynthError::BasisOverflow {
            count: 4,
            dimension: 3,
        };
        assert!(err.to_string().contains("4 mutually orthogonal vectors in dimension 3"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(SynthError::ConvergenceError { attempts: 100 }.is_recoverable());
        assert!(!SynthError::degenerate("zero norm").is_recoverable());
        assert!(!SynthError::InvalidScore(1.5).is_recoverable());
    }

    #[test]
    fn test_from_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SynthError = io.into();
        assert!(matches!(err, SynthError::IoError(_)));

        let json = serde_json::from_str::<Vec<f64>>("not json").unwrap_err();
        let err: SynthError = json.into();
        assert!(matches!(err, SynthError::JsonError(_)));
    }
}
