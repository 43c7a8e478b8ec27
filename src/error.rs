//! Error types shared by every stage of the damage pipeline.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, FatigueError>;

/// Errors that can occur while counting cycles or aggregating damage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FatigueError {
    /// Not enough data for the requested stage to proceed
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),

    /// A bin width, window offset or material constant is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The damage sum would become infinite, NaN or change sign
    #[error("Numeric hazard: {0}")]
    NumericHazard(String),

    /// A raw sample is NaN or infinite
    #[error("Non-finite sample {value} at index {index}")]
    NonFiniteSample { index: usize, value: f64 },
}

impl FatigueError {
    /// Short, stable name of the error class, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FatigueError::InsufficientInput(_) => "insufficient-input",
            FatigueError::InvalidConfiguration(_) => "invalid-configuration",
            FatigueError::NumericHazard(_) => "numeric-hazard",
            FatigueError::NonFiniteSample { .. } => "non-finite-sample",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FatigueError::InsufficientInput("no cycles".to_string());
        assert_eq!(format!("{}", err), "Insufficient input: no cycles");

        let err = FatigueError::NonFiniteSample { index: 3, value: f64::NAN };
        assert_eq!(format!("{}", err), "Non-finite sample NaN at index 3");
        assert_eq!(err.kind(), "non-finite-sample");
    }
}
