//! Error types.
//!
//! The simulation core itself has no failure surface: every well-formed
//! input runs to completion. Errors arise only when building a scheduler
//! from a bad configuration or when parsing process data from text.

use thiserror::Error;

/// Rejected scheduler configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Round robin variants need a positive quantum.
    #[error("time quantum must be positive, got {0}")]
    InvalidTimeQuantum(i64),

    /// Aging needs a positive threshold.
    #[error("aging factor must be positive, got {0}")]
    InvalidAgingFactor(i64),

    /// No algorithm matches the given name.
    #[error("unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Failure reading or parsing CSV process data.
#[derive(Error, Debug)]
pub enum CsvError {
    /// The input had no header line.
    #[error("missing header line")]
    MissingHeader,

    /// The header did not match the expected columns.
    #[error("unexpected header: expected '{expected}', found '{found}'")]
    UnexpectedHeader { expected: String, found: String },

    /// A row had the wrong number of columns.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field could not be parsed as an integer.
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::InvalidTimeQuantum(0).to_string(),
            "time quantum must be positive, got 0"
        );
        assert_eq!(
            ConfigError::UnknownAlgorithm("lottery".into()).to_string(),
            "unknown scheduling algorithm: lottery"
        );
    }

    #[test]
    fn test_csv_error_messages() {
        let err = CsvError::InvalidField {
            line: 3,
            column: "burst_time",
            value: "x".into(),
        };
        assert_eq!(err.to_string(), "line 3: invalid burst_time value 'x'");

        let io: CsvError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert_eq!(io.to_string(), "disk gone");
    }
}
