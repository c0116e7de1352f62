//! Error types for curvectl

use thiserror::Error;
use tonecurve::CurveError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Exit code for command-line usage errors, after sysexits `EX_USAGE`.
///
/// Kept apart from the error classes below so a bad invocation is never
/// mistaken for a malformed curve.
pub const USAGE_EXIT_CODE: u8 = 64;

impl CliError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Curve(CurveError::MalformedEncoding { .. }) => 2,
            CliError::Curve(CurveError::InvalidPoint { .. })
            | CliError::Curve(CurveError::IndexOutOfRange { .. }) => 3,
            CliError::Curve(CurveError::InvalidConfiguration(_))
            | CliError::InvalidConfiguration(_)
            | CliError::JsonError(_) => 4,
            CliError::Curve(CurveError::DegenerateCurve) => 5,
            CliError::Curve(CurveError::DimensionMismatch { .. }) | CliError::IoError(_) => 1,
        }
    }

    /// Short machine-readable name used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Curve(CurveError::InvalidPoint { .. }) => "InvalidPoint",
            CliError::Curve(CurveError::DegenerateCurve) => "DegenerateCurve",
            CliError::Curve(CurveError::MalformedEncoding { .. }) => "MalformedEncoding",
            CliError::Curve(CurveError::IndexOutOfRange { .. }) => "IndexOutOfRange",
            CliError::Curve(CurveError::DimensionMismatch { .. }) => "DimensionMismatch",
            CliError::Curve(CurveError::InvalidConfiguration(_))
            | CliError::InvalidConfiguration(_) => "InvalidConfiguration",
            CliError::IoError(_) => "IoError",
            CliError::JsonError(_) => "JsonError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_per_class() {
        let malformed = CliError::from(CurveError::MalformedEncoding {
            token_index: 0,
            token: "x".to_string(),
            reason: "bad".to_string(),
        });
        assert_eq!(malformed.exit_code(), 2);
        assert_eq!(
            CliError::from(CurveError::IndexOutOfRange { index: 4, len: 2 }).exit_code(),
            3
        );
        assert_eq!(CliError::InvalidConfiguration("x".into()).exit_code(), 4);
        assert_eq!(CliError::from(CurveError::DegenerateCurve).exit_code(), 5);
    }

    #[test]
    fn usage_code_is_distinct() {
        let classes = [
            CliError::from(CurveError::MalformedEncoding {
                token_index: 0,
                token: "x".to_string(),
                reason: "bad".to_string(),
            }),
            CliError::from(CurveError::InvalidPoint {
                x: 0.5,
                y: 2.0,
                reason: "y outside [0,1]",
            }),
            CliError::InvalidConfiguration("x".into()),
            CliError::from(CurveError::DegenerateCurve),
        ];
        for err in &classes {
            assert_ne!(err.exit_code(), USAGE_EXIT_CODE, "{}", err.kind());
        }
    }

    #[test]
    fn curve_errors_display_transparently() {
        let err = CliError::from(CurveError::DegenerateCurve);
        assert_eq!(err.to_string(), CurveError::DegenerateCurve.to_string());
        assert_eq!(err.kind(), "DegenerateCurve");
    }
}
