//! Error types for curve operations.

/// Error type for curve operations.
///
/// Covers point placement failures, evaluation of empty curves, text decoding
/// failures and invalid configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// A control point could not be placed in the curve.
    ///
    /// Raised by insert and move when the point is non-finite, has `y`
    /// outside `[0,1]`, or was pushed outside `[0,1]` while avoiding
    /// existing points. The curve is left unchanged.
    #[error("Control point ({x}, {y}) cannot be placed: {reason}")]
    InvalidPoint {
        /// Requested x coordinate.
        x: f64,
        /// Requested y coordinate.
        y: f64,
        /// Why the point was rejected.
        reason: &'static str,
    },

    /// The curve has no control points and cannot be evaluated.
    ///
    /// Whether an empty curve means identity or an error is up to the caller.
    #[error("Curve has no control points")]
    DegenerateCurve,

    /// The text form of a curve could not be decoded.
    #[error("Malformed curve encoding at token {token_index} ('{token}'): {reason}")]
    MalformedEncoding {
        /// Zero-based index of the offending `x,y` token.
        token_index: usize,
        /// The offending token text.
        token: String,
        /// Why decoding failed.
        reason: String,
    },

    /// A point index does not address an existing control point.
    #[error("Point index {index} out of range for curve with {len} points")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of points in the curve.
        len: usize,
    },

    /// Tridiagonal system vectors have inconsistent lengths.
    #[error(
        "Tridiagonal system dimension mismatch: sub={sub}, diag={diag}, super={sup}, rhs={rhs}"
    )]
    DimensionMismatch {
        /// Sub-diagonal length.
        sub: usize,
        /// Main diagonal length.
        diag: usize,
        /// Super-diagonal length.
        sup: usize,
        /// Right-hand side length.
        rhs: usize,
    },

    /// Invalid curve configuration.
    ///
    /// This covers errors like:
    /// - Non-positive or non-finite minimum separation
    /// - LUT with fewer than two samples
    /// - Negative or non-finite query scales
    #[error("Invalid curve configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_point() {
        let err = CurveError::InvalidPoint {
            x: 1.5,
            y: 0.25,
            reason: "x outside [0,1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("(1.5, 0.25)"));
        assert!(msg.contains("x outside [0,1]"));
    }

    #[test]
    fn test_error_display_malformed_encoding() {
        let err = CurveError::MalformedEncoding {
            token_index: 2,
            token: "0.5;".to_string(),
            reason: "missing ','".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("token 2"));
        assert!(msg.contains("missing ','"));
    }

    #[test]
    fn test_error_display_index() {
        let err = CurveError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(
            err.to_string(),
            "Point index 4 out of range for curve with 3 points"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err = CurveError::DegenerateCurve;
        let _: &dyn std::error::Error = &err;
    }
}
