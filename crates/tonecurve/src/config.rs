//! Curve configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Slack applied when comparing knot distances against the minimum separation.
///
/// `0.5 + 1e-4 - 0.5` is not exactly `1e-4` in binary floating point, so a
/// point nudged by exactly one separation must still count as separated.
pub const SEPARATION_TOLERANCE: f64 = 1e-12;

/// Tunables for a [`CurvePointSet`](crate::CurvePointSet).
///
/// # Example
///
/// ```
/// use tonecurve::CurveConfig;
///
/// let config: CurveConfig = serde_json::from_str(r#"{ "min_separation": 0.001 }"#)?;
/// assert!(config.validate().is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Minimum distance between the x coordinates of two control points (ε).
    pub min_separation: f64,
}

impl CurveConfig {
    /// Default minimum knot separation.
    pub const DEFAULT_MIN_SEPARATION: f64 = 1e-4;

    /// Smallest accepted separation; must stay well above [`SEPARATION_TOLERANCE`].
    pub const MIN_SEPARATION_FLOOR: f64 = 1e-9;

    /// Creates a configuration with the given minimum separation, validated.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] when the separation is not
    /// finite, below [`Self::MIN_SEPARATION_FLOOR`], or too large for two points to fit in `[0,1]`.
    pub fn new(min_separation: f64) -> CurveResult<Self> {
        let config = Self { min_separation };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] describing the first
    /// invalid field.
    pub fn validate(&self) -> CurveResult<()> {
        if !self.min_separation.is_finite() {
            return Err(CurveError::InvalidConfiguration(
                "min_separation must be finite".to_string(),
            ));
        }
        if self.min_separation < Self::MIN_SEPARATION_FLOOR {
            return Err(CurveError::InvalidConfiguration(format!(
                "min_separation must be >= {}, got {}",
                Self::MIN_SEPARATION_FLOOR,
                self.min_separation
            )));
        }
        if self.min_separation > 0.5 {
            return Err(CurveError::InvalidConfiguration(format!(
                "min_separation must be <= 0.5, got {}",
                self.min_separation
            )));
        }
        Ok(())
    }

    /// Returns true if two knots at `a` and `b` are closer than the minimum separation.
    #[inline]
    pub fn collides(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.min_separation - SEPARATION_TOLERANCE
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            min_separation: Self::DEFAULT_MIN_SEPARATION,
        }
    }
}
