//! Pre-computed lookup tables for per-pixel curve application.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::point_set::CurvePointSet;
use crate::spline::CubicSpline;

/// A curve sampled at evenly spaced inputs.
///
/// Entry `i` of an `n`-entry table holds the curve value at `i / (n - 1)`.
/// Image code precomputes one table per curve and indexes it per pixel
/// instead of evaluating the spline.
///
/// # Example
///
/// ```
/// use tonecurve::{ControlPoint, CurveLut, CurvePointSet};
///
/// let mut curve = CurvePointSet::default();
/// curve.insert(ControlPoint::new(0.5, 0.7))?;
///
/// let lut = CurveLut::generate(&mut curve, 256)?;
/// assert_eq!(lut.len(), 256);
/// let output = lut.lookup(0.5);
/// assert!((0.0..=1.0).contains(&output));
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CurveLut {
    table: Vec<f64>,
}

impl CurveLut {
    /// Table size used for 8-bit channels.
    pub const DEFAULT_SIZE: usize = 256;

    /// Samples `curve` into a table of `sample_count` entries, rebuilding its
    /// spline if needed.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] if the curve is empty.
    /// - [`CurveError::InvalidConfiguration`] if `sample_count < 2`.
    pub fn generate(curve: &mut CurvePointSet, sample_count: usize) -> CurveResult<Self> {
        Self::from_spline(curve.spline()?, sample_count)
    }

    /// Samples an already built spline.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `sample_count < 2`.
    pub fn from_spline(spline: &CubicSpline, sample_count: usize) -> CurveResult<Self> {
        Self::from_fn(sample_count, |x| spline.evaluate(x))
    }

    /// Create an identity table.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `sample_count < 2`.
    pub fn linear(sample_count: usize) -> CurveResult<Self> {
        Self::from_fn(sample_count, |x| x)
    }

    /// Create a table from a closure; outputs are clamped to `[0,1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `sample_count < 2`.
    pub fn from_fn<F>(sample_count: usize, f: F) -> CurveResult<Self>
    where
        F: Fn(f64) -> f64,
    {
        check_size(sample_count)?;
        let last = (sample_count - 1) as f64;
        let table = (0..sample_count)
            .map(|i| f(i as f64 / last).clamp(0.0, 1.0))
            .collect();
        Ok(Self { table })
    }

    /// Lookup with linear interpolation between entries.
    ///
    /// Input is clamped to `[0,1]`; NaN maps to the first entry.
    #[inline]
    pub fn lookup(&self, input: f64) -> f64 {
        let input = if input.is_nan() {
            0.0
        } else {
            input.clamp(0.0, 1.0)
        };
        let last = self.table.len() - 1;

        let scaled = input * last as f64;
        let index_low = (scaled as usize).min(last - 1);
        let fraction = scaled - index_low as f64;

        let low_value = self.table[index_low];
        let high_value = self.table[index_low + 1];

        low_value + fraction * (high_value - low_value)
    }

    /// The sampled values.
    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; a table has at least two entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The table scaled to `0..=65535`, rounded to nearest.
    pub fn to_u16(&self) -> Vec<u16> {
        self.table
            .iter()
            .map(|&v| (v * f64::from(u16::MAX)).round() as u16)
            .collect()
    }

    /// The table scaled to `0..=255`, rounded to nearest.
    pub fn to_u8(&self) -> Vec<u8> {
        self.table
            .iter()
            .map(|&v| (v * f64::from(u8::MAX)).round() as u8)
            .collect()
    }

    /// Check if the table never decreases.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[1] >= w[0])
    }

    /// Get the minimum value in the table.
    pub fn min_value(&self) -> f64 {
        self.table.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Get the maximum value in the table.
    pub fn max_value(&self) -> f64 {
        self.table.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

fn check_size(sample_count: usize) -> CurveResult<()> {
    if sample_count < 2 {
        return Err(CurveError::InvalidConfiguration(format!(
            "LUT needs at least 2 samples, got {}",
            sample_count
        )));
    }
    Ok(())
}

impl Serialize for CurveLut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.table.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CurveLut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let table: Vec<f64> = Vec::deserialize(deserializer)?;
        check_size(table.len()).map_err(serde::de::Error::custom)?;
        if let Some(bad) = table.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(serde::de::Error::custom(format!(
                "CurveLut entry {} is outside [0,1]",
                bad
            )));
        }
        Ok(CurveLut { table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::ControlPoint;
    use crate::CurveConfig;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn curve(raw: &[(f64, f64)]) -> CurvePointSet {
        must(CurvePointSet::from_points(
            raw.iter().map(|&p| p.into()).collect(),
            CurveConfig::default(),
        ))
    }

    #[test]
    fn test_generate_samples_evaluate() {
        let mut set = curve(&[(0.0, 0.0), (0.3, 0.6), (1.0, 1.0)]);
        let lut = must(CurveLut::generate(&mut set, 11));
        let spline = must(set.spline()).clone();
        for (i, v) in lut.table().iter().enumerate() {
            let x = i as f64 / 10.0;
            assert!((v - spline.evaluate(x)).abs() < 1e-15, "mismatch at {}", i);
        }
    }

    #[test]
    fn test_generate_endpoints() {
        let mut set = curve(&[(0.0, 0.1), (0.5, 0.4), (1.0, 0.9)]);
        let lut = must(CurveLut::generate(&mut set, 256));
        assert_eq!(lut.len(), 256);
        assert!((lut.table()[0] - 0.1).abs() < 1e-12);
        assert!((lut.table()[255] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_generate_empty_curve() {
        let mut set = must(CurvePointSet::empty(CurveConfig::default()));
        assert_eq!(
            CurveLut::generate(&mut set, 256),
            Err(CurveError::DegenerateCurve)
        );
    }

    #[test]
    fn test_invalid_size() {
        let mut set = CurvePointSet::default();
        assert!(CurveLut::generate(&mut set, 1).is_err());
        assert!(CurveLut::generate(&mut set, 0).is_err());
        assert!(CurveLut::linear(2).is_ok());
    }

    #[test]
    fn test_lookup_interpolation() {
        let lut = must(CurveLut::linear(CurveLut::DEFAULT_SIZE));
        for i in 0..100 {
            let input = i as f64 / 99.0;
            let output = lut.lookup(input);
            assert!(
                (output - input).abs() < 1e-9,
                "Linear LUT failed at input {}: got {}",
                input,
                output
            );
        }
    }

    #[test]
    fn test_lookup_clamping() {
        let lut = must(CurveLut::linear(16));
        assert!((lut.lookup(-0.5) - 0.0).abs() < 1e-12);
        assert!((lut.lookup(1.5) - 1.0).abs() < 1e-12);
        assert!((lut.lookup(f64::NAN) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_integer_tables() {
        let lut = must(CurveLut::linear(5));
        assert_eq!(lut.to_u16(), vec![0, 16384, 32768, 49151, 65535]);
        assert_eq!(lut.to_u8(), vec![0, 64, 128, 191, 255]);
    }

    #[test]
    fn test_from_fn_clamps() {
        let lut = must(CurveLut::from_fn(8, |x| x * 2.0 - 0.5));
        assert!((lut.min_value() - 0.0).abs() < 1e-12);
        assert!((lut.max_value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_monotonic() {
        assert!(must(CurveLut::linear(64)).is_monotonic());

        let mut wavy = curve(&[(0.0, 0.0), (0.3, 0.8), (0.6, 0.2), (1.0, 1.0)]);
        let lut = must(wavy.lut(64));
        assert!(!lut.is_monotonic());
    }

    #[test]
    fn test_insert_changes_table() {
        let mut set = CurvePointSet::default();
        let before = must(set.lut(32));
        must(set.insert(ControlPoint::new(0.5, 0.8)));
        let after = must(set.lut(32));
        assert_ne!(before, after);
    }

    #[test]
    fn test_serialization() {
        let lut = must(CurveLut::from_fn(32, |x| x * x));

        let json = serde_json::to_string(&lut).expect("serialization failed");
        let deserialized: CurveLut = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(lut.len(), deserialized.len());
        for (i, (a, b)) in lut.table().iter().zip(deserialized.table()).enumerate() {
            assert!((a - b).abs() < 1e-12, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_deserialization_rejects_bad_tables() {
        assert!(serde_json::from_str::<CurveLut>("[0.5]").is_err());
        assert!(serde_json::from_str::<CurveLut>("[0.0, 1.5]").is_err());
    }
}
