//! Control points and shared geometry helpers.

use serde::{Deserialize, Serialize};

/// A curve control point in normalized `[0,1]×[0,1]` space.
///
/// Points have no identity beyond their position; within a
/// [`CurvePointSet`](crate::CurvePointSet) they are ordered by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Input coordinate.
    pub x: f64,
    /// Output coordinate.
    pub y: f64,
}

impl ControlPoint {
    /// Creates a control point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if the point lies inside the closed unit square.
    #[inline]
    pub fn is_in_unit_square(&self) -> bool {
        is_unit(self.x) && is_unit(self.y)
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(&self, other: &ControlPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<ControlPoint> for (f64, f64) {
    fn from(point: ControlPoint) -> Self {
        (point.x, point.y)
    }
}

/// Returns true if `value` is finite and within `[0,1]`.
#[inline]
pub(crate) fn is_unit(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
