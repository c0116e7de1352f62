//! Hit-testing control points in screen space.

use crate::error::{CurveError, CurveResult};
use crate::point::ControlPoint;

/// Parameters for finding the control point under a cursor.
///
/// Distances are compared in normalized space, but the final acceptance test
/// is done per axis in pixels: the nearest point is accepted only if it is
/// closer than `pixel_threshold` horizontally *and* vertically after scaling
/// by `x_scale` and `y_scale` (for example a widget's width and height).
///
/// # Example
///
/// ```
/// use tonecurve::{ControlPoint, NearestPointQuery};
///
/// let points = [ControlPoint::new(0.0, 0.0), ControlPoint::new(0.5, 0.5)];
/// let query = NearestPointQuery::new(255.0, 255.0, 5.0)?;
/// assert_eq!(query.find(ControlPoint::new(0.51, 0.49), &points), Some(1));
/// assert_eq!(query.find(ControlPoint::new(0.8, 0.5), &points), None);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPointQuery {
    x_scale: f64,
    y_scale: f64,
    pixel_threshold: f64,
}

impl NearestPointQuery {
    /// Creates query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if any value is negative
    /// or not finite.
    pub fn new(x_scale: f64, y_scale: f64, pixel_threshold: f64) -> CurveResult<Self> {
        for (name, value) in [
            ("x_scale", x_scale),
            ("y_scale", y_scale),
            ("pixel_threshold", pixel_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CurveError::InvalidConfiguration(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(Self {
            x_scale,
            y_scale,
            pixel_threshold,
        })
    }

    /// Index of the point nearest to `query` if it is within the threshold.
    pub fn find(&self, query: ControlPoint, points: &[ControlPoint]) -> Option<usize> {
        nearest(
            query,
            points,
            self.x_scale,
            self.y_scale,
            self.pixel_threshold,
        )
    }
}

/// Index of the point nearest to `query` within `pixel_threshold` pixels on
/// both axes, or `None`.
///
/// Linear scan: point sets are small.
pub fn nearest(
    query: ControlPoint,
    points: &[ControlPoint],
    x_scale: f64,
    y_scale: f64,
    pixel_threshold: f64,
) -> Option<usize> {
    let (index, point) = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(&query)
                .total_cmp(&b.distance_squared(&query))
        })?;

    let within_x = (point.x - query.x).abs() * x_scale < pixel_threshold;
    let within_y = (point.y - query.y).abs() * y_scale < pixel_threshold;
    (within_x && within_y).then_some(index)
}
