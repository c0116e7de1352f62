//! Natural cubic spline through a sequence of control points.

use crate::error::{CurveError, CurveResult};
use crate::point::ControlPoint;
use crate::tridiagonal::TridiagonalSystem;

/// One cubic piece of a [`CubicSpline`].
///
/// For `t = x - x0` in `[0, width]` the segment evaluates
/// `a + b·t + ½·c·t² + ⅙·d·t³`. `c` is the second derivative at the left knot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSegment {
    /// Left knot.
    pub x0: f64,
    /// Distance to the right knot.
    pub width: f64,
    /// Value at the left knot.
    pub a: f64,
    /// First derivative at the left knot.
    pub b: f64,
    /// Second derivative at the left knot.
    pub c: f64,
    /// Third derivative over the segment.
    pub d: f64,
}

impl SplineSegment {
    #[inline]
    fn value_at(&self, t: f64) -> f64 {
        // Horner form of a + b·t + c/2·t² + d/6·t³.
        self.a + t * (self.b + t * (self.c / 2.0 + t * self.d / 6.0))
    }
}

/// A piecewise cubic interpolant with natural boundary conditions.
///
/// Built from points with strictly increasing, separated `x` values; the
/// second derivative is zero at the first and last knot and the spline passes
/// through every control point.
///
/// Evaluation is `O(log n)` and does not allocate. A spline is an immutable
/// value and can be shared between reader threads.
///
/// # Example
///
/// ```
/// use tonecurve::{ControlPoint, CubicSpline};
///
/// let spline = CubicSpline::build(&[
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(0.5, 0.5),
///     ControlPoint::new(1.0, 1.0),
/// ])?;
/// assert!((spline.evaluate(0.25) - 0.25).abs() < 1e-9);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    begin: f64,
    end: f64,
    /// Value of a single-point spline; unused otherwise.
    constant: f64,
    segments: Vec<SplineSegment>,
}

impl CubicSpline {
    /// Builds the spline through `points`.
    ///
    /// `points` must be sorted by strictly increasing `x`; a
    /// [`CurvePointSet`](crate::CurvePointSet) always satisfies this.
    ///
    /// - One point yields a constant spline.
    /// - Two points yield a straight line without solving any system.
    /// - Three or more points solve a tridiagonal system for the interior
    ///   second derivatives.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if `points` is empty.
    pub fn build(points: &[ControlPoint]) -> CurveResult<Self> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(CurveError::DegenerateCurve),
        };
        debug_assert!(
            points.windows(2).all(|w| w[1].x > w[0].x),
            "spline knots must be strictly increasing"
        );

        let intervals = points.len() - 1;
        if intervals == 0 {
            return Ok(Self {
                begin: first.x,
                end: first.x,
                constant: first.y,
                segments: Vec::new(),
            });
        }

        let h: Vec<f64> = points.windows(2).map(|w| w[1].x - w[0].x).collect();
        let a: Vec<f64> = points.iter().map(|p| p.y).collect();

        // Second derivatives at every knot; the ends stay 0.
        let mut c = vec![0.0; intervals + 1];
        if intervals >= 2 {
            let m = intervals - 1;
            let diag: Vec<f64> = (0..m).map(|i| 2.0 * (h[i] + h[i + 1])).collect();
            let off: Vec<f64> = (0..m - 1).map(|i| h[i + 1]).collect();
            let rhs: Vec<f64> = (0..m)
                .map(|i| {
                    6.0 * ((a[i + 2] - a[i + 1]) / h[i + 1] - (a[i + 1] - a[i]) / h[i])
                })
                .collect();
            // The matrix is symmetric: sub and super diagonals are equal.
            let interior = TridiagonalSystem::new(off.clone(), diag, off, rhs)?.solve()?;
            c[1..intervals].copy_from_slice(&interior);
        }

        let segments = (0..intervals)
            .map(|i| {
                let d = (c[i + 1] - c[i]) / h[i];
                let b = -0.5 * c[i] * h[i] - d * h[i] * h[i] / 6.0 + (a[i + 1] - a[i]) / h[i];
                SplineSegment {
                    x0: points[i].x,
                    width: h[i],
                    a: a[i],
                    b,
                    c: c[i],
                    d,
                }
            })
            .collect();

        Ok(Self {
            begin: first.x,
            end: last.x,
            constant: first.y,
            segments,
        })
    }

    /// First knot.
    pub fn begin(&self) -> f64 {
        self.begin
    }

    /// Last knot.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Number of cubic segments (`points - 1`).
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The cubic segments, ordered by knot.
    pub fn segments(&self) -> &[SplineSegment] {
        &self.segments
    }

    /// Evaluates the spline with clamping.
    ///
    /// Input is clamped to `[begin, end]` and the result to `[0,1]`. NaN
    /// input evaluates at the first knot.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.interpolate(x).clamp(0.0, 1.0)
    }

    /// Evaluates the raw polynomial with input clamped to `[begin, end]`.
    ///
    /// Unlike [`evaluate`](Self::evaluate) the output may overshoot `[0,1]`
    /// between knots.
    pub fn interpolate(&self, x: f64) -> f64 {
        let x = if x.is_nan() {
            self.begin
        } else {
            x.clamp(self.begin, self.end)
        };
        match self.segment_for(x) {
            Some(segment) => segment.value_at(x - segment.x0),
            None => self.constant,
        }
    }

    /// Finds the segment whose `[x0, x0 + width)` contains `x`; the last
    /// segment also covers its right knot.
    fn segment_for(&self, x: f64) -> Option<&SplineSegment> {
        let after = self.segments.partition_point(|s| s.x0 <= x);
        let index = after.saturating_sub(1).min(self.segments.len().checked_sub(1)?);
        self.segments.get(index)
    }
}
