//! Ordered, separated control-point sets with a lazily rebuilt spline.

use crate::config::CurveConfig;
use crate::error::{CurveError, CurveResult};
use crate::lut::CurveLut;
use crate::nearest::NearestPointQuery;
use crate::point::{ControlPoint, is_unit};
use crate::spline::CubicSpline;

/// Tolerance used by [`CurvePointSet::is_identity`] and
/// [`CurvePointSet::is_constant`].
const SHAPE_TOLERANCE: f64 = 1e-9;

/// Cached spline state of a [`CurvePointSet`].
#[derive(Debug, Clone, PartialEq)]
enum SplineState {
    /// Points changed since the last build.
    Dirty,
    /// Spline matches the current points.
    Built(CubicSpline),
}

/// The control points of a curve.
///
/// Invariants, upheld by every mutating operation:
/// - points are sorted by strictly increasing `x`;
/// - consecutive points are at least `min_separation` apart in `x`;
/// - every coordinate is finite and within `[0,1]`.
///
/// The set owns its [`CubicSpline`]. Mutations mark it dirty and the next
/// evaluation rebuilds it. Indices shift on insert and remove; callers that
/// track a selected point should use the index returned by each operation.
///
/// # Example
///
/// ```
/// use tonecurve::{ControlPoint, CurvePointSet};
///
/// let mut curve = CurvePointSet::default(); // (0,0), (1,1)
/// let index = curve.insert(ControlPoint::new(0.5, 0.7))?;
/// assert_eq!(index, 1);
/// assert!((curve.value(0.5)? - 0.7).abs() < 1e-9);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CurvePointSet {
    points: Vec<ControlPoint>,
    config: CurveConfig,
    state: SplineState,
}

impl CurvePointSet {
    /// Creates an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `config` is invalid.
    pub fn empty(config: CurveConfig) -> CurveResult<Self> {
        config.validate()?;
        Ok(Self {
            points: Vec::new(),
            config,
            state: SplineState::Dirty,
        })
    }

    /// Creates the identity curve `(0,0), (1,1)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `config` is invalid.
    pub fn identity(config: CurveConfig) -> CurveResult<Self> {
        config.validate()?;
        Ok(Self::identity_unchecked(config))
    }

    fn identity_unchecked(config: CurveConfig) -> Self {
        Self {
            points: vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)],
            config,
            state: SplineState::Dirty,
        }
    }

    /// Creates a set from points that already satisfy the invariants.
    ///
    /// Points are not reordered or nudged; use [`insert`](Self::insert) for
    /// collision avoidance.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfiguration`] if `config` is invalid.
    /// - [`CurveError::InvalidPoint`] if a point is outside the unit square,
    ///   out of order, or closer than `min_separation` to its predecessor.
    pub fn from_points(points: Vec<ControlPoint>, config: CurveConfig) -> CurveResult<Self> {
        config.validate()?;
        validate_points(&points, &config)?;
        Ok(Self {
            points,
            config,
            state: SplineState::Dirty,
        })
    }

    /// Replaces all points, validating them like [`from_points`](Self::from_points).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidPoint`] and leaves the set unchanged if
    /// the points violate the invariants.
    pub fn set_points(&mut self, points: Vec<ControlPoint>) -> CurveResult<()> {
        validate_points(&points, &self.config)?;
        self.points = points;
        self.mark_dirty();
        Ok(())
    }

    /// The control points, sorted by `x`.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// The point at `index`, if any.
    pub fn point(&self, index: usize) -> Option<ControlPoint> {
        self.points.get(index).copied()
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The configuration this set was created with.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Returns true if the spline must be rebuilt before the next evaluation.
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, SplineState::Dirty)
    }

    /// Inserts a point at its sorted position.
    ///
    /// The point is first pushed away from existing points closer than
    /// `min_separation` (see
    /// [`jump_over_existing_points`](Self::jump_over_existing_points)).
    /// Returns the index of the inserted point.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidPoint`] and leaves the set unchanged if
    /// the point is invalid or cannot be placed inside `[0,1]`.
    pub fn insert(&mut self, point: ControlPoint) -> CurveResult<usize> {
        let placed = self.place(point, None)?;
        let index = self.points.partition_point(|p| p.x < placed.x);
        self.points.insert(index, placed);
        self.mark_dirty();
        tracing::debug!(
            "Inserted control point ({}, {}) at index {}",
            placed.x,
            placed.y,
            index
        );
        Ok(index)
    }

    /// Moves the point at `index` to `point`.
    ///
    /// The moved point is excluded from its own collision check. The set is
    /// re-sorted if the move changes the x order; the point's new index is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`CurveError::IndexOutOfRange`] if `index` is not a valid index.
    /// - [`CurveError::InvalidPoint`] if the point cannot be placed; the set
    ///   is left unchanged.
    pub fn move_point(&mut self, index: usize, point: ControlPoint) -> CurveResult<usize> {
        if index >= self.points.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        let placed = self.place(point, Some(index))?;
        self.points.remove(index);
        let new_index = self.points.partition_point(|p| p.x < placed.x);
        self.points.insert(new_index, placed);
        self.mark_dirty();
        tracing::debug!(
            "Moved control point {} to ({}, {}) at index {}",
            index,
            placed.x,
            placed.y,
            new_index
        );
        Ok(new_index)
    }

    /// Removes and returns the point at `index`.
    ///
    /// Removing down to one point leaves a constant curve; removing the last
    /// point leaves an empty curve that fails evaluation with
    /// [`CurveError::DegenerateCurve`].
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::IndexOutOfRange`] if `index` is not a valid index.
    pub fn remove(&mut self, index: usize) -> CurveResult<ControlPoint> {
        if index >= self.points.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        let removed = self.points.remove(index);
        self.mark_dirty();
        tracing::debug!("Removed control point {} ({} left)", index, self.points.len());
        Ok(removed)
    }

    /// Pushes `point` away from existing points closer than `min_separation`.
    ///
    /// Every point except the one at `exclude` is checked in x order. A
    /// colliding candidate is moved to `p.x + ε` when it is at or right of
    /// `p`, otherwise to `p.x - ε`. Passes repeat until the candidate is clear
    /// of all points, so one point can be pushed several times.
    ///
    /// Returns false if the candidate ends up outside `[0,1]` or no clear
    /// position is found within the pass budget (a gap narrower than `2ε`
    /// between two neighbours can trap it). `point.x` holds the last tried
    /// position either way.
    pub fn jump_over_existing_points(
        &self,
        point: &mut ControlPoint,
        exclude: Option<usize>,
    ) -> bool {
        let epsilon = self.config.min_separation;
        let others = || {
            self.points
                .iter()
                .enumerate()
                .filter(move |(i, _)| Some(*i) != exclude)
                .map(|(_, p)| p)
        };

        // One extra pass to confirm the final position.
        for _ in 0..=self.points.len() {
            let mut moved = false;
            for p in others() {
                if self.config.collides(p.x, point.x) {
                    point.x = if point.x >= p.x {
                        p.x + epsilon
                    } else {
                        p.x - epsilon
                    };
                    moved = true;
                }
            }
            if !is_unit(point.x) {
                return false;
            }
            if !moved {
                return true;
            }
        }
        false
    }

    /// Validates and places a candidate point, excluding `exclude` from the
    /// collision check.
    fn place(&self, point: ControlPoint, exclude: Option<usize>) -> CurveResult<ControlPoint> {
        let reject = |reason: &'static str| {
            tracing::debug!(
                "Rejected control point ({}, {}): {}",
                point.x,
                point.y,
                reason
            );
            CurveError::InvalidPoint {
                x: point.x,
                y: point.y,
                reason,
            }
        };

        if !point.is_finite() {
            return Err(reject("coordinates must be finite"));
        }
        if !is_unit(point.y) {
            return Err(reject("y outside [0,1]"));
        }
        let mut candidate = point;
        if !self.jump_over_existing_points(&mut candidate, exclude) {
            return Err(reject("no room for the point inside [0,1]"));
        }
        Ok(candidate)
    }

    fn mark_dirty(&mut self) {
        self.state = SplineState::Dirty;
    }

    /// Rebuilds the spline from the current points if it is dirty.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if the set is empty.
    pub fn rebuild(&mut self) -> CurveResult<()> {
        if let SplineState::Dirty = self.state {
            let spline = CubicSpline::build(&self.points)?;
            tracing::debug!(
                "Rebuilt cubic spline with {} segments",
                spline.segment_count()
            );
            self.state = SplineState::Built(spline);
        }
        Ok(())
    }

    /// The up-to-date spline, rebuilding it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if the set is empty.
    pub fn spline(&mut self) -> CurveResult<&CubicSpline> {
        self.rebuild()?;
        match &self.state {
            SplineState::Built(spline) => Ok(spline),
            SplineState::Dirty => Err(CurveError::DegenerateCurve),
        }
    }

    /// The spline if it is up to date, without rebuilding.
    pub fn built_spline(&self) -> Option<&CubicSpline> {
        match &self.state {
            SplineState::Built(spline) => Some(spline),
            SplineState::Dirty => None,
        }
    }

    /// Evaluates the curve at `x` (clamped input and output).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if the set is empty.
    pub fn value(&mut self, x: f64) -> CurveResult<f64> {
        Ok(self.spline()?.evaluate(x))
    }

    /// Samples the curve into a lookup table of `sample_count` entries.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] if the set is empty.
    /// - [`CurveError::InvalidConfiguration`] if `sample_count < 2`.
    pub fn lut(&mut self, sample_count: usize) -> CurveResult<CurveLut> {
        CurveLut::from_spline(self.spline()?, sample_count)
    }

    /// Index of the point nearest to `query` within the query's pixel
    /// threshold.
    pub fn nearest(&self, query: ControlPoint, params: &NearestPointQuery) -> Option<usize> {
        params.find(query, &self.points)
    }

    /// Returns true if every point lies on `y = x`.
    pub fn is_identity(&self) -> bool {
        self.points
            .iter()
            .all(|p| (p.x - p.y).abs() < SHAPE_TOLERANCE)
    }

    /// Returns true if every point has `y == value`.
    pub fn is_constant(&self, value: f64) -> bool {
        self.points
            .iter()
            .all(|p| (p.y - value).abs() < SHAPE_TOLERANCE)
    }
}

impl Default for CurvePointSet {
    fn default() -> Self {
        Self::identity_unchecked(CurveConfig::default())
    }
}

impl PartialEq for CurvePointSet {
    /// Curves are equal when their points are equal; the cached spline and
    /// configuration are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

/// Checks the set invariants for an externally supplied point list.
fn validate_points(points: &[ControlPoint], config: &CurveConfig) -> CurveResult<()> {
    let mut previous: Option<&ControlPoint> = None;
    for point in points {
        let reason = if !point.is_in_unit_square() {
            Some("coordinates must be finite and within [0,1]")
        } else {
            match previous {
                Some(prev) if point.x <= prev.x => Some("x values must be strictly increasing"),
                Some(prev) if config.collides(point.x, prev.x) => {
                    Some("x values closer than the minimum separation")
                }
                _ => None,
            }
        };
        if let Some(reason) = reason {
            return Err(CurveError::InvalidPoint {
                x: point.x,
                y: point.y,
                reason,
            });
        }
        previous = Some(point);
    }
    Ok(())
}
