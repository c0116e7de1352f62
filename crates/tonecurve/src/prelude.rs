//! Prelude for the tonecurve crate.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//!
//! ```
//! use tonecurve::prelude::*;
//!
//! let mut curve = CurvePointSet::default();
//! let lut = CurveLut::generate(&mut curve, 256)?;
//! let output = lut.lookup(0.5);
//! # Ok::<(), CurveError>(())
//! ```

pub use crate::config::CurveConfig;
pub use crate::error::{CurveError, CurveResult};
pub use crate::lut::CurveLut;
pub use crate::nearest::NearestPointQuery;
pub use crate::point::ControlPoint;
pub use crate::point_set::CurvePointSet;
pub use crate::spline::CubicSpline;
