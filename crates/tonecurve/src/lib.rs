//! Tone Curves for Image Processing
//!
//! This crate implements the curve engine behind tone, levels and response
//! curves: a handful of control points in `[0,1]×[0,1]` define a natural cubic
//! spline that maps input values to output values.
//!
//! # Overview
//!
//! - **[`tridiagonal`]**: Thomas-algorithm solver for tridiagonal systems
//! - **[`CubicSpline`]**: natural cubic spline built on the solver
//! - **[`CurvePointSet`]**: ordered, ε-separated control points with
//!   collision avoidance and a lazily rebuilt spline
//! - **[`NearestPointQuery`]**: hit-testing control points in pixel space
//! - **[`CurveLut`]**: pre-computed lookup tables for per-pixel application
//! - **[`codec`]**: canonical `x,y;` text form
//!
//! # Evaluation Policy
//!
//! `evaluate` always clamps its input to the knot range and its output to
//! `[0,1]`. The raw, unclamped polynomial is available through
//! [`CubicSpline::interpolate`].
//!
//! # Threading
//!
//! A [`CurvePointSet`] assumes a single writer; mutation and lazy rebuild take
//! `&mut self`. Built [`CubicSpline`] and [`CurveLut`] values are immutable
//! and can be shared between reader threads.
//!
//! # Example
//!
//! ```
//! use tonecurve::{ControlPoint, CurveLut, CurvePointSet};
//!
//! // Lift the midtones
//! let mut curve = CurvePointSet::default();
//! curve.insert(ControlPoint::new(0.5, 0.65))?;
//!
//! // Precompute once, then index per pixel
//! let lut = CurveLut::generate(&mut curve, 256)?;
//! let pixel = lut.to_u8()[128];
//! assert!(pixel > 128);
//! # Ok::<(), tonecurve::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codec;
pub mod config;
pub mod error;
pub mod lut;
pub mod nearest;
pub mod point;
pub mod point_set;
pub mod prelude;
pub mod spline;
pub mod tridiagonal;

pub use config::CurveConfig;
pub use error::{CurveError, CurveResult};
pub use lut::CurveLut;
pub use nearest::NearestPointQuery;
pub use point::ControlPoint;
pub use point_set::CurvePointSet;
pub use spline::{CubicSpline, SplineSegment};
pub use tridiagonal::TridiagonalSystem;
