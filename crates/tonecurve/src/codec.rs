//! Canonical text form of a curve.
//!
//! A curve is written as `x,y;` per control point in x order, for example
//! `0,0;0.5,0.7;1,1;`. Numbers use the shortest representation that parses
//! back to the same `f64`, so encoding then decoding reproduces the points
//! exactly. Whitespace around tokens and empty tokens are ignored on input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::CurveConfig;
use crate::error::{CurveError, CurveResult};
use crate::point::{ControlPoint, is_unit};
use crate::point_set::CurvePointSet;

/// Separator between points.
pub const POINT_SEPARATOR: char = ';';
/// Separator between the coordinates of a point.
pub const COORDINATE_SEPARATOR: char = ',';

/// Encodes points in the canonical text form.
///
/// ```
/// use tonecurve::ControlPoint;
/// use tonecurve::codec::encode;
///
/// let text = encode(&[ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 0.5)]);
/// assert_eq!(text, "0,0;1,0.5;");
/// ```
pub fn encode(points: &[ControlPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for point in points {
        out.push_str(&format!(
            "{}{}{}{}",
            point.x, COORDINATE_SEPARATOR, point.y, POINT_SEPARATOR
        ));
    }
    out
}

/// Decodes the canonical text form into a point set.
///
/// Decoding is atomic: any malformed token fails the whole call. Points must
/// already be in increasing x order and separated by `config.min_separation`;
/// they are not repaired. An empty string decodes to an empty set.
///
/// # Errors
///
/// - [`CurveError::MalformedEncoding`] for unparsable tokens, coordinates
///   that are not finite or outside `[0,1]`, and x values that are out of
///   order or too close to the previous point.
/// - [`CurveError::InvalidConfiguration`] if `config` is invalid.
pub fn decode(text: &str, config: CurveConfig) -> CurveResult<CurvePointSet> {
    let mut points: Vec<ControlPoint> = Vec::new();

    let tokens = text
        .split(POINT_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    for (token_index, token) in tokens.enumerate() {
        let malformed = |reason: String| {
            tracing::warn!("Rejected curve token {} '{}': {}", token_index, token, reason);
            CurveError::MalformedEncoding {
                token_index,
                token: token.to_string(),
                reason,
            }
        };

        let (x_text, y_text) = token
            .split_once(COORDINATE_SEPARATOR)
            .ok_or_else(|| malformed(format!("missing '{}'", COORDINATE_SEPARATOR)))?;
        let x = parse_coordinate(x_text).map_err(&malformed)?;
        let y = parse_coordinate(y_text).map_err(&malformed)?;

        if let Some(prev) = points.last() {
            if x <= prev.x {
                return Err(malformed(format!(
                    "x {} does not increase past previous x {}",
                    x, prev.x
                )));
            }
            if config.collides(x, prev.x) {
                return Err(malformed(format!(
                    "x {} is closer than {} to previous x {}",
                    x, config.min_separation, prev.x
                )));
            }
        }
        points.push(ControlPoint::new(x, y));
    }

    CurvePointSet::from_points(points, config)
}

fn parse_coordinate(text: &str) -> Result<f64, String> {
    let text = text.trim();
    let value = f64::from_str(text).map_err(|e| format!("'{}' is not a number: {}", text, e))?;
    if !is_unit(value) {
        return Err(format!("{} is outside [0,1]", value));
    }
    Ok(value)
}

impl fmt::Display for CurvePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.points()))
    }
}

/// Decodes text that carries no configuration.
///
/// The separation is inferred: the default ε, narrowed to the tightest x gap
/// in the text (never below [`CurveConfig::MIN_SEPARATION_FLOOR`]). Any curve
/// whose ε is at or above the floor therefore decodes from its own encoding.
///
/// # Errors
///
/// Same as [`decode`], with the floor as the separation limit.
pub fn decode_inferred(text: &str) -> CurveResult<CurvePointSet> {
    let loose = decode(text, CurveConfig::new(CurveConfig::MIN_SEPARATION_FLOOR)?)?;
    let tightest = loose
        .points()
        .windows(2)
        .map(|w| w[1].x - w[0].x)
        .fold(CurveConfig::DEFAULT_MIN_SEPARATION, f64::min);
    let config = CurveConfig::new(tightest.max(CurveConfig::MIN_SEPARATION_FLOOR))?;
    CurvePointSet::from_points(loose.points().to_vec(), config)
}

impl FromStr for CurvePointSet {
    type Err = CurveError;

    /// Decodes with an inferred separation, see [`decode_inferred`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_inferred(s)
    }
}

/// Serialized form of a curve whose ε differs from the default.
#[derive(Serialize)]
struct ConfiguredCurve<'a> {
    points: &'a str,
    min_separation: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CurveRepr {
    Text(String),
    Configured { points: String, min_separation: f64 },
}

impl Serialize for CurvePointSet {
    /// Writes the bare text form for the default configuration and
    /// `{ "points", "min_separation" }` otherwise.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = encode(self.points());
        if *self.config() == CurveConfig::default() {
            serializer.serialize_str(&text)
        } else {
            ConfiguredCurve {
                points: &text,
                min_separation: self.config().min_separation,
            }
            .serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for CurvePointSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let curve = match CurveRepr::deserialize(deserializer)? {
            CurveRepr::Text(text) => decode_inferred(&text),
            CurveRepr::Configured {
                points,
                min_separation,
            } => CurveConfig::new(min_separation).and_then(|config| decode(&points, config)),
        };
        curve.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_encode_identity() {
        assert_eq!(CurvePointSet::default().to_string(), "0,0;1,1;");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_decode_basic() {
        let set = must(decode("0,0;0.5,0.7;1,1;", CurveConfig::default()));
        assert_eq!(
            set.points(),
            &[
                ControlPoint::new(0.0, 0.0),
                ControlPoint::new(0.5, 0.7),
                ControlPoint::new(1.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_missing_trailer() {
        let set = must(" 0 , 0 ;\n 0.25,0.5 ; 1,1".parse::<CurvePointSet>());
        assert_eq!(set.len(), 3);
        assert_eq!(set.point(1), Some(ControlPoint::new(0.25, 0.5)));
    }

    #[test]
    fn test_decode_empty() {
        let set = must(decode("", CurveConfig::default()));
        assert!(set.is_empty());
        let set = must(decode(" ; ;", CurveConfig::default()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("0,0;abc;1,1;", CurveConfig::default());
        assert!(matches!(
            err,
            Err(CurveError::MalformedEncoding { token_index: 1, .. })
        ));
        assert!(decode("0,0;0.5,x;", CurveConfig::default()).is_err());
        assert!(decode("0,0;0.5,0.5,0.5;", CurveConfig::default()).is_err());
        assert!(decode("0,0;NaN,0.5;", CurveConfig::default()).is_err());
        assert!(decode("0,0;inf,0.5;", CurveConfig::default()).is_err());
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(decode("0,0;1.5,1;", CurveConfig::default()).is_err());
        assert!(decode("0,-0.1;1,1;", CurveConfig::default()).is_err());
    }

    #[test]
    fn test_decode_rejects_order_and_separation() {
        let unordered = decode("0.5,0;0.25,1;", CurveConfig::default());
        assert!(matches!(
            unordered,
            Err(CurveError::MalformedEncoding { token_index: 1, .. })
        ));
        assert!(decode("0.5,0;0.5,1;", CurveConfig::default()).is_err());
        assert!(decode("0.5,0;0.50001,1;", CurveConfig::default()).is_err());
        assert!(decode("0.5,0;0.50001,1;", must(CurveConfig::new(1e-6))).is_ok());
    }

    #[test]
    fn test_round_trip_exact() {
        let mut set = CurvePointSet::default();
        must(set.insert(ControlPoint::new(0.1, 0.123_456_789_012_345_67)));
        must(set.insert(ControlPoint::new(1.0 / 3.0, 2.0 / 3.0)));
        must(set.insert(ControlPoint::new(0.1, 0.5)));
        let decoded = must(decode(&set.to_string(), *set.config()));
        assert_eq!(decoded, set);
    }

    #[test]
    fn test_serde_as_string() {
        let set = must("0,0;0.5,0.25;1,1;".parse::<CurvePointSet>());
        let json = must(serde_json::to_string(&set));
        assert_eq!(json, "\"0,0;0.5,0.25;1,1;\"");
        let back: CurvePointSet = must(serde_json::from_str(&json));
        assert_eq!(back, set);
        assert!(serde_json::from_str::<CurvePointSet>("\"0,0;bad\"").is_err());
    }

    fn tight_curve() -> CurvePointSet {
        let mut set = must(CurvePointSet::identity(must(CurveConfig::new(1e-6))));
        must(set.insert(ControlPoint::new(0.5, 0.5)));
        must(set.insert(ControlPoint::new(0.50001, 0.6)));
        set
    }

    #[test]
    fn test_text_round_trip_below_default_separation() {
        let set = tight_curve();
        assert_eq!(set.len(), 4);
        let back = must(set.to_string().parse::<CurvePointSet>());
        assert_eq!(back.points(), set.points());
        assert!(back.config().min_separation <= 1e-5 + 1e-12);
        assert!(back.config().min_separation >= CurveConfig::MIN_SEPARATION_FLOOR);
    }

    #[test]
    fn test_inferred_separation_defaults_for_wide_gaps() {
        let set = must(decode_inferred("0,0;0.5,0.5;1,1;"));
        assert_eq!(*set.config(), CurveConfig::default());
        let set = must(decode_inferred(""));
        assert_eq!(*set.config(), CurveConfig::default());
    }

    #[test]
    fn test_serde_keeps_separation() {
        let set = tight_curve();
        let json = must(serde_json::to_value(&set));
        assert_eq!(json["min_separation"], serde_json::json!(1e-6));
        let back: CurvePointSet = must(serde_json::from_value(json));
        assert_eq!(back.points(), set.points());
        assert_eq!(back.config(), set.config());

        let mut wide = must(CurvePointSet::identity(must(CurveConfig::new(0.05))));
        must(wide.insert(ControlPoint::new(0.5, 0.25)));
        let back: CurvePointSet = must(serde_json::from_str(&must(serde_json::to_string(&wide))));
        assert_eq!(back.config().min_separation, 0.05);
        assert_eq!(back.points(), wide.points());
    }

    #[test]
    fn test_serde_configured_form_validates() {
        let crowded = r#"{ "points": "0,0;0.5,0;0.50001,1;", "min_separation": 0.001 }"#;
        assert!(serde_json::from_str::<CurvePointSet>(crowded).is_err());
        let invalid = r#"{ "points": "0,0;1,1;", "min_separation": 0.9 }"#;
        assert!(serde_json::from_str::<CurvePointSet>(invalid).is_err());
    }
}
