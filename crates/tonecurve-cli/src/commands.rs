//! Subcommand implementations

use std::io::Read;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use tonecurve::codec::{COORDINATE_SEPARATOR, POINT_SEPARATOR};
use tonecurve::{ControlPoint, CurveConfig, CurveError, CurvePointSet, NearestPointQuery};

use crate::error::CliError;
use crate::output::{self, LutValues};

/// Table representation printed by `lut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LutFormat {
    /// Values in `[0,1]`
    Float,
    /// 8-bit transfer table
    U8,
    /// 16-bit transfer table
    U16,
}

/// Builds the curve configuration from an optional JSON file and overrides.
pub fn load_config(
    path: Option<&Path>,
    min_separation: Option<f64>,
) -> Result<CurveConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            tracing::debug!("Loaded curve config from {}", path.display());
            serde_json::from_str::<CurveConfig>(&text)?
        }
        None => CurveConfig::default(),
    };
    if let Some(sep) = min_separation {
        config.min_separation = sep;
    }
    config
        .validate()
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;
    Ok(config)
}

/// Resolves a curve argument; `-` reads standard input.
fn read_text(arg: &str) -> Result<String, CliError> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(arg.to_string())
    }
}

fn read_curve(arg: &str, config: CurveConfig) -> Result<CurvePointSet, CliError> {
    let text = read_text(arg)?;
    Ok(tonecurve::codec::decode(&text, config)?)
}

pub fn eval(curve: &str, inputs: &[f64], config: CurveConfig, json: bool) -> Result<()> {
    let mut curve = read_curve(curve, config)?;
    let pairs = inputs
        .iter()
        .map(|&x| curve.value(x).map(|y| (x, y)))
        .collect::<Result<Vec<_>, CurveError>>()
        .map_err(CliError::from)?;
    output::print_evaluations(&curve, &pairs, json);
    Ok(())
}

pub fn lut(
    curve: &str,
    size: usize,
    format: LutFormat,
    config: CurveConfig,
    json: bool,
) -> Result<()> {
    let mut curve = read_curve(curve, config)?;
    let lut = curve.lut(size).map_err(CliError::from)?;
    let values = match format {
        LutFormat::Float => LutValues::Float(lut.table().to_vec()),
        LutFormat::U8 => LutValues::U8(lut.to_u8()),
        LutFormat::U16 => LutValues::U16(lut.to_u16()),
    };
    output::print_lut(&values, json);
    Ok(())
}

pub fn insert(curve: &str, point: ControlPoint, config: CurveConfig, json: bool) -> Result<()> {
    let mut curve = read_curve(curve, config)?;
    let index = curve.insert(point).map_err(CliError::from)?;
    let placed = curve.point(index).unwrap_or(point);
    output::print_edit("Inserted", &curve, index, placed, json);
    Ok(())
}

pub fn move_point(
    curve: &str,
    index: usize,
    point: ControlPoint,
    config: CurveConfig,
    json: bool,
) -> Result<()> {
    let mut curve = read_curve(curve, config)?;
    let new_index = curve.move_point(index, point).map_err(CliError::from)?;
    let placed = curve.point(new_index).unwrap_or(point);
    output::print_edit("Moved", &curve, new_index, placed, json);
    Ok(())
}

pub fn remove(curve: &str, index: usize, config: CurveConfig, json: bool) -> Result<()> {
    let mut curve = read_curve(curve, config)?;
    let removed = curve.remove(index).map_err(CliError::from)?;
    output::print_edit("Removed", &curve, index, removed, json);
    Ok(())
}

/// Reads `x,y` pairs in any order and places them one by one.
pub fn normalize(text: &str, config: CurveConfig, json: bool) -> Result<()> {
    let text = read_text(text)?;
    let mut curve = CurvePointSet::empty(config).map_err(CliError::from)?;

    let tokens = text
        .split(POINT_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    for (token_index, token) in tokens.enumerate() {
        let point = parse_pair(token).ok_or_else(|| {
            CliError::from(CurveError::MalformedEncoding {
                token_index,
                token: token.to_string(),
                reason: "expected 'x,y' with numeric coordinates".to_string(),
            })
        })?;
        match curve.insert(point) {
            Ok(index) => tracing::info!("Placed token {} at index {}", token_index, index),
            Err(e) => tracing::warn!("Dropped token {} '{}': {}", token_index, token, e),
        }
    }

    output::print_curve(&curve, json);
    Ok(())
}

fn parse_pair(token: &str) -> Option<ControlPoint> {
    let (x, y) = token.split_once(COORDINATE_SEPARATOR)?;
    let x = x.trim().parse::<f64>().ok()?;
    let y = y.trim().parse::<f64>().ok()?;
    Some(ControlPoint::new(x, y))
}

pub fn nearest(
    curve: &str,
    query: ControlPoint,
    params: NearestPointQuery,
    config: CurveConfig,
    json: bool,
) -> Result<()> {
    let curve = read_curve(curve, config)?;
    let hit = curve
        .nearest(query, &params)
        .and_then(|index| curve.point(index).map(|p| (index, p)));
    output::print_nearest(hit, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn load_config_defaults() -> TestResult {
        let config = load_config(None, None)?;
        assert_eq!(config, CurveConfig::default());
        Ok(())
    }

    #[test]
    fn load_config_override_wins() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "min_separation": 0.01 }}"#)?;
        let from_file = load_config(Some(file.path()), None)?;
        assert_eq!(from_file.min_separation, 0.01);
        let overridden = load_config(Some(file.path()), Some(0.002))?;
        assert_eq!(overridden.min_separation, 0.002);
        Ok(())
    }

    #[test]
    fn load_config_rejects_invalid() {
        assert!(matches!(
            load_config(None, Some(-1.0)),
            Err(CliError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn parse_pair_accepts_whitespace() {
        assert_eq!(parse_pair(" 0.5 , 0.25 "), Some(ControlPoint::new(0.5, 0.25)));
        assert_eq!(parse_pair("0.5"), None);
        assert_eq!(parse_pair("a,b"), None);
    }
}
