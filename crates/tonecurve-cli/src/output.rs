//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;
use tonecurve::{ControlPoint, CurvePointSet};

use crate::error::CliError;

/// Sample table in the requested representation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LutValues {
    Float(Vec<f64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl LutValues {
    fn len(&self) -> usize {
        match self {
            LutValues::Float(v) => v.len(),
            LutValues::U8(v) => v.len(),
            LutValues::U16(v) => v.len(),
        }
    }

    fn format_entries(&self) -> Vec<String> {
        match self {
            LutValues::Float(v) => v.iter().map(|x| format!("{:.6}", x)).collect(),
            LutValues::U8(v) => v.iter().map(u8::to_string).collect(),
            LutValues::U16(v) => v.iter().map(u16::to_string).collect(),
        }
    }
}

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map(CliError::kind)
        .unwrap_or("Error")
}

pub fn print_evaluations(curve: &CurvePointSet, pairs: &[(f64, f64)], json: bool) {
    if json {
        let values: Vec<_> = pairs
            .iter()
            .map(|(input, output)| json!({ "input": input, "output": output }))
            .collect();
        print_json(
            &json!({
                "success": true,
                "curve": curve.to_string(),
                "values": values
            }),
            "evaluations",
        );
    } else {
        for (input, output) in pairs {
            println!("{} {} {}", input, "->".dimmed(), output);
        }
    }
}

pub fn print_lut(values: &LutValues, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "size": values.len(),
                "table": values
            }),
            "LUT",
        );
    } else {
        for (i, entry) in values.format_entries().iter().enumerate() {
            println!("{:>5} {}", i.to_string().dimmed(), entry);
        }
    }
}

/// Print the curve after an edit along with the affected point.
pub fn print_edit(
    action: &str,
    curve: &CurvePointSet,
    index: usize,
    point: ControlPoint,
    json: bool,
) {
    if json {
        print_json(
            &json!({
                "success": true,
                "action": action,
                "index": index,
                "point": point,
                "curve": curve.to_string()
            }),
            "edit result",
        );
    } else {
        eprintln!(
            "{} {} point {} at ({}, {})",
            "✓".green(),
            action,
            index,
            point.x,
            point.y
        );
        println!("{}", curve);
    }
}

pub fn print_curve(curve: &CurvePointSet, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "points": curve.points(),
                "curve": curve.to_string()
            }),
            "curve",
        );
    } else {
        println!("{}", curve);
    }
}

pub fn print_nearest(hit: Option<(usize, ControlPoint)>, json: bool) {
    if json {
        let output = match hit {
            Some((index, point)) => json!({ "success": true, "index": index, "point": point }),
            None => json!({ "success": true, "index": null }),
        };
        print_json(&output, "nearest point");
    } else {
        match hit {
            Some((index, point)) => println!("{} ({}, {})", index, point.x, point.y),
            None => println!("{}", "No point within threshold".yellow()),
        }
    }
}
