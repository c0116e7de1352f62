//! curvectl - Tone Curve CLI
//!
//! Evaluate, sample and edit tone curves given in their `x,y;` text form.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tonecurve::{ControlPoint, CurveLut, NearestPointQuery};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::LutFormat;
use crate::error::{CliError, USAGE_EXIT_CODE};

#[derive(Parser)]
#[command(name = "curvectl")]
#[command(about = "Tone curve CLI - evaluate, sample and edit spline tone curves")]
#[command(version)]
#[command(long_about = "
curvectl works on tone curves written as 'x,y;' control points, for example
'0,0;0.5,0.7;1,1;'. Pass '-' instead of a curve to read it from stdin.

Edits print the new curve, so commands can be chained in scripts.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Curve configuration file (JSON)
    #[arg(long, global = true, env = "CURVECTL_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum x distance between control points, overrides the config file
    #[arg(long, global = true)]
    min_separation: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the curve at one or more inputs
    Eval {
        /// Encoded curve
        curve: String,
        /// Input values
        #[arg(required = true, allow_negative_numbers = true)]
        inputs: Vec<f64>,
    },

    /// Sample the curve into a lookup table
    Lut {
        /// Encoded curve
        curve: String,
        /// Number of entries
        #[arg(short, long, default_value_t = CurveLut::DEFAULT_SIZE)]
        size: usize,
        /// Table representation
        #[arg(short, long, value_enum, default_value_t = LutFormat::Float)]
        format: LutFormat,
    },

    /// Insert a control point
    Insert {
        /// Encoded curve
        curve: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Move the control point at INDEX
    Move {
        /// Encoded curve
        curve: String,
        index: usize,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Remove the control point at INDEX
    Remove {
        /// Encoded curve
        curve: String,
        index: usize,
    },

    /// Rebuild a canonical curve from unordered or crowded points
    Normalize {
        /// 'x,y' pairs separated by ';', in any order
        text: String,
    },

    /// Find the control point under a cursor position
    Nearest {
        /// Encoded curve
        curve: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Widget width in pixels
        #[arg(long, default_value_t = 256.0)]
        width: f64,
        /// Widget height in pixels
        #[arg(long, default_value_t = 256.0)]
        height: f64,
        /// Hit radius in pixels, per axis
        #[arg(long, default_value_t = 8.0)]
        threshold: f64,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("curvectl: {}", io);
            }
            return ExitCode::from(parse_exit_code(&e));
        }
    };

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("curvectl={0},tonecurve={0}", log_level).into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

/// Help and version requests succeed; every other parse failure is a usage error.
fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { USAGE_EXIT_CODE } else { 0 }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref(), cli.min_separation)?;

    match &cli.command {
        Commands::Eval { curve, inputs } => commands::eval(curve, inputs, config, cli.json),
        Commands::Lut {
            curve,
            size,
            format,
        } => commands::lut(curve, *size, *format, config, cli.json),
        Commands::Insert { curve, x, y } => {
            commands::insert(curve, ControlPoint::new(*x, *y), config, cli.json)
        }
        Commands::Move { curve, index, x, y } => {
            commands::move_point(curve, *index, ControlPoint::new(*x, *y), config, cli.json)
        }
        Commands::Remove { curve, index } => commands::remove(curve, *index, config, cli.json),
        Commands::Normalize { text } => commands::normalize(text, config, cli.json),
        Commands::Nearest {
            curve,
            x,
            y,
            width,
            height,
            threshold,
        } => {
            let params =
                NearestPointQuery::new(*width, *height, *threshold).map_err(CliError::from)?;
            commands::nearest(curve, ControlPoint::new(*x, *y), params, config, cli.json)
        }
    }
}
