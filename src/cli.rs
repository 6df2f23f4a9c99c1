//! Command line interface

use crate::convert::Converter;
use crate::job::plan_and_encode;
use crate::output::OutputSink;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use stencilcut_camtools::{Border, CutMode};
use stencilcut_core::{Point, ValidationError};
use stencilcut_settings::{parse, JobConfig};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

/// Cut SMT solder paste stencils on Graphtec cutters.
///
/// Converts a Gerber (or PDF/PIC) drawing into a GP-GL command stream,
/// written to standard output or a device such as /dev/usb/lp0.
#[derive(Parser, Debug)]
#[command(author, version = crate::LONG_VERSION, about)]
pub struct Cli {
    /// Gerber paste layer, PDF, or PIC drawing
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Translate to device coordinates x,y (inches)
    #[arg(long, value_name = "X,Y", value_parser = offset_arg, allow_hyphen_values = true)]
    pub offset: Option<Point>,

    /// Border around the drawing's bounding box; 0,0 to disable
    #[arg(long, value_name = "BX,BY", value_parser = border_arg)]
    pub border: Option<Border>,

    /// Transform coordinates by [a b; c d]
    #[arg(long, value_name = "A,B,C,D", value_parser = matrix_arg, allow_hyphen_values = true)]
    pub matrix: Option<[f64; 4]>,

    /// Speed per pass in device units
    #[arg(long, value_name = "S[,S2...]", value_parser = speed_arg)]
    pub speed: Option<NumberList>,

    /// Force per pass in device units
    #[arg(long, value_name = "F[,F2...]", value_parser = force_arg)]
    pub force: Option<NumberList>,

    /// 0 for highest accuracy (fine pitch), 1 for highest speed
    #[arg(long, alias = "cut_mode", value_name = "0|1", value_parser = parse::parse_cut_mode)]
    pub cut_mode: Option<CutMode>,

    /// Media size x,y (inches)
    #[arg(long, alias = "media_size", value_name = "X,Y", value_parser = media_size_arg)]
    pub media_size: Option<Point>,

    /// Rotate counterclockwise by this many degrees
    #[arg(long, value_name = "DEGREES", value_parser = rotate_arg, allow_hyphen_values = true)]
    pub rotate: Option<f64>,

    /// Job settings file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file or device; standard output when omitted or "-"
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log verbosity; overrides RUST_LOG
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]"
    )]
    pub log_level: Option<LevelFilter>,
}

/// A comma-separated list of numbers, kept whole as one argument value
#[derive(Debug, Clone, PartialEq)]
pub struct NumberList(pub Vec<f64>);

fn offset_arg(s: &str) -> Result<Point, ValidationError> {
    parse::parse_pair("offset", s)
}

fn border_arg(s: &str) -> Result<Border, ValidationError> {
    parse::parse_pair("border", s).map(|p| Border::new(p.x, p.y))
}

fn matrix_arg(s: &str) -> Result<[f64; 4], ValidationError> {
    parse::parse_matrix("matrix", s)
}

fn speed_arg(s: &str) -> Result<NumberList, ValidationError> {
    parse::parse_list("speed", s).map(NumberList)
}

fn force_arg(s: &str) -> Result<NumberList, ValidationError> {
    parse::parse_list("force", s).map(NumberList)
}

fn media_size_arg(s: &str) -> Result<Point, ValidationError> {
    parse::parse_pair("media_size", s)
}

fn rotate_arg(s: &str) -> Result<f64, ValidationError> {
    parse::parse_number("rotate", s)
}

impl Cli {
    /// Settings file (explicit or default location) with flags applied on top
    pub fn job_config(&self) -> Result<JobConfig> {
        let mut config = match &self.config {
            Some(path) => JobConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => JobConfig::load_or_default().context("Failed to load default config")?,
        };
        self.apply_to(&mut config);
        config.validate().context("Invalid job settings")?;
        Ok(config)
    }

    /// Override config fields given on the command line
    pub fn apply_to(&self, config: &mut JobConfig) {
        if let Some(offset) = self.offset {
            config.offset = offset;
        }
        if let Some(border) = self.border {
            config.border = border;
        }
        if let Some(matrix) = self.matrix {
            config.matrix = matrix;
        }
        if let Some(NumberList(speeds)) = &self.speed {
            config.speeds = speeds.clone();
        }
        if let Some(NumberList(forces)) = &self.force {
            config.forces = forces.clone();
        }
        if let Some(mode) = self.cut_mode {
            config.cut_mode = mode;
        }
        if let Some(size) = self.media_size {
            config.media_size = size;
        }
        if let Some(rotation) = self.rotate {
            config.rotation = rotation;
        }
    }

    /// Convert, encode, and write the job
    pub fn execute(&self) -> Result<()> {
        let config = self.job_config()?;
        debug!("Job settings: {:?}", config);

        let strokes = Converter::new()
            .strokes(&self.input)
            .with_context(|| format!("Failed to convert {}", self.input.display()))?;

        let job = plan_and_encode(&strokes, &config).context("Failed to encode cutting job")?;

        let sink = OutputSink::from_arg(self.output.clone());
        sink.write_all(&job.bytes)
            .with_context(|| format!("Failed to write command stream to {}", sink))?;
        info!("Sent {} passes to {}", job.summary.passes, sink);
        Ok(())
    }
}
