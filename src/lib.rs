//! # stencilcut
//!
//! Cuts fine-pitch SMT solder paste stencils from Gerber files on Graphtec
//! craft cutters (Silhouette Cameo, Portrait).
//!
//! ## Architecture
//!
//! stencilcut is organized as a workspace with multiple crates:
//!
//! 1. **stencilcut-core** - Points, strokes, segments, calibration transform, errors
//! 2. **stencilcut-camtools** - Rotation, justification, cut ordering, PIC import
//! 3. **stencilcut-communication** - GP-GL commands and the device session
//! 4. **stencilcut-settings** - Job configuration, option parsing, persistence
//! 5. **stencilcut** - Converter pipeline, job orchestration, CLI
//!
//! ## Pipeline
//!
//! Gerber → `gerbv` → PDF → `pstoedit` → PIC → strokes → rotate → justify →
//! cut plan → GP-GL stream, one pass per speed/force pair.

pub mod cli;
pub mod convert;
pub mod job;
pub mod output;

pub use cli::Cli;
pub use convert::{Converter, ProcessOutput, ProcessRunner, SystemRunner};
pub use job::{device_offset, plan_and_encode, run_job, JobOutput, JobSummary};
pub use output::OutputSink;

pub use stencilcut_camtools::{Border, CutMode, CutPlan};
pub use stencilcut_communication::{DeviceSession, SessionConfig, SessionState};
pub use stencilcut_core::{
    ConversionError, Error, PassConfig, Point, ProtocolStateError, Result, Segment, Stroke,
    ValidationError,
};
pub use stencilcut_settings::JobConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging
///
/// Logs go to standard error so the command stream can be piped from
/// standard output. `level` overrides `RUST_LOG`; without either, `info`.
pub fn init_logging(level: Option<tracing_subscriber::filter::LevelFilter>) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::builder()
            .with_default_directive(tracing::Level::INFO.into())
            .from_env_lossy(),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
