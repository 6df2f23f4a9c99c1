//! Cutting job orchestration
//!
//! Takes the extracted strokes and a validated [`JobConfig`] through the
//! whole pipeline: rotate, justify, measure, plan, then encode every pass
//! into one device session. Nothing leaves this module until the session
//! has ended cleanly.

use std::fmt;
use stencilcut_camtools::{border_path, justify, max_extent, rotate, CutPlan};
use stencilcut_communication::{DeviceSession, SessionConfig};
use stencilcut_core::{PassConfig, Point, Result, Stroke, ValidationError};
use stencilcut_settings::JobConfig;
use tracing::{debug, info, warn};

/// Registration margin added to the device offset, in inches
pub const REGISTRATION_MARGIN: f64 = 0.5;

/// What a finished job cut
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub strokes: usize,
    /// Segments (accuracy mode) or closed paths (speed mode) per pass
    pub cuts_per_pass: usize,
    pub passes: usize,
    pub border: bool,
    /// Justified drawing width and height in inches
    pub extent: (f64, f64),
    /// Pen-up travel between cuts within one pass, in inches
    pub travel: f64,
    pub bytes: usize,
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} strokes, {} cuts x {} passes, extent {:.3}x{:.3} in, travel {:.3} in, border {}, {} bytes",
            self.strokes,
            self.cuts_per_pass,
            self.passes,
            self.extent.0,
            self.extent.1,
            self.travel,
            if self.border { "on" } else { "off" },
            self.bytes
        )
    }
}

/// The finished command stream and its summary
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub bytes: Vec<u8>,
    pub summary: JobSummary,
}

/// Device offset for a job: user offset plus border plus registration margin
pub fn device_offset(config: &JobConfig) -> Point {
    Point::new(
        config.offset.x + config.border.x + REGISTRATION_MARGIN,
        config.offset.y + config.border.y + REGISTRATION_MARGIN,
    )
}

/// Encode a complete job into the device command stream
pub fn run_job(strokes: &[Stroke], config: &JobConfig) -> Result<Vec<u8>> {
    Ok(plan_and_encode(strokes, config)?.bytes)
}

/// Like [`run_job`], also reporting what was cut
pub fn plan_and_encode(strokes: &[Stroke], config: &JobConfig) -> Result<JobOutput> {
    config.validate()?;
    let passes = config.passes()?;

    if strokes.is_empty() {
        if !config.border.is_enabled() {
            return Err(ValidationError::NothingToCut.into());
        }
        warn!("Drawing is empty; cutting the border only");
    }

    let strokes = justify(&rotate(strokes, config.rotation));
    let (max_x, max_y) = max_extent(&strokes);
    let border = border_path(max_x, max_y, config.border);
    let plan = CutPlan::build(&strokes, config.cut_mode, config.border);
    debug!(
        "Planned {} {} cuts over a {:.3}x{:.3} in drawing",
        plan.len(),
        plan.mode(),
        max_x,
        max_y
    );

    let mut session = DeviceSession::new();
    session.configure(
        SessionConfig::new()
            .media_size(config.media_size)
            .offset(device_offset(config))
            .matrix(config.matrix),
    )?;
    session.start()?;

    for (index, pass) in passes.iter().enumerate() {
        debug!("Pass {}/{}: {}", index + 1, passes.len(), pass);
        cut_pass(&mut session, *pass, &plan, border.as_deref())?;
    }

    session.end()?;
    let bytes = session.into_bytes()?;

    let summary = JobSummary {
        strokes: strokes.len(),
        cuts_per_pass: plan.len(),
        passes: passes.len(),
        border: border.is_some(),
        extent: (max_x, max_y),
        travel: plan.travel_distance(),
        bytes: bytes.len(),
    };
    info!("Job encoded: {}", summary);
    Ok(JobOutput { bytes, summary })
}

fn cut_pass(
    session: &mut DeviceSession,
    pass: PassConfig,
    plan: &CutPlan,
    border: Option<&[Point]>,
) -> Result<()> {
    session.configure(pass.into())?;
    match plan {
        CutPlan::Segments(segments) => {
            for segment in segments {
                session.line(segment.start, segment.end)?;
            }
        }
        CutPlan::ClosedPaths(paths) => {
            for path in paths {
                session.closed_path(path.points())?;
            }
        }
    }
    if let Some(border) = border {
        session.closed_path(border)?;
    }
    Ok(())
}
