//! Graphtec device session
//!
//! Owns the cutter's calibration and cutting state for one job and builds
//! the GP-GL command stream in order. The session moves through
//! `Uninitialized → Started → Ended`; each operation checks the current
//! state and fails with [`ProtocolStateError`] when called out of turn.
//!
//! Nothing is written to the device from here. The stream is collected in
//! memory and handed out by [`DeviceSession::into_bytes`] only once the
//! session has ended, so a failed job never produces partial output.

use super::capabilities::CutterCapabilities;
use super::command_creator::{Block, BlockKind, Command, DevicePoint};
use std::fmt;
use stencilcut_core::{AffineTransform, Error, PassConfig, Point, ProtocolStateError, ValidationError};
use tracing::{debug, trace};

/// Default media size in inches (12" wide roll, 11" feed)
pub const DEFAULT_MEDIA_SIZE: Point = Point { x: 12.0, y: 11.0 };

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Started,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Started => write!(f, "Started"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

/// Fields to merge into the session; `None` leaves the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    pub media_size: Option<Point>,
    pub offset: Option<Point>,
    pub matrix: Option<[f64; 4]>,
    pub speed: Option<u32>,
    pub force: Option<u32>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_size(mut self, size: Point) -> Self {
        self.media_size = Some(size);
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn matrix(mut self, matrix: [f64; 4]) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn force(mut self, force: u32) -> Self {
        self.force = Some(force);
        self
    }

    fn touches_pass(&self) -> bool {
        self.speed.is_some() || self.force.is_some()
    }
}

impl From<PassConfig> for SessionConfig {
    fn from(pass: PassConfig) -> Self {
        Self::new().speed(pass.speed).force(pass.force)
    }
}

/// GP-GL command stream builder for one cutting job
#[derive(Debug)]
pub struct DeviceSession {
    state: SessionState,
    capabilities: CutterCapabilities,
    transform: AffineTransform,
    media_size: Point,
    speed: Option<u32>,
    force: Option<u32>,
    /// A parameter block is owed before the next draw, pass change, or end
    parameters_pending: bool,
    blocks: Vec<Block>,
}

impl DeviceSession {
    pub fn new() -> Self {
        Self::with_capabilities(CutterCapabilities::default())
    }

    pub fn with_capabilities(capabilities: CutterCapabilities) -> Self {
        Self {
            state: SessionState::Uninitialized,
            capabilities,
            transform: AffineTransform::identity(),
            media_size: DEFAULT_MEDIA_SIZE,
            speed: None,
            force: None,
            parameters_pending: false,
            blocks: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    pub fn media_size(&self) -> Point {
        self.media_size
    }

    /// Current speed/force, once both have been set
    pub fn pass(&self) -> Option<PassConfig> {
        Some(PassConfig::new(self.speed?, self.force?))
    }

    pub fn capabilities(&self) -> &CutterCapabilities {
        &self.capabilities
    }

    /// Blocks emitted so far, in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Every emitted command, in order
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.blocks.iter().flat_map(|b| b.commands.iter())
    }

    /// Open the session: reset, home, and set the write area from the media size
    pub fn start(&mut self) -> Result<(), ProtocolStateError> {
        self.require("start", SessionState::Uninitialized)?;

        let upper_right = self.capabilities.to_steps(self.media_size);
        self.blocks.push(Block::new(
            BlockKind::Initialize,
            vec![
                Command::Reset,
                Command::Home,
                Command::Orientation(0),
                Command::LowerLeft(DevicePoint::new(0.0, 0.0)),
                Command::UpperRight(upper_right),
                Command::LineType(0),
            ],
        ));
        self.state = SessionState::Started;
        debug!(
            "Session started: media {}x{} in, offset {}",
            self.media_size.x,
            self.media_size.y,
            self.transform.offset()
        );
        Ok(())
    }

    /// Merge configuration into the session.
    ///
    /// Media size, offset and matrix may be set before `start()`; speed and
    /// force only while started. A speed or force change is written as a
    /// parameter block just before the next draw, or before the next pass
    /// change or `end()` when no draw follows, so every pass keeps its own
    /// block. The update is applied atomically: if any field is rejected,
    /// nothing changes.
    pub fn configure(&mut self, update: SessionConfig) -> Result<(), Error> {
        match self.state {
            SessionState::Started => {}
            SessionState::Uninitialized if !update.touches_pass() => {}
            _ => return Err(self.invalid("configure").into()),
        }

        if let Some(size) = update.media_size {
            if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
                return Err(ValidationError::InvalidValue {
                    field: "media_size".to_string(),
                    reason: format!("must be positive, got {}", size),
                }
                .into());
            }
        }
        if let Some(offset) = update.offset {
            if !(offset.x.is_finite() && offset.y.is_finite()) {
                return Err(ValidationError::InvalidValue {
                    field: "offset".to_string(),
                    reason: format!("must be finite, got {}", offset),
                }
                .into());
            }
        }
        let transform = match update.matrix {
            Some(matrix) => {
                let candidate = self.transform.with_matrix(matrix);
                let determinant = candidate.determinant();
                if !determinant.is_finite() || determinant == 0.0 {
                    return Err(ValidationError::SingularMatrix { determinant }.into());
                }
                candidate
            }
            None => self.transform,
        };
        if let Some(speed) = update.speed {
            self.capabilities.validate_speed(speed)?;
        }
        if let Some(force) = update.force {
            self.capabilities.validate_force(force)?;
        }

        self.transform = match update.offset {
            Some(offset) => transform.with_offset(offset),
            None => transform,
        };
        if let Some(size) = update.media_size {
            self.media_size = size;
        }
        if update.touches_pass() {
            self.flush_parameters();
            self.speed = update.speed.or(self.speed);
            self.force = update.force.or(self.force);
            self.parameters_pending = true;
        }
        Ok(())
    }

    /// Cut a single segment: travel to `p1`, cut to `p2`, lift
    pub fn line(&mut self, p1: Point, p2: Point) -> Result<(), ProtocolStateError> {
        self.require("line", SessionState::Started)?;
        self.flush_parameters();

        let start = self.to_device(p1);
        let end = self.to_device(p2);
        trace!("line {} -> {}", start, end);
        self.blocks.push(Block::new(
            BlockKind::Line,
            vec![Command::Move(start), Command::Draw(end), Command::Move(end)],
        ));
        Ok(())
    }

    /// Cut a closed path: travel to the first point, cut through the rest,
    /// cut back to the first point, lift.
    ///
    /// A single point yields a zero-length cut.
    pub fn closed_path(&mut self, points: &[Point]) -> Result<(), Error> {
        self.require("closed_path", SessionState::Started)?;
        let Some(&first) = points.first() else {
            return Err(ValidationError::EmptyPath.into());
        };
        self.flush_parameters();

        let first = self.to_device(first);
        let mut commands = Vec::with_capacity(points.len() + 2);
        commands.push(Command::Move(first));
        commands.extend(points[1..].iter().map(|&p| Command::Draw(self.to_device(p))));
        commands.push(Command::Draw(first));
        commands.push(Command::Move(first));
        trace!("closed path of {} points from {}", points.len(), first);

        self.blocks.push(Block::new(BlockKind::ClosedPath, commands));
        Ok(())
    }

    /// Close the session: reset factors, feed out, return to origin
    pub fn end(&mut self) -> Result<(), ProtocolStateError> {
        self.require("end", SessionState::Started)?;
        if self.parameters_pending {
            debug!("Pass ended without cuts");
            self.flush_parameters();
        }

        self.blocks.push(Block::new(
            BlockKind::Finalize,
            vec![
                Command::FactorReset,
                Command::FeedOut(0),
                Command::ReturnOrigin,
            ],
        ));
        self.state = SessionState::Ended;
        debug!("Session ended after {} blocks", self.blocks.len());
        Ok(())
    }

    /// The complete command stream; only available once the session ended
    pub fn into_bytes(self) -> Result<Vec<u8>, ProtocolStateError> {
        if self.state != SessionState::Ended {
            return Err(ProtocolStateError::Unfinished {
                state: self.state.to_string(),
            });
        }
        let stream: String = self.blocks.iter().map(Block::encode).collect();
        Ok(stream.into_bytes())
    }

    fn to_device(&self, p: Point) -> DevicePoint {
        self.capabilities.to_steps(self.transform.apply(p))
    }

    fn flush_parameters(&mut self) {
        if !self.parameters_pending {
            return;
        }
        let mut commands = Vec::with_capacity(2);
        if let Some(speed) = self.speed {
            commands.push(Command::Speed(speed));
        }
        if let Some(force) = self.force {
            commands.push(Command::Force(force));
        }
        self.blocks.push(Block::new(BlockKind::Parameters, commands));
        self.parameters_pending = false;
    }

    fn require(
        &self,
        operation: &str,
        expected: SessionState,
    ) -> Result<(), ProtocolStateError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &str) -> ProtocolStateError {
        ProtocolStateError::InvalidOperation {
            operation: operation.to_string(),
            state: self.state.to_string(),
        }
    }
}

impl Default for DeviceSession {
    fn default() -> Self {
        Self::new()
    }
}
