//! Graphtec GP-GL Command Creator
//!
//! Typed GP-GL commands as accepted by Silhouette Cameo/Portrait class
//! cutters, and their byte encoding. Every command except the escape-prefixed
//! reset is terminated by ETX.

use std::fmt;

/// Escape, prefix of the reset sequence
pub const ESC: char = '\x1b';
/// End of transmission, second byte of the reset sequence
pub const EOT: char = '\x04';
/// End of text, terminates every GP-GL command
pub const ETX: char = '\x03';

/// A position in device steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for DevicePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3},{:.3}", self.x, self.y)
    }
}

/// GP-GL commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Reset the plotter (ESC EOT)
    Reset,
    /// Home the cutter carriage (TT)
    Home,
    /// Page orientation (FN), 0 = portrait
    Orientation(u8),
    /// Lower-left write limit (\)
    LowerLeft(DevicePoint),
    /// Upper-right write limit (Z)
    UpperRight(DevicePoint),
    /// Line type (L), 0 = solid
    LineType(u8),
    /// Tool speed (!)
    Speed(u32),
    /// Blade force (FX)
    Force(u32),
    /// Pen-up travel (M)
    Move(DevicePoint),
    /// Pen-down cut (D)
    Draw(DevicePoint),
    /// Reset scale factors (&1,1,1)
    FactorReset,
    /// Feed the media out (FO)
    FeedOut(u8),
    /// Return to the origin (H)
    ReturnOrigin,
}

impl Command {
    /// Encode the command, terminator included
    pub fn encode(&self) -> String {
        match self {
            Self::Reset => format!("{ESC}{EOT}"),
            Self::Home => format!("TT{ETX}"),
            Self::Orientation(n) => format!("FN{n}{ETX}"),
            Self::LowerLeft(p) => format!("\\{p}{ETX}"),
            Self::UpperRight(p) => format!("Z{p}{ETX}"),
            Self::LineType(n) => format!("L{n}{ETX}"),
            Self::Speed(s) => format!("!{s}{ETX}"),
            Self::Force(f) => format!("FX{f}{ETX}"),
            Self::Move(p) => format!("M{p}{ETX}"),
            Self::Draw(p) => format!("D{p}{ETX}"),
            Self::FactorReset => format!("&1,1,1{ETX}"),
            Self::FeedOut(n) => format!("FO{n}{ETX}"),
            Self::ReturnOrigin => format!("H{ETX}"),
        }
    }

    /// Whether the knife is down while this command executes
    pub fn is_cut(&self) -> bool {
        matches!(self, Self::Draw(_))
    }
}

/// Which part of the job a group of commands belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Initialize,
    Parameters,
    Line,
    ClosedPath,
    Finalize,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize => write!(f, "initialize"),
            Self::Parameters => write!(f, "parameters"),
            Self::Line => write!(f, "line"),
            Self::ClosedPath => write!(f, "closed path"),
            Self::Finalize => write!(f, "finalize"),
        }
    }
}

/// A group of commands emitted by one session operation
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub commands: Vec<Command>,
}

impl Block {
    pub fn new(kind: BlockKind, commands: Vec<Command>) -> Self {
        Self { kind, commands }
    }

    pub fn encode(&self) -> String {
        self.commands.iter().map(Command::encode).collect()
    }
}
