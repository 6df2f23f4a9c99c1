//! Cut path optimizer
//!
//! Turns a justified stroke set into a cut plan. Accuracy mode breaks every
//! stroke into segments and reorders them with a greedy nearest-neighbour
//! walk to keep knife travel short; speed mode cuts each stroke as a closed
//! path in drawing order. Also builds the rectangular border path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stencilcut_core::{Point, Segment, Stroke};
use tracing::debug;

/// Cutting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutMode {
    /// Travel-ordered individual segments (fine pitch)
    #[default]
    Accuracy,
    /// Each stroke cut as a closed path, in drawing order
    Speed,
}

impl CutMode {
    /// Numeric code used on the command line (0 = accuracy, 1 = speed)
    pub fn code(&self) -> u8 {
        match self {
            Self::Accuracy => 0,
            Self::Speed => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Accuracy),
            1 => Some(Self::Speed),
            _ => None,
        }
    }
}

impl fmt::Display for CutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accuracy => write!(f, "accuracy"),
            Self::Speed => write!(f, "speed"),
        }
    }
}

impl FromStr for CutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "accuracy" => Ok(Self::Accuracy),
            "1" | "speed" => Ok(Self::Speed),
            other => Err(format!("Unknown cut mode: {}", other)),
        }
    }
}

/// Border margins around the drawing's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Border {
    pub x: f64,
    pub y: f64,
}

impl Border {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// A border is cut unless both margins are zero
    pub fn is_enabled(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

/// Break strokes into their consecutive point pairs, in stroke order
pub fn decompose(strokes: &[Stroke]) -> Vec<Segment> {
    strokes.iter().flat_map(|s| s.segments()).collect()
}

/// Accuracy-mode ordering of every stroke segment.
///
/// `border` does not influence the ordering; the caller cuts the border
/// separately after the segments.
pub fn optimize(strokes: &[Stroke], border: Border) -> Vec<Segment> {
    let segments = decompose(strokes);
    debug!(
        "Optimizing {} segments from {} strokes (border enabled: {})",
        segments.len(),
        strokes.len(),
        border.is_enabled()
    );
    order_segments(segments)
}

struct Candidate {
    index: usize,
    reversed: bool,
    distance: f64,
}

/// Greedy nearest-neighbour ordering.
///
/// Starts with the first segment as given, then repeatedly takes the
/// remaining segment whose start or end lies nearest the knife, flipping it
/// when its end is the nearer one. Ties go to the earlier segment, and to
/// the start point over the end point.
pub fn order_segments(segments: Vec<Segment>) -> Vec<Segment> {
    let mut remaining = segments;
    let mut ordered = Vec::with_capacity(remaining.len());
    if remaining.is_empty() {
        return ordered;
    }

    let first = remaining.remove(0);
    let mut position = first.end;
    ordered.push(first);

    while !remaining.is_empty() {
        let mut best = Candidate {
            index: 0,
            reversed: false,
            distance: f64::INFINITY,
        };
        for (index, segment) in remaining.iter().enumerate() {
            let to_start = position.distance_to(&segment.start);
            if to_start < best.distance {
                best = Candidate {
                    index,
                    reversed: false,
                    distance: to_start,
                };
            }
            let to_end = position.distance_to(&segment.end);
            if to_end < best.distance {
                best = Candidate {
                    index,
                    reversed: true,
                    distance: to_end,
                };
            }
        }

        let segment = remaining.remove(best.index);
        let segment = if best.reversed {
            segment.reversed()
        } else {
            segment
        };
        position = segment.end;
        ordered.push(segment);
    }

    ordered
}

/// Pen-up distance between consecutive segments
pub fn travel_distance(segments: &[Segment]) -> f64 {
    segments
        .windows(2)
        .map(|w| w[0].end.distance_to(&w[1].start))
        .sum()
}

/// Rectangle around `(0, 0)..(max_x, max_y)` grown by the border margins.
///
/// Corners run lower-left, lower-right, upper-right, upper-left. Returns
/// `None` when the border is disabled.
pub fn border_path(max_x: f64, max_y: f64, border: Border) -> Option<Vec<Point>> {
    if !border.is_enabled() {
        return None;
    }
    Some(vec![
        Point::new(-border.x, -border.y),
        Point::new(max_x + border.x, -border.y),
        Point::new(max_x + border.x, max_y + border.y),
        Point::new(-border.x, max_y + border.y),
    ])
}

/// What the encoder will cut for every pass
#[derive(Debug, Clone, PartialEq)]
pub enum CutPlan {
    /// Individual segments, each cut as a line
    Segments(Vec<Segment>),
    /// Whole strokes, each cut as a closed path
    ClosedPaths(Vec<Stroke>),
}

impl CutPlan {
    /// Build the plan for the selected mode
    pub fn build(strokes: &[Stroke], mode: CutMode, border: Border) -> Self {
        match mode {
            CutMode::Accuracy => Self::Segments(optimize(strokes, border)),
            CutMode::Speed => {
                let plan = Self::ClosedPaths(strokes.to_vec());
                let closing = plan.implicitly_closed();
                if closing > 0 {
                    debug!("Speed mode closes {} open strokes", closing);
                }
                plan
            }
        }
    }

    /// Open strokes that a closed-path plan cuts back to their start
    pub fn implicitly_closed(&self) -> usize {
        match self {
            Self::Segments(_) => 0,
            Self::ClosedPaths(paths) => paths.iter().filter(|p| !p.is_closed()).count(),
        }
    }

    pub fn mode(&self) -> CutMode {
        match self {
            Self::Segments(_) => CutMode::Accuracy,
            Self::ClosedPaths(_) => CutMode::Speed,
        }
    }

    /// Number of draw operations per pass, border excluded
    pub fn len(&self) -> usize {
        match self {
            Self::Segments(s) => s.len(),
            Self::ClosedPaths(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pen-up travel between draws; closed paths start and end on their
    /// first point
    pub fn travel_distance(&self) -> f64 {
        match self {
            Self::Segments(s) => travel_distance(s),
            Self::ClosedPaths(paths) => paths
                .windows(2)
                .map(|w| w[0].points()[0].distance_to(&w[1].points()[0]))
                .sum(),
        }
    }
}
