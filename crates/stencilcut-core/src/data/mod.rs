//! Data models for cut geometry
//!
//! This module provides:
//! - Points in drawing coordinates (inches)
//! - Strokes: non-empty polylines with a caller-asserted closed flag
//! - Segments: directed two-point edges, the unit of travel optimization
//! - Bounding extents over stroke sets
//! - Per-pass speed/force settings

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by the given deltas
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed edge between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// The same edge traversed end to start
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Whether both segments cover the same edge, in either direction
    pub fn same_edge(&self, other: &Segment) -> bool {
        self == other || *self == other.reversed()
    }
}

/// An ordered polyline extracted from the drawing
///
/// A stroke always holds at least one point. Whether it is closed is
/// asserted by whoever produced it; coincident endpoints are not inspected.
/// Strokes are immutable: every transform builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    closed: bool,
}

impl Stroke {
    /// Create an open stroke
    pub fn new(points: Vec<Point>) -> Result<Self, ValidationError> {
        Self::with_closed(points, false)
    }

    /// Create a stroke asserted closed by the caller
    pub fn closed(points: Vec<Point>) -> Result<Self, ValidationError> {
        Self::with_closed(points, true)
    }

    pub fn with_closed(points: Vec<Point>, closed: bool) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptyStroke);
        }
        Ok(Self { points, closed })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the source path returned to its start.
    ///
    /// Informational: speed mode cuts every stroke as a closed path and
    /// accuracy mode cuts only the listed point pairs, so the flag never
    /// changes the cut. It is reported when speed mode closes an open stroke.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build a new stroke by mapping every point, keeping the closed flag
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: FnMut(&Point) -> Point,
    {
        Self {
            points: self.points.iter().map(f).collect(),
            closed: self.closed,
        }
    }

    /// Consecutive point pairs, in stroke order
    ///
    /// No closing segment is synthesized for closed strokes; it is present
    /// only when the point sequence itself returns to the start.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }
}

/// Axis-aligned bounds of a set of strokes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingExtent {
    /// Bounds of every point of every stroke, or `None` for an empty set
    pub fn of(strokes: &[Stroke]) -> Option<Self> {
        let mut points = strokes.iter().flat_map(|s| s.points().iter());
        let first = points.next()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(init, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Speed and force for one cutting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    pub speed: u32,
    pub force: u32,
}

impl PassConfig {
    pub fn new(speed: u32, force: u32) -> Self {
        Self { speed, force }
    }
}

impl fmt::Display for PassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "speed {} force {}", self.speed, self.force)
    }
}
