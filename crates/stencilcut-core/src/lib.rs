//! # stencilcut Core
//!
//! Core types and error handling for stencilcut.
//! Provides the geometric data model shared by the path optimizer and the
//! cutter command encoder: points, strokes, segments, bounding extents,
//! per-pass cutting parameters, and the calibration transform.

pub mod data;
pub mod error;
pub mod transform;

pub use data::{BoundingExtent, PassConfig, Point, Segment, Stroke};
pub use error::{ConversionError, Error, ProtocolStateError, Result, ValidationError};
pub use transform::AffineTransform;
