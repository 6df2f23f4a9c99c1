//! Error handling for stencilcut
//!
//! Provides error types for every layer of a cutting job:
//! - Validation errors (configuration and input shape)
//! - Protocol state errors (encoder lifecycle violations)
//! - Conversion errors (external renderer/extractor failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Validation error type
///
/// Raised for malformed numeric configuration and for input that leaves
/// nothing to cut.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A token could not be parsed as a finite number
    #[error("Invalid number for '{field}': {value:?}")]
    InvalidNumber {
        /// The option or setting being parsed.
        field: String,
        /// The offending token.
        value: String,
    },

    /// A numeric list had the wrong number of entries
    #[error("Expected {expected} values for '{field}', got {actual}")]
    WrongArity {
        /// The option or setting being parsed.
        field: String,
        /// Number of values required.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A value is outside the range the cutter accepts
    #[error("Parameter '{field}' out of range: {value} (valid: {min}..={max})")]
    OutOfRange {
        /// The parameter name.
        field: String,
        /// The supplied value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// A device parameter that must be an integer was fractional
    #[error("Parameter '{field}' must be a whole number, got {value}")]
    NotWholeNumber {
        /// The parameter name.
        field: String,
        /// The supplied value.
        value: f64,
    },

    /// Speed and force lists describe a different number of passes
    #[error("Speed list has {speeds} entries but force list has {forces}")]
    MismatchedPasses {
        /// Length of the speed list.
        speeds: usize,
        /// Length of the force list.
        forces: usize,
    },

    /// The job has no cutting passes
    #[error("At least one cutting pass is required")]
    NoPasses,

    /// A stroke was constructed without points
    #[error("Stroke must contain at least one point")]
    EmptyStroke,

    /// A closed path was requested without points
    #[error("Closed path must contain at least one point")]
    EmptyPath,

    /// The calibration matrix collapses the drawing
    #[error("Calibration matrix is singular (determinant {determinant})")]
    SingularMatrix {
        /// Determinant of the rejected matrix.
        determinant: f64,
    },

    /// No strokes were supplied and the border is disabled
    #[error("Nothing to cut: no strokes and the border is disabled")]
    NothingToCut,

    /// Generic invalid value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The parameter name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Protocol state error type
///
/// Raised when a device session operation is issued in a lifecycle state
/// that does not permit it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolStateError {
    /// Operation not permitted in the current state
    #[error("Operation '{operation}' not allowed in state {state}")]
    InvalidOperation {
        /// The rejected operation.
        operation: String,
        /// The session state at the time of the call.
        state: String,
    },

    /// The command stream was requested before the session ended
    #[error("Command stream incomplete: session is {state}")]
    Unfinished {
        /// The session state at the time of the call.
        state: String,
    },
}

/// Conversion error type
///
/// Raised when an upstream collaborator fails to turn the fabrication file
/// into stroke data. These errors abort the job before any encoding begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The converter program could not be started
    #[error("Failed to launch {program}: {reason}")]
    Launch {
        /// The program that failed to start.
        program: String,
        /// The reason reported by the OS.
        reason: String,
    },

    /// The converter exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        /// The program that failed.
        program: String,
        /// The exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The converter reported success but wrote no output
    #[error("{program} produced no output at {}", path.display())]
    MissingOutput {
        /// The program that was run.
        program: String,
        /// The expected output file.
        path: PathBuf,
    },

    /// An intermediate file could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The I/O failure.
        reason: String,
    },

    /// The intermediate drawing description is malformed
    #[error("Drawing parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number in the drawing description.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Main error type for stencilcut
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Protocol state error
    #[error(transparent)]
    ProtocolState(#[from] ProtocolStateError),

    /// Conversion error
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a protocol state error
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Error::ProtocolState(_))
    }

    /// Check if this is a conversion error
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Error::Conversion(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
