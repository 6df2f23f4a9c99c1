//! # stencilcut Communication
//!
//! Device command encoding for stencilcut.
//! Turns planned cuts into the GP-GL byte stream understood by Graphtec
//! cutters, guarding the order of operations with a session state machine.

pub mod firmware;

pub use firmware::graphtec::{
    Block, BlockKind, Command, CutterCapabilities, DevicePoint, DeviceSession, SessionConfig,
    SessionState, DEFAULT_MEDIA_SIZE, STEPS_PER_INCH,
};
