//! Graphtec Firmware Support
//!
//! Open-loop GP-GL output for Graphtec-based vinyl and stencil cutters
//! (Silhouette Cameo, Portrait). The device never answers, so a job is a
//! single command stream built by [`DeviceSession`] and written in one go.

pub mod capabilities;
pub mod command_creator;
pub mod session;

pub use capabilities::{CutterCapabilities, STEPS_PER_INCH};
pub use command_creator::{Block, BlockKind, Command, DevicePoint};
pub use session::{DeviceSession, SessionConfig, SessionState, DEFAULT_MEDIA_SIZE};
