//! Firmware implementations for cutting devices
//!
//! Supported controllers:
//! - Graphtec GP-GL: Silhouette Cameo / Portrait class cutters

pub mod graphtec;

pub use graphtec::{CutterCapabilities, DeviceSession, SessionConfig, SessionState};
