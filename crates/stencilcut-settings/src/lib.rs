//! stencilcut Settings Crate
//!
//! Handles job configuration, strict option parsing, and settings persistence.

pub mod config;
pub mod error;
pub mod parse;

pub use config::JobConfig;
pub use error::{SettingsError, SettingsResult};
pub use parse::{parse_cut_mode, parse_list, parse_matrix, parse_number, parse_pair};
