//! Graphtec cutter capabilities
//!
//! Resolution and parameter limits for Silhouette class cutters.

use super::command_creator::DevicePoint;
use stencilcut_core::{PassConfig, Point, ValidationError};

/// Device steps per inch (20 steps per millimetre)
pub const STEPS_PER_INCH: f64 = 508.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CutterCapabilities {
    pub name: String,
    pub steps_per_inch: f64,
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_force: u32,
    pub max_force: u32,
}

impl CutterCapabilities {
    /// Silhouette Cameo / Portrait
    pub fn silhouette() -> Self {
        Self {
            name: "Silhouette".to_string(),
            steps_per_inch: STEPS_PER_INCH,
            min_speed: 1,
            max_speed: 10,
            min_force: 1,
            max_force: 33,
        }
    }

    /// Check a pass against the cutter's speed and force limits
    pub fn validate_pass(&self, pass: &PassConfig) -> Result<(), ValidationError> {
        self.validate_speed(pass.speed)?;
        self.validate_force(pass.force)
    }

    pub fn validate_speed(&self, speed: u32) -> Result<(), ValidationError> {
        check_range("speed", speed, self.min_speed, self.max_speed)
    }

    pub fn validate_force(&self, force: u32) -> Result<(), ValidationError> {
        check_range("force", force, self.min_force, self.max_force)
    }

    /// Convert a point in inches to device steps
    pub fn to_steps(&self, p: Point) -> DevicePoint {
        DevicePoint::new(p.x * self.steps_per_inch, p.y * self.steps_per_inch)
    }
}

impl Default for CutterCapabilities {
    fn default() -> Self {
        Self::silhouette()
    }
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: value as f64,
            min: min as f64,
            max: max as f64,
        })
    }
}
