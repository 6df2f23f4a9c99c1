//! Job configuration for stencilcut
//!
//! Everything the cutting pipeline needs from its caller: calibration,
//! border, media, rotation, cut mode, and the per-pass speed/force lists.
//! Supports JSON and TOML files; the default file lives in the platform
//! configuration directory and is only read when present.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stencilcut_camtools::{Border, CutMode};
use stencilcut_communication::CutterCapabilities;
use stencilcut_core::{PassConfig, Point, ValidationError};
use tracing::debug;

/// Directory name under the platform config directory
pub const APP_DIR: &str = "stencilcut";
/// Default configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Settings for one cutting job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Device-coordinate translation in inches
    pub offset: Point,
    /// Border margins in inches; (0, 0) disables the border
    pub border: Border,
    /// Calibration matrix a, b, c, d
    pub matrix: [f64; 4],
    /// Speed for each pass
    pub speeds: Vec<f64>,
    /// Force for each pass
    pub forces: Vec<f64>,
    pub cut_mode: CutMode,
    /// Media size in inches
    pub media_size: Point,
    /// Counterclockwise rotation in degrees
    pub rotation: f64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            offset: Point::new(4.0, 0.5),
            border: Border::new(1.0, 1.0),
            matrix: [1.0, 0.0, 0.0, 1.0],
            speeds: vec![2.0, 2.0],
            forces: vec![8.0, 30.0],
            cut_mode: CutMode::Accuracy,
            media_size: Point::new(12.0, 11.0),
            rotation: 0.0,
        }
    }
}

impl JobConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/stencilcut/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load the default config file if it exists, otherwise the defaults
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            Ok(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                debug!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded job config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::of(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite("offset", &[self.offset.x, self.offset.y])?;
        require_finite("border", &[self.border.x, self.border.y])?;
        require_finite("matrix", &self.matrix)?;
        require_finite("media_size", &[self.media_size.x, self.media_size.y])?;
        require_finite("rotation", &[self.rotation])?;

        if self.border.x < 0.0 || self.border.y < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "border".to_string(),
                reason: "margins must not be negative".to_string(),
            });
        }

        if self.media_size.x <= 0.0 || self.media_size.y <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "media_size".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        let [a, b, c, d] = self.matrix;
        let determinant = a * d - b * c;
        if determinant == 0.0 {
            return Err(ValidationError::SingularMatrix { determinant });
        }

        self.passes().map(|_| ())
    }

    /// The ordered passes, one per speed/force pair
    pub fn passes(&self) -> Result<Vec<PassConfig>, ValidationError> {
        if self.speeds.len() != self.forces.len() {
            return Err(ValidationError::MismatchedPasses {
                speeds: self.speeds.len(),
                forces: self.forces.len(),
            });
        }
        if self.speeds.is_empty() {
            return Err(ValidationError::NoPasses);
        }

        let caps = CutterCapabilities::default();
        self.speeds
            .iter()
            .zip(&self.forces)
            .map(|(&speed, &force)| {
                Ok(PassConfig::new(
                    device_value("speed", speed, caps.min_speed, caps.max_speed)?,
                    device_value("force", force, caps.min_force, caps.max_force)?,
                ))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn of(path: &Path) -> SettingsResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(ext)),
        }
    }
}

fn require_finite(field: &str, values: &[f64]) -> Result<(), ValidationError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: v.to_string(),
        }),
        None => Ok(()),
    }
}

/// A whole number within the cutter's range
fn device_value(field: &str, value: f64, min: u32, max: u32) -> Result<u32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber {
            field: field.to_string(),
            value,
        });
    }
    if value < min as f64 || value > max as f64 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JobConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.passes().unwrap(),
            vec![PassConfig::new(2, 8), PassConfig::new(2, 30)]
        );
        assert_eq!(config.cut_mode, CutMode::Accuracy);
    }

    #[test]
    fn test_mismatched_pass_lists() {
        let config = JobConfig {
            speeds: vec![2.0],
            ..JobConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MismatchedPasses { speeds: 1, forces: 2 })
        );
    }

    #[test]
    fn test_empty_pass_lists() {
        let config = JobConfig {
            speeds: vec![],
            forces: vec![],
            ..JobConfig::default()
        };
        assert_eq!(config.passes(), Err(ValidationError::NoPasses));
    }

    #[test]
    fn test_device_values() {
        assert_eq!(device_value("speed", 10.0, 1, 10), Ok(10));
        assert!(matches!(
            device_value("speed", 2.5, 1, 10),
            Err(ValidationError::NotWholeNumber { .. })
        ));
        assert!(matches!(
            device_value("force", 34.0, 1, 33),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            device_value("force", -1.0, 1, 33),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_singular_matrix() {
        let config = JobConfig {
            matrix: [1.0, 1.0, 1.0, 1.0],
            ..JobConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_negative_border() {
        let config = JobConfig {
            border: Border::new(-1.0, 0.0),
            ..JobConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_case_ignored() {
        assert_eq!(ConfigFormat::of(Path::new("JOB.TOML")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::of(Path::new("job.Json")).unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigFormat::of(Path::new("job.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ext) if ext == "yaml"));
    }
}
