//! Game settings and tuning
//!
//! Supplied by the host as JSON (or read from a file by the native runner).
//! Missing keys fall back to defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::PLATFORM_WIDTH;
use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        };
        f.write_str(name)
    }
}

/// Parses the command-line spelling (`low`, `medium`/`med`, `high`), any case
impl FromStr for QualityPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(ConfigError::Invalid(format!("unknown quality preset '{other}'"))),
        }
    }
}

impl QualityPreset {
    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 256,
            QualityPreset::High => 512,
        }
    }

    /// Particles per burst for this preset
    pub fn burst_size(&self) -> usize {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 8,
            QualityPreset::High => 14,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Playfield ===
    /// Visible width in world units
    pub screen_width: f32,
    /// Visible height in world units
    pub screen_height: f32,
    /// Platforms generated before the first tick
    pub initial_platforms: usize,
    /// World y of the lowest (starting) platform
    pub start_y: f32,

    // === Visual Effects ===
    /// Particle bursts on landings, breaks, dashes and death
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_width: 400.0,
            screen_height: 700.0,
            initial_platforms: 12,
            start_y: 640.0,

            particles: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.screen_width.is_finite() || self.screen_width <= PLATFORM_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "screen_width must be a finite value above {PLATFORM_WIDTH}, got {}",
                self.screen_width
            )));
        }
        if !self.screen_height.is_finite() || self.screen_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "screen_height must be a positive finite value, got {}",
                self.screen_height
            )));
        }
        if !self.start_y.is_finite() {
            return Err(ConfigError::Invalid("start_y must be finite".to_string()));
        }
        if self.initial_platforms < 3 {
            return Err(ConfigError::Invalid(format!(
                "initial_platforms must be at least 3, got {}",
                self.initial_platforms
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
