//! Slider configuration: panel geometry, dismissal threshold, and spring tuning.
//!
//! A `SliderConfig` is only handed out after validation, so every consumer
//! can rely on a positive, finite width. Three entry points exist:
//! - [`SliderConfig::new`] / [`SliderConfig::for_screen`] from code,
//! - [`SliderConfig::from_env`] from `SLIDER_*` environment variables,
//! - [`SliderConfig::from_json`] from a JSON document.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::animator::SpringParams;
use crate::consts::{ACTIVATION_SLOP_PX, CLOSE_THRESHOLD_FRACTION, SCREEN_WIDTH_FRACTION};

/// Error returned when a configuration would produce a broken panel.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The panel width is zero, negative, or not a finite number.
    #[error("panel width must be a positive finite number, got {0}")]
    InvalidWidth(f64),
    /// The dismissal threshold is not strictly between 0 and 1.
    #[error("close threshold fraction must be in (0, 1), got {0}")]
    InvalidThreshold(f64),
    /// The pan activation slop is negative or not finite.
    #[error("activation slop must be a non-negative finite number, got {0}")]
    InvalidSlop(f64),
    /// A spring parameter is outside its physical range.
    #[error("invalid spring {field}: {value}")]
    InvalidSpring { field: &'static str, value: f64 },
    /// The spring is too stiff or too damped for the fixed integration step.
    #[error("spring (stiffness {stiffness}, damping {damping}, mass {mass}) is unstable at a 1 ms step")]
    UnstableSpring { stiffness: f64, damping: f64, mass: f64 },
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    /// Neither `SLIDER_WIDTH` nor `SLIDER_SCREEN_WIDTH` is set.
    #[error("missing panel width: set SLIDER_WIDTH or SLIDER_SCREEN_WIDTH")]
    MissingWidth,
    /// The JSON document is malformed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validated slider configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Panel width `W` in CSS pixels. The offset lives in `[-W, 0]`.
    pub width: f64,
    /// Fraction of `width` a drag must exceed to dismiss the panel.
    #[serde(default = "default_threshold")]
    pub close_threshold_fraction: f64,
    /// Horizontal travel before a press on the panel becomes a pan.
    #[serde(default = "default_slop")]
    pub activation_slop: f64,
    /// Spring used for every animated transition.
    #[serde(default)]
    pub spring: SpringParams,
}

fn default_threshold() -> f64 {
    CLOSE_THRESHOLD_FRACTION
}

fn default_slop() -> f64 {
    ACTIVATION_SLOP_PX
}

impl SliderConfig {
    /// Config for a panel of the given width with default tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] for a non-positive or non-finite width.
    pub fn new(width: f64) -> Result<Self, ConfigError> {
        Self {
            width,
            close_threshold_fraction: CLOSE_THRESHOLD_FRACTION,
            activation_slop: ACTIVATION_SLOP_PX,
            spring: SpringParams::default(),
        }
        .validated()
    }

    /// Config for a panel covering three quarters of the screen.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWidth`] when the derived width is invalid.
    pub fn for_screen(screen_width: f64) -> Result<Self, ConfigError> {
        Self::new(screen_width * SCREEN_WIDTH_FRACTION)
    }

    /// Build config from environment variables.
    ///
    /// Width (one required):
    /// - `SLIDER_WIDTH`: panel width in pixels
    /// - `SLIDER_SCREEN_WIDTH`: screen width; the panel takes 75% of it
    ///
    /// Optional:
    /// - `SLIDER_CLOSE_THRESHOLD`: default 1/3
    /// - `SLIDER_ACTIVATION_SLOP`: default 10
    /// - `SLIDER_SPRING_DAMPING`: default 25
    /// - `SLIDER_SPRING_STIFFNESS`: default 200
    /// - `SLIDER_SPRING_MASS`: default 1
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is unparsable, the width is missing,
    /// or the resulting config fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let width = match env_parse_f64("SLIDER_WIDTH")? {
            Some(width) => width,
            None => match env_parse_f64("SLIDER_SCREEN_WIDTH")? {
                Some(screen) => screen * SCREEN_WIDTH_FRACTION,
                None => return Err(ConfigError::MissingWidth),
            },
        };

        let defaults = SpringParams::default();
        let spring = SpringParams {
            damping: env_parse_f64("SLIDER_SPRING_DAMPING")?.unwrap_or(defaults.damping),
            stiffness: env_parse_f64("SLIDER_SPRING_STIFFNESS")?.unwrap_or(defaults.stiffness),
            mass: env_parse_f64("SLIDER_SPRING_MASS")?.unwrap_or(defaults.mass),
            ..defaults
        };

        Self {
            width,
            close_threshold_fraction: env_parse_f64("SLIDER_CLOSE_THRESHOLD")?.unwrap_or(CLOSE_THRESHOLD_FRACTION),
            activation_slop: env_parse_f64("SLIDER_ACTIVATION_SLOP")?.unwrap_or(ACTIVATION_SLOP_PX),
            spring,
        }
        .validated()
    }

    /// Parse config from JSON. Only `width` is required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(raw)?.validated()
    }

    /// Drag distance beyond which a release dismisses the panel.
    #[must_use]
    pub fn close_threshold(&self) -> f64 {
        self.width * self.close_threshold_fraction
    }

    /// Check every field, returning the config unchanged when it is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        let t = self.close_threshold_fraction;
        if !t.is_finite() || t <= 0.0 || t >= 1.0 {
            return Err(ConfigError::InvalidThreshold(t));
        }
        if !self.activation_slop.is_finite() || self.activation_slop < 0.0 {
            return Err(ConfigError::InvalidSlop(self.activation_slop));
        }
        self.spring.validate()?;
        Ok(self)
    }
}

fn env_parse_f64(var: &'static str) -> Result<Option<f64>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::InvalidEnv { var, value: raw }),
        },
        Err(_) => Ok(None),
    }
}
