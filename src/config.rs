//! Calibration constants for the attention engine.
//!
//! The defaults are tuned for a 640x480 capture at typical webcam distance.
//! Every field can be overridden from a JSON file; missing fields keep their
//! default value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pose::SignalTier;

/// Breakpoints that bucket a non-negative measurement into a [`SignalTier`].
///
/// `value < full_below` is [`SignalTier::Full`], `value < strong_below` is
/// [`SignalTier::Strong`], `value < fair_below` is [`SignalTier::Fair`], and
/// anything larger is [`SignalTier::Weak`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub full_below: f32,
    pub strong_below: f32,
    pub fair_below: f32,
}

impl TierThresholds {
    pub const fn new(full_below: f32, strong_below: f32, fair_below: f32) -> Self {
        Self {
            full_below,
            strong_below,
            fair_below,
        }
    }

    /// Horizontal nose-to-eye-center offset, in pixels.
    pub const fn yaw_default() -> Self {
        Self::new(4.0, 8.0, 13.0)
    }

    /// Inter-ocular tilt, in degrees.
    pub const fn roll_default() -> Self {
        Self::new(10.0, 20.0, 30.0)
    }

    pub fn tier(&self, value: f32) -> SignalTier {
        if value < self.full_below {
            SignalTier::Full
        } else if value < self.strong_below {
            SignalTier::Strong
        } else if value < self.fair_below {
            SignalTier::Fair
        } else {
            SignalTier::Weak
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        let values = [self.full_below, self.strong_below, self.fair_below];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{} thresholds must be finite", name)));
        }
        if self.full_below < 0.0 {
            return Err(Error::InvalidConfig(format!("{} thresholds must be non-negative", name)));
        }
        if !(self.full_below < self.strong_below && self.strong_below < self.fair_below) {
            return Err(Error::InvalidConfig(format!(
                "{} thresholds must be strictly ascending, got {} / {} / {}",
                name, self.full_below, self.strong_below, self.fair_below
            )));
        }
        Ok(())
    }
}

/// Score boundaries between attention categories.
///
/// `0 < score <= low_max` is Low, `low_max < score < good_min` is Normal and
/// `score >= good_min` is Good. A score of exactly zero is always NotDetected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBounds {
    pub low_max: f32,
    pub good_min: f32,
}

impl Default for CategoryBounds {
    fn default() -> Self {
        Self {
            low_max: 1.0,
            good_min: 1.6,
        }
    }
}

/// Normalized offsets separating Left / Front / Right facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacingThresholds {
    pub left: f32,
    pub right: f32,
}

impl Default for FacingThresholds {
    fn default() -> Self {
        Self {
            left: -0.06,
            right: 0.07,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    pub yaw: TierThresholds,
    pub roll: TierThresholds,
    pub categories: CategoryBounds,
    /// Capture width the facing offset is normalized by.
    pub frame_width: f32,
    pub facing: FacingThresholds,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            yaw: TierThresholds::yaw_default(),
            roll: TierThresholds::roll_default(),
            categories: CategoryBounds::default(),
            frame_width: 640.0,
            facing: FacingThresholds::default(),
        }
    }
}

impl AttentionConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), "loaded attention config");
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.yaw.validate("yaw")?;
        self.roll.validate("roll")?;

        let CategoryBounds { low_max, good_min } = self.categories;
        if !low_max.is_finite() || !good_min.is_finite() {
            return Err(Error::InvalidConfig("category bounds must be finite".into()));
        }
        if !(0.0 < low_max && low_max < good_min) {
            return Err(Error::InvalidConfig(format!(
                "category bounds must satisfy 0 < low_max < good_min, got {} / {}",
                low_max, good_min
            )));
        }

        if !(self.frame_width.is_finite() && self.frame_width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "frame_width must be positive, got {}",
                self.frame_width
            )));
        }

        let FacingThresholds { left, right } = self.facing;
        if !(left.is_finite() && right.is_finite() && left < right) {
            return Err(Error::InvalidConfig(format!(
                "facing thresholds must satisfy left < right, got {} / {}",
                left, right
            )));
        }

        Ok(())
    }
}
