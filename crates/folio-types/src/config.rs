//! Page configuration.
//!
//! Every field has a default so a config file only needs to name what it
//! overrides. Call [`FolioConfig::validate`] (or use
//! [`FolioConfig::from_toml_str`]) before handing a config to a controller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Top-level configuration for one page instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub scroll: ScrollConfig,
    pub swipe: SwipeConfig,
    /// Project archive tabs.
    pub projects: CarouselConfig,
    /// Skill category strips. Manual unless configured otherwise.
    pub skills: CarouselConfig,
    pub contact: ContactConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            swipe: SwipeConfig::default(),
            projects: CarouselConfig::default(),
            skills: CarouselConfig::manual(),
            contact: ContactConfig::default(),
        }
    }
}

/// Active-section and nav-bar thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the viewport height added to `scroll_y` before testing
    /// section anchors.
    pub active_fraction: f32,
    /// `scroll_y` above which the nav bar switches to its solid style.
    pub scrolled_threshold: f32,
    /// `scroll_y` above which the back-to-top button is shown.
    pub back_to_top_threshold: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            active_fraction: 1.0 / 3.0,
            scrolled_threshold: 50.0,
            back_to_top_threshold: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
    pub min_distance: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { min_distance: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub auto_advance: bool,
    pub interval_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            interval_ms: 5000,
        }
    }
}

impl CarouselConfig {
    /// A config with auto-advance switched off.
    pub fn manual() -> Self {
        Self {
            auto_advance: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Delay before a success/error banner returns to idle.
    pub status_reset_ms: u32,
    /// How long the "copied" marker stays visible.
    pub copy_feedback_ms: u32,
    /// Whether the subject field is required.
    pub require_subject: bool,
    pub relay: RelayConfig,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            status_reset_ms: 5000,
            copy_feedback_ms: 2000,
            require_subject: false,
            relay: RelayConfig::default(),
        }
    }
}

/// Identifiers handed to the mail relay with every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl FolioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.scroll.active_fraction;
        if !(fraction.is_finite() && (0.0..=1.0).contains(&fraction)) {
            return Err(FolioError::Config(format!(
                "scroll.active_fraction must be within [0, 1], got {fraction}"
            )));
        }
        if !(self.swipe.min_distance.is_finite() && self.swipe.min_distance > 0.0) {
            return Err(FolioError::Config(format!(
                "swipe.min_distance must be > 0, got {}",
                self.swipe.min_distance
            )));
        }
        for (name, carousel) in [("projects", &self.projects), ("skills", &self.skills)] {
            if carousel.interval_ms == 0 {
                return Err(FolioError::Config(format!(
                    "{name}.interval_ms must be > 0"
                )));
            }
        }
        if self.contact.status_reset_ms == 0 {
            return Err(FolioError::Config(
                "contact.status_reset_ms must be > 0".into(),
            ));
        }
        if self.contact.copy_feedback_ms == 0 {
            return Err(FolioError::Config(
                "contact.copy_feedback_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
