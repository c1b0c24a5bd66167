//! Tween settings with layered loading
//!
//! Settings are loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `tween.ron` file (if exists)
//! 3. Environment variables prefixed with `SUNABA_TWEEN_`
//!
//! Example environment variable: `SUNABA_TWEEN_EASE=QuadOut`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::animation::{EaseType, Tween, TweenError, Tweenable};

const DEFAULT_DURATION: f32 = 0.25;
const ENV_PREFIX: &str = "SUNABA_TWEEN";

/// Duration and easing preset for a tween, as written in RON.
///
/// ```ron
/// (duration: 0.5, ease: QuadOut)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSettings {
    /// Animation duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Easing preset
    #[serde(default)]
    pub ease: EaseType,
}

fn default_duration() -> f32 {
    DEFAULT_DURATION
}

impl Default for TweenSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            ease: EaseType::Linear,
        }
    }
}

impl TweenSettings {
    /// Load settings from `tween.ron` in the working directory, with
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("tween.ron"))
    }

    /// Load settings with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. The RON file at `path` (optional, won't error if missing)
    /// 3. Environment variables prefixed with `SUNABA_TWEEN_` (highest priority)
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layered(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, environment: Environment) -> Result<Self> {
        let builder = Config::builder()
            .set_default("duration", DEFAULT_DURATION as f64)?
            .set_default("ease", "Linear")?
            .add_source(File::from(path).format(FileFormat::Ron).required(false))
            .add_source(environment);

        let config = builder
            .build()
            .context("Failed to build tween configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize tween configuration")
    }

    /// Parse settings from a RON string.
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).context("Failed to parse tween settings")
    }
}

impl<T: Tweenable> Tween<T> {
    /// Create a tween from loaded settings.
    pub fn from_settings(start: T, end: T, settings: &TweenSettings) -> Result<Self, TweenError> {
        Self::with_easing(start, end, settings.duration, settings.ease)
    }
}
