//! Easing strategies.
//!
//! An easing maps normalized progress (0.0 to 1.0) to scaled progress. The
//! output is not clamped: curves that overshoot (back, elastic) extrapolate
//! past the end value mid-animation.

use std::fmt;
use std::sync::Arc;

use keyframe::{ease, functions};
use serde::{Deserialize, Serialize};

/// Preset easing curves backed by the keyframe crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EaseType {
    /// Constant speed interpolation
    #[default]
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// Quadratic ease in
    QuadIn,
    /// Quadratic ease out (smoother than linear)
    QuadOut,
    /// Quadratic ease in and out
    QuadInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out (even smoother)
    CubicOut,
    /// Cubic ease in and out
    CubicInOut,
}

impl EaseType {
    /// Every preset, in declaration order.
    pub const ALL: [EaseType; 10] = [
        EaseType::Linear,
        EaseType::EaseIn,
        EaseType::EaseOut,
        EaseType::EaseInOut,
        EaseType::QuadIn,
        EaseType::QuadOut,
        EaseType::QuadInOut,
        EaseType::CubicIn,
        EaseType::CubicOut,
        EaseType::CubicInOut,
    ];

    /// Look up a preset by its snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ease| ease.name() == name)
    }

    /// Apply easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = (t as f64).clamp(0.0, 1.0);
        let result = match self {
            EaseType::Linear => ease(functions::Linear, 0.0, 1.0, t),
            EaseType::EaseIn => ease(functions::EaseIn, 0.0, 1.0, t),
            EaseType::EaseOut => ease(functions::EaseOut, 0.0, 1.0, t),
            EaseType::EaseInOut => ease(functions::EaseInOut, 0.0, 1.0, t),
            EaseType::QuadIn => ease(functions::EaseInQuad, 0.0, 1.0, t),
            EaseType::QuadOut => ease(functions::EaseOutQuad, 0.0, 1.0, t),
            EaseType::QuadInOut => ease(functions::EaseInOutQuad, 0.0, 1.0, t),
            EaseType::CubicIn => ease(functions::EaseInCubic, 0.0, 1.0, t),
            EaseType::CubicOut => ease(functions::EaseOutCubic, 0.0, 1.0, t),
            EaseType::CubicInOut => ease(functions::EaseInOutCubic, 0.0, 1.0, t),
        };
        result as f32
    }

    /// Short snake_case name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            EaseType::Linear => "linear",
            EaseType::EaseIn => "ease_in",
            EaseType::EaseOut => "ease_out",
            EaseType::EaseInOut => "ease_in_out",
            EaseType::QuadIn => "quad_in",
            EaseType::QuadOut => "quad_out",
            EaseType::QuadInOut => "quad_in_out",
            EaseType::CubicIn => "cubic_in",
            EaseType::CubicOut => "cubic_out",
            EaseType::CubicInOut => "cubic_in_out",
        }
    }
}

impl fmt::Display for EaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type EaseFn = dyn Fn(f32) -> f32 + Send + Sync;

/// A named easing function.
///
/// The name only shows up in diagnostics (`Display` on a tween).
#[derive(Clone)]
pub struct Easing {
    name: String,
    func: Arc<EaseFn>,
}

impl Easing {
    /// Wrap an arbitrary easing function under a diagnostic name.
    pub fn new(name: impl Into<String>, func: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Identity easing: scaled progress equals progress.
    pub fn linear() -> Self {
        Self::new("linear", |t| t)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map normalized progress to scaled progress.
    pub fn apply(&self, t: f32) -> f32 {
        (self.func)(t)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::linear()
    }
}

impl From<EaseType> for Easing {
    fn from(ease_type: EaseType) -> Self {
        Self::new(ease_type.name(), move |t| ease_type.apply(t))
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Easing").field(&self.name).finish()
    }
}
