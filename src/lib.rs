//! # Sunaba Tween - timed value interpolation
//!
//! Drives a single value from a start to an end over a fixed duration, shaped
//! by an easing curve, with completion callbacks for the host's frame loop.

pub mod animation;
pub mod config;

pub use animation::{EaseType, Easing, Interpolation, Tween, TweenError, Tweenable};
pub use crate::config::TweenSettings;

/// Common imports for internal use
pub mod prelude {
    pub use crate::animation::{
        EaseType, Easing, Interpolation, ObserverHandle, Tween, TweenBuilder, TweenError,
        Tweenable,
    };
    pub use crate::config::TweenSettings;
    pub use glam::{Vec2, Vec3, Vec4};
}
