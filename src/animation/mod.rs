//! Animation and tweening system for smooth transitions.
//!
//! Provides `Tween<T>` for timed value interpolation with easing, plus the
//! pluggable `Easing` and `Interpolation` strategies it is built from.

mod easing;
mod error;
mod interpolation;
mod tweens;

pub use easing::{EaseType, Easing};
pub use error::TweenError;
pub use interpolation::{Interpolation, Tweenable};
pub use tweens::{ObserverHandle, Tween, TweenBuilder, TweenId};
