//! Errors raised when configuring a tween.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TweenError {
    /// Duration was zero, negative, or not a finite number.
    #[error("tween duration must be a positive finite number of seconds, got {0}")]
    InvalidDuration(f32),
}
