//! Interpolation strategies and the arithmetic capability behind the default one.

use std::fmt;
use std::sync::Arc;

/// Trait for types that can be interpolated (tweened) with plain arithmetic.
///
/// Implementors only need addition, subtraction, and scaling by a scalar;
/// `lerp` is derived from those. Types that cannot do arithmetic are still
/// tweenable through an explicit [`Interpolation`].
pub trait Tweenable: Clone + 'static {
    fn add(&self, rhs: &Self) -> Self;

    fn sub(&self, rhs: &Self) -> Self;

    fn scale(&self, factor: f32) -> Self;

    /// Linear interpolation between two values.
    /// `t` is normally 0.0 to 1.0 but values outside that range extrapolate.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a.add(&b.sub(a).scale(t))
    }
}

macro_rules! impl_tweenable_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tweenable for $ty {
                fn add(&self, rhs: &Self) -> Self {
                    *self + *rhs
                }

                fn sub(&self, rhs: &Self) -> Self {
                    *self - *rhs
                }

                fn scale(&self, factor: f32) -> Self {
                    *self * factor
                }
            }
        )*
    };
}

impl_tweenable_ops!(f32, glam::Vec2, glam::Vec3, glam::Vec4);

impl Tweenable for f64 {
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn scale(&self, factor: f32) -> Self {
        self * factor as f64
    }
}

impl<const N: usize> Tweenable for [f32; N] {
    fn add(&self, rhs: &Self) -> Self {
        std::array::from_fn(|i| self[i] + rhs[i])
    }

    fn sub(&self, rhs: &Self) -> Self {
        std::array::from_fn(|i| self[i] - rhs[i])
    }

    fn scale(&self, factor: f32) -> Self {
        std::array::from_fn(|i| self[i] * factor)
    }
}

type InterpFn<T> = dyn Fn(&T, &T, f32) -> T + Send + Sync;

/// A named function mapping `(start, end, scaled_progress)` to a value.
pub struct Interpolation<T> {
    name: String,
    func: Arc<InterpFn<T>>,
}

impl<T> Interpolation<T> {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&T, &T, f32) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, start: &T, end: &T, t: f32) -> T {
        (self.func)(start, end, t)
    }
}

impl<T: Tweenable> Interpolation<T> {
    /// `start + (end - start) * t` via [`Tweenable`].
    pub fn lerp() -> Self {
        Self::new("lerp", |a: &T, b: &T, t| T::lerp(a, b, t))
    }
}

impl<T: Tweenable> Default for Interpolation<T> {
    fn default() -> Self {
        Self::lerp()
    }
}

// Manual impl: derive would demand `T: Clone` even though only the Arc is cloned.
impl<T> Clone for Interpolation<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Interpolation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Interpolation").field(&self.name).finish()
    }
}
