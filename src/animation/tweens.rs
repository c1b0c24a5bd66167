//! The time-stepped tween engine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::easing::Easing;
use super::error::TweenError;
use super::interpolation::{Interpolation, Tweenable};

static NEXT_TWEEN_ID: AtomicU64 = AtomicU64::new(1);

/// Relative slack when comparing accumulated time against the duration, so
/// frame deltas that sum to the duration complete despite f32 rounding.
const COMPLETION_EPSILON: f64 = 1e-6;

/// Process-unique identity of a tween instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

impl TweenId {
    fn next() -> Self {
        Self(NEXT_TWEEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Handle returned by [`Tween::on_complete`], used to unregister the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

type CompletionObserver<T> = Box<dyn FnMut(&Tween<T>)>;

/// A single timed interpolation from `start` to `end`.
///
/// The host drives it by calling [`Tween::update`] with the frame delta.
/// Once the elapsed time reaches the duration the value snaps to `end`
/// exactly, the tween stops, and completion observers fire once.
pub struct Tween<T> {
    id: TweenId,
    /// Value at progress 0
    start: T,
    /// Value at progress 1
    end: T,
    /// Last computed value
    value: T,
    /// Elapsed time in seconds, always within `0..=duration`.
    /// Accumulated in f64 so summed f32 frame deltas don't drift short.
    elapsed: f64,
    /// Total duration in seconds, always positive
    duration: f32,
    running: bool,
    easing: Easing,
    interpolation: Interpolation<T>,
    observers: Vec<(ObserverHandle, CompletionObserver<T>)>,
    next_observer: u64,
}

impl<T: Tweenable> Tween<T> {
    /// Create a linear tween using the arithmetic interpolation of `T`.
    pub fn new(start: T, end: T, duration: f32) -> Result<Self, TweenError> {
        Self::with_interpolation(start, end, duration, Easing::linear(), Interpolation::lerp())
    }

    /// Create a tween with a custom easing and the arithmetic interpolation of `T`.
    pub fn with_easing(
        start: T,
        end: T,
        duration: f32,
        easing: impl Into<Easing>,
    ) -> Result<Self, TweenError> {
        Self::with_interpolation(start, end, duration, easing, Interpolation::lerp())
    }
}

impl<T: Clone> Tween<T> {
    /// Create a tween with explicit strategies.
    ///
    /// `T` needs no arithmetic here; `interpolation` does all the work.
    pub fn with_interpolation(
        start: T,
        end: T,
        duration: f32,
        easing: impl Into<Easing>,
        interpolation: Interpolation<T>,
    ) -> Result<Self, TweenError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TweenError::InvalidDuration(duration));
        }

        Ok(Self {
            id: TweenId::next(),
            value: start.clone(),
            start,
            end,
            elapsed: 0.0,
            duration,
            running: true,
            easing: easing.into(),
            interpolation,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// Start configuring a tween with optional strategies.
    pub fn builder(start: T, end: T, duration: f32) -> TweenBuilder<T> {
        TweenBuilder {
            start,
            end,
            duration,
            easing: Easing::default(),
            interpolation: None,
        }
    }

    /// Advance the tween by `dt` seconds.
    ///
    /// Returns `true` if the tween is still running afterwards. Does nothing
    /// while stopped. Negative or non-finite deltas are ignored.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }

        if !dt.is_finite() || dt < 0.0 {
            log::warn!("{}: ignoring invalid time step {}", self.id, dt);
            return true;
        }

        self.elapsed += dt as f64;

        let duration = self.duration as f64;
        if self.elapsed >= duration * (1.0 - COMPLETION_EPSILON) {
            // Snap to the target: no easing residue on the final frame
            self.elapsed = duration;
            self.value = self.end.clone();
            self.running = false;
            log::debug!("{} completed after {:.3}s", self.id, self.duration);
            self.notify_complete();
            return false;
        }

        let progress = self.progress();
        let scaled = self.easing.apply(progress);
        self.value = self.interpolation.apply(&self.start, &self.end, scaled);
        true
    }

    /// Resume time stepping. Elapsed time is left alone, so a finished tween
    /// completes again on its next update unless it was reset.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pause time stepping without notifying completion observers.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Rewind to the beginning: `elapsed = 0`, `value = start`.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.value = self.start.clone();
        log::debug!("{} reset", self.id);
    }

    /// Retarget from the current value toward `to`, restarting the clock.
    ///
    /// The displayed value does not jump.
    pub fn reset_to(&mut self, to: T) {
        self.elapsed = 0.0;
        self.start = self.value.clone();
        self.end = to;
        log::debug!("{} retargeted", self.id);
    }

    /// Swap start and end and restart the clock. The current value is kept
    /// until the next update.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.elapsed = 0.0;
        log::debug!("{} reversed", self.id);
    }

    /// Register a completion observer. Observers run synchronously, in
    /// registration order, each time the tween reaches its end via `update`.
    pub fn on_complete(&mut self, observer: impl FnMut(&Tween<T>) + 'static) -> ObserverHandle {
        let handle = ObserverHandle(self.next_observer);
        self.next_observer += 1;
        let observer: CompletionObserver<T> = Box::new(observer);
        self.observers.push((handle, observer));
        handle
    }

    /// Unregister an observer. Returns `false` if the handle was unknown.
    pub fn remove_observer(&mut self, handle: ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    fn notify_complete(&mut self) {
        // Taken out so observers can borrow the tween
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            observer(&*self);
        }
        self.observers = observers;
    }
}

impl<T> Tween<T> {
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Get the current interpolated value.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn start_value(&self) -> &T {
        &self.start
    }

    pub fn end_value(&self) -> &T {
        &self.end
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `true` once the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration as f64
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress, `elapsed / duration`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration as f64) as f32
    }

    /// Get remaining time in seconds.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed()).max(0.0)
    }

    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    pub fn interpolation(&self) -> &Interpolation<T> {
        &self.interpolation
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: fmt::Debug> fmt::Display for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}] {:?} -> {:?} over {:.3}s (elapsed {:.3}s, {})",
            self.id,
            self.easing.name(),
            self.interpolation.name(),
            self.start,
            self.end,
            self.duration,
            self.elapsed,
            if self.running { "running" } else { "stopped" },
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("id", &self.id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("value", &self.value)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("running", &self.running)
            .field("easing", &self.easing)
            .field("interpolation", &self.interpolation)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Builder for [`Tween`] with optional easing and interpolation.
#[derive(Debug)]
pub struct TweenBuilder<T> {
    start: T,
    end: T,
    duration: f32,
    easing: Easing,
    interpolation: Option<Interpolation<T>>,
}

impl<T> TweenBuilder<T> {
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation<T>) -> Self {
        self.interpolation = Some(interpolation);
        self
    }
}

impl<T: Tweenable> TweenBuilder<T> {
    /// Build the tween, falling back to the arithmetic interpolation of `T`.
    pub fn build(self) -> Result<Tween<T>, TweenError> {
        let interpolation = self.interpolation.unwrap_or_default();
        Tween::with_interpolation(self.start, self.end, self.duration, self.easing, interpolation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::EaseType;

    fn counter(tween: &mut Tween<f32>) -> Rc<Cell<u32>> {
        let fired = Rc::new(Cell::new(0));
        let fired_clone = Rc::clone(&fired);
        tween.on_complete(move |_| fired_clone.set(fired_clone.get() + 1));
        fired
    }

    #[test]
    fn test_new_starts_running_at_start() {
        let tween = Tween::new(3.0f32, 7.0, 1.0).unwrap();
        assert_eq!(*tween.value(), 3.0);
        assert!(tween.is_running());
        assert_eq!(tween.elapsed(), 0.0);
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_rejects_invalid_duration() {
        for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = Tween::new(0.0f32, 1.0, duration);
            assert!(matches!(result, Err(TweenError::InvalidDuration(_))));
        }
    }

    #[test]
    fn test_two_step_scenario() {
        let mut tween = Tween::new(0.0f32, 10.0, 2.0).unwrap();
        let fired = counter(&mut tween);

        assert!(tween.update(1.0));
        assert_eq!(*tween.value(), 5.0);
        assert!(tween.is_running());
        assert_eq!(fired.get(), 0);

        assert!(!tween.update(1.0));
        assert_eq!(*tween.value(), 10.0);
        assert!(!tween.is_running());
        assert_eq!(fired.get(), 1);

        // Stopped: further updates are ignored
        assert!(!tween.update(1.0));
        assert_eq!(*tween.value(), 10.0);
        assert_eq!(tween.elapsed(), 2.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_overshoot_clamps_elapsed() {
        let mut tween = Tween::new(0.0f32, 10.0, 2.0).unwrap();
        tween.update(3.0);
        assert_eq!(tween.elapsed(), 2.0);
        assert_eq!(*tween.value(), 10.0);
        assert!(!tween.is_running());
        assert!(tween.is_finished());
        assert_eq!(tween.remaining(), 0.0);
    }

    #[test]
    fn test_final_value_exact_with_overshooting_easing() {
        // Ends slightly off target; the final frame must still land on `end`
        let sloppy = Easing::new("sloppy", |t| t * 1.1);
        let mut tween = Tween::with_easing(0.0f32, 10.0, 1.0, sloppy).unwrap();
        tween.update(0.95);
        assert!(*tween.value() > 10.0);
        tween.update(0.5);
        assert_eq!(*tween.value(), 10.0);
    }

    #[test]
    fn test_partial_updates_never_complete() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        let fired = counter(&mut tween);
        for _ in 0..9 {
            tween.update(0.1);
        }
        assert!(tween.is_running());
        assert_eq!(fired.get(), 0);
        assert!(tween.elapsed() < tween.duration());
    }

    #[test]
    fn test_frame_deltas_summing_to_duration_complete_on_last_frame() {
        for (duration, frames) in [(1.0f32, 60u32), (2.0, 120), (0.5, 30), (0.3, 7), (1.0, 144)] {
            let mut tween = Tween::new(0.0f32, 10.0, duration).unwrap();
            let fired = counter(&mut tween);
            let dt = duration / frames as f32;

            for frame in 1..frames {
                assert!(tween.update(dt), "{duration}s/{frames}: stopped early at frame {frame}");
            }
            assert_eq!(fired.get(), 0);

            assert!(!tween.update(dt), "{duration}s/{frames}: still running after last frame");
            assert_eq!(*tween.value(), 10.0);
            assert_eq!(tween.elapsed(), duration);
            assert!(!tween.is_running());
            assert_eq!(fired.get(), 1);
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        let b = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        assert_ne!(a.id(), b.id());
        assert!(b.id().raw() > a.id().raw());
        assert_eq!(a.id().to_string(), format!("tween#{}", a.id().raw()));
    }

    #[test]
    fn test_stop_does_not_notify_and_is_idempotent() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        let fired = counter(&mut tween);
        tween.update(0.5);

        tween.stop();
        tween.stop();
        assert!(!tween.is_running());
        assert_eq!(fired.get(), 0);

        let value = *tween.value();
        tween.update(0.5);
        assert_eq!(*tween.value(), value);
        assert_eq!(tween.elapsed(), 0.5);
    }

    #[test]
    fn test_start_resumes_and_recompletes_finished() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        let fired = counter(&mut tween);
        tween.update(1.0);
        assert_eq!(fired.get(), 1);

        tween.start();
        tween.start();
        assert!(tween.is_running());

        // Elapsed was not reset, so any step completes again
        tween.update(0.0);
        assert!(!tween.is_running());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_reset_restores_start_and_keeps_running_flag() {
        let mut tween = Tween::new(0.0f32, 10.0, 1.0).unwrap();
        tween.update(0.5);
        tween.stop();

        tween.reset();
        assert_eq!(*tween.value(), 0.0);
        assert_eq!(tween.elapsed(), 0.0);
        assert!(!tween.is_running());
    }

    #[test]
    fn test_reset_to_continues_from_current_value() {
        let mut tween = Tween::new(0.0f32, 10.0, 2.0).unwrap();
        tween.update(1.0);

        tween.reset_to(20.0);
        assert_eq!(*tween.value(), 5.0);
        assert_eq!(*tween.start_value(), 5.0);
        assert_eq!(*tween.end_value(), 20.0);
        assert_eq!(tween.elapsed(), 0.0);
        assert!(tween.is_running());

        tween.update(1.0);
        assert!((*tween.value() - 12.5).abs() < 1e-5);
    }

    #[test]
    fn test_reverse_round_trip() {
        let mut tween = Tween::new(2.0f32, 8.0, 1.0).unwrap();
        tween.update(1.0);
        assert_eq!(*tween.value(), 8.0);

        tween.reverse();
        // Value is untouched until the next update
        assert_eq!(*tween.value(), 8.0);
        assert_eq!(tween.elapsed(), 0.0);
        assert!(!tween.is_running());

        tween.start();
        tween.update(0.25);
        assert!((*tween.value() - 6.5).abs() < 1e-5);
        tween.update(0.75);
        assert_eq!(*tween.value(), 2.0);
    }

    #[test]
    fn test_observers_fire_in_registration_order() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut tween = Tween::new(0.0f32, 1.0, 0.5).unwrap();

        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            tween.on_complete(move |t| {
                assert!(!t.is_running());
                assert_eq!(*t.value(), 1.0);
                order.borrow_mut().push(label);
            });
        }
        tween.update(0.5);

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
        assert_eq!(tween.observer_count(), 3);
    }

    #[test]
    fn test_remove_observer() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = Rc::clone(&fired);
        let handle = tween.on_complete(move |_| fired_clone.set(fired_clone.get() + 1));

        assert!(tween.remove_observer(handle));
        assert!(!tween.remove_observer(handle));
        tween.update(1.0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_invalid_delta_is_ignored() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0).unwrap();
        tween.update(0.25);
        assert!(tween.update(-1.0));
        assert!(tween.update(f32::NAN));
        assert_eq!(tween.elapsed(), 0.25);
        assert!((*tween.value() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_builder_defaults_and_overrides() {
        let mut linear = Tween::builder(0.0f32, 100.0, 1.0).build().unwrap();
        let mut eased = Tween::builder(0.0f32, 100.0, 1.0)
            .easing(EaseType::EaseOut)
            .build()
            .unwrap();
        assert_eq!(linear.easing().name(), "linear");
        assert_eq!(linear.interpolation().name(), "lerp");
        assert_eq!(eased.easing().name(), "ease_out");

        // At t=0.25, ease_out should be further along
        linear.update(0.25);
        eased.update(0.25);
        assert!(eased.value() > linear.value());
    }

    #[test]
    fn test_custom_interpolation_non_arithmetic() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Door {
            Closed,
            Open,
        }

        let snap = Interpolation::new("snap", |a: &Door, b: &Door, t| if t < 0.5 { *a } else { *b });
        let mut tween =
            Tween::with_interpolation(Door::Closed, Door::Open, 1.0, Easing::linear(), snap).unwrap();
        tween.update(0.4);
        assert_eq!(*tween.value(), Door::Closed);
        tween.update(0.2);
        assert_eq!(*tween.value(), Door::Open);
        assert!(tween.to_string().contains("snap"));
    }

    #[test]
    fn test_vec2_midpoint() {
        let mut tween = Tween::new(glam::Vec2::ZERO, glam::Vec2::new(100.0, 200.0), 1.0).unwrap();
        tween.update(0.5);
        let v = *tween.value();
        assert!((v.x - 50.0).abs() < 1e-3);
        assert!((v.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_display_summary() {
        let mut tween = Tween::with_easing(0.0f32, 10.0, 2.0, EaseType::QuadOut).unwrap();
        tween.update(0.5);
        let text = tween.to_string();
        assert!(text.contains("quad_out"));
        assert!(text.contains("lerp"));
        assert!(text.contains("0.0 -> 10.0"));
        assert!(text.contains("2.000s"));
        assert!(text.contains("elapsed 0.500s"));
        assert!(text.contains("running"));
    }
}
