//! Frame driver
//!
//! [`FrameDriver::frame`] is called once per display refresh by the host's
//! scheduler (`requestAnimationFrame` in the browser). It returns
//! [`FrameStatus::Stopped`] once the [`AnimationHandle`] has been stopped, and
//! the host must not reschedule after that.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;

use super::field::ShadowField;
use super::surface::Surface;

/// Turns host timestamps into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    nominal_dt: f64,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(nominal_dt: f64, max_dt: f64) -> Self {
        Self {
            last: None,
            nominal_dt,
            max_dt: max_dt.max(nominal_dt),
        }
    }

    /// Seconds since the previous tick, `nominal_dt` on the first one.
    ///
    /// Deltas are clamped to `[0, max_dt]` so a backgrounded tab does not
    /// fast-forward the whole field on its first frame back.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        if !timestamp.is_finite() {
            return 0.0;
        }

        let dt = match self.last {
            Some(last) => (timestamp - last).clamp(0.0, self.max_dt),
            None => self.nominal_dt,
        };
        self.last = Some(self.last.map_or(timestamp, |last| last.max(timestamp)));
        dt
    }

    /// Forget the previous timestamp; the next tick is a first tick again
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Shared start/stop flag for a running animation
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    running: Rc<Cell<bool>>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Request the loop to end; takes effect at the next frame
    pub fn stop(&self) {
        self.running.set(false);
    }
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule the next frame
    Continue,
    /// The handle was stopped; do not reschedule
    Stopped,
}

/// Drives a [`ShadowField`] from display refresh callbacks
#[derive(Debug)]
pub struct FrameDriver<R> {
    field: ShadowField<R>,
    clock: FrameClock,
    handle: AnimationHandle,
    frames: u64,
}

impl<R: Rng> FrameDriver<R> {
    pub fn new(field: ShadowField<R>) -> Self {
        let clock = FrameClock::new(field.config().nominal_dt, field.config().max_dt);
        Self {
            field,
            clock,
            handle: AnimationHandle::new(),
            frames: 0,
        }
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn field(&self) -> &ShadowField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ShadowField<R> {
        &mut self.field
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame: clear, advance, render, spawn, reap.
    ///
    /// `timestamp` is the host's monotonic time in seconds.
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp: f64, surface: &mut S) -> FrameStatus {
        if !self.handle.is_running() {
            return FrameStatus::Stopped;
        }

        let dt = self.clock.tick(timestamp);
        let (width, height) = surface.size();
        self.field.resize(width, height);

        surface.clear();
        self.field.advance(dt);
        self.field.render(surface);
        let spawned = self.field.spawn();
        let reaped = self.field.reap();

        if spawned || reaped > 0 {
            tracing::trace!(
                frame = self.frames,
                live = self.field.len(),
                spawned,
                reaped,
                "shadow field changed"
            );
        }

        self.frames += 1;
        FrameStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::surface::Recorder;
    use crate::config::AnimationConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn driver() -> FrameDriver<StdRng> {
        let config = AnimationConfig {
            spawn_chance: 1.0,
            ..AnimationConfig::default()
        };
        FrameDriver::new(ShadowField::new(config, StdRng::seed_from_u64(42)))
    }

    #[test]
    fn test_clock_first_tick_is_nominal() {
        let mut clock = FrameClock::new(1.0 / 60.0, 0.25);
        assert_eq!(clock.tick(100.0), 1.0 / 60.0);
        assert!((clock.tick(100.02) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_clock_clamps() {
        let mut clock = FrameClock::new(1.0 / 60.0, 0.25);
        clock.tick(10.0);
        assert_eq!(clock.tick(15.0), 0.25);
        assert_eq!(clock.tick(14.0), 0.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert!((clock.tick(15.1) - 0.1).abs() < 1e-9);

        clock.reset();
        assert_eq!(clock.tick(99.0), 1.0 / 60.0);
    }

    #[test]
    fn test_frame_order() {
        let mut driver = driver();
        let mut surface = Recorder::new(800.0, 600.0);

        assert_eq!(driver.frame(0.0, &mut surface), FrameStatus::Continue);
        assert_eq!(driver.field().len(), 1);
        assert_eq!(driver.field().bounds(), (800.0, 600.0));
        // Born after rendering, so nothing was drawn on the first frame
        assert!(surface.ellipses_since_clear().is_empty());

        driver.frame(0.016, &mut surface);
        assert_eq!(surface.ellipses_since_clear().len(), 1);
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_stop_handle() {
        let mut driver = driver();
        let handle = driver.handle();
        let mut surface = Recorder::new(800.0, 600.0);

        driver.frame(0.0, &mut surface);
        handle.stop();
        assert!(!handle.is_running());

        let before = surface.ops().len();
        assert_eq!(driver.frame(0.016, &mut surface), FrameStatus::Stopped);
        assert_eq!(surface.ops().len(), before);
        assert_eq!(driver.frames(), 1);
    }
}
