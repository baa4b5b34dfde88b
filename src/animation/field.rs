//! The active set of shadows and its lifecycle
//!
//! All randomness is drawn from the injected `R` at spawn time; after that a
//! shadow evolves deterministically from its age.

use std::f64::consts::TAU;

use rand::Rng;

use super::shadow::Shadow;
use super::surface::Surface;
use crate::config::{AnimationConfig, SpawnRange};

/// Bounded, continuously evolving set of shadows
#[derive(Debug, Clone)]
pub struct ShadowField<R> {
    config: AnimationConfig,
    rng: R,
    shadows: Vec<Shadow>,
    /// Field clock in seconds, advanced only through [`ShadowField::advance`]
    now: f64,
    width: f64,
    height: f64,
}

fn sample<R: Rng>(rng: &mut R, [min, max]: SpawnRange) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

impl<R: Rng> ShadowField<R> {
    pub fn new(config: AnimationConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            shadows: Vec::new(),
            now: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Field clock in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn shadows(&self) -> &[Shadow] {
        &self.shadows
    }

    pub fn len(&self) -> usize {
        self.shadows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
    }

    /// Area new shadows are spawned into
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Move the clock forward by `dt` seconds and reposition every shadow.
    ///
    /// Negative or non-finite deltas count as zero, so ages never decrease.
    pub fn advance(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.now += dt;

        let now = self.now;
        for shadow in &mut self.shadows {
            shadow.update(now);
        }
    }

    /// Draw every live shadow, restoring the surface state after each one.
    /// Returns the number of shadows drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut drawn = 0;
        for shadow in self.shadows.iter().filter(|s| s.is_alive(self.now)) {
            surface.save();
            surface.set_global_alpha(shadow.opacity(self.now));
            surface.set_blur(shadow.blur);
            surface.fill_ellipse(&shadow.ellipse(self.now), &self.config.color);
            surface.restore();
            drawn += 1;
        }
        drawn
    }

    /// Give birth to at most one shadow, if below capacity and the per-frame
    /// gate passes
    pub fn spawn(&mut self) -> bool {
        if self.shadows.len() >= self.config.capacity {
            return false;
        }
        if !self.rng.gen_bool(self.config.spawn_chance.clamp(0.0, 1.0)) {
            return false;
        }

        let shadow = self.sample_shadow();
        self.shadows.push(shadow);
        true
    }

    /// Draw a fresh shadow born now, without adding it to the set
    pub fn sample_shadow(&mut self) -> Shadow {
        let config = &self.config;
        let rng = &mut self.rng;

        let origin_x = sample(rng, [0.0, self.width]);
        let origin_y = sample(rng, [0.0, self.height]);
        let amplitude_x = sample(rng, config.amplitude);
        let amplitude_y = sample(rng, config.amplitude);

        // Wide swingers drift right, narrow ones drift left
        let midpoint = (config.amplitude[0] + config.amplitude[1]) / 2.0;
        let direction = if amplitude_x >= midpoint { 1.0 } else { -1.0 };

        Shadow {
            origin_x,
            origin_y,
            x: origin_x,
            y: origin_y,
            radius: sample(rng, config.radius),
            amplitude_x,
            amplitude_y,
            speed: sample(rng, config.speed),
            offset: rng.gen_range(0.0..TAU),
            alpha: sample(rng, config.alpha),
            blur: sample(rng, config.blur),
            lifetime: sample(rng, config.lifetime),
            born_at: self.now,
            lateral_drift: direction * sample(rng, config.lateral_drift),
            vertical_drift: sample(rng, config.vertical_drift),
        }
    }

    /// Add a prepared shadow, unless the set is full
    pub fn push(&mut self, shadow: Shadow) -> bool {
        if self.shadows.len() >= self.config.capacity {
            return false;
        }
        self.shadows.push(shadow);
        true
    }

    /// Drop every shadow whose age exceeds its lifetime. Returns how many were
    /// removed.
    pub fn reap(&mut self) -> usize {
        let now = self.now;
        let before = self.shadows.len();
        self.shadows.retain(|s| s.is_alive(now));
        before - self.shadows.len()
    }
}
