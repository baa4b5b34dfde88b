//! A single drifting shadow
//!
//! Motion and fade are pure functions of age, so a shadow's state at any time
//! follows from its spawn attributes alone.

/// Fraction of the base alpha kept at birth and at death. Opacity stays
/// strictly inside `(0, alpha)` over the whole life.
const FADE_FLOOR: f64 = 0.02;

/// Exponent of the fade curve; above 1 the shadow holds its density early and
/// thins out late
const FADE_EXPONENT: f64 = 1.8;

/// Peak deviation of the ellipse axes from the radius
const ECCENTRICITY: f64 = 0.12;

/// An ellipse ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
}

/// One particle of the shadow field
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// Spawn position; motion is expressed as displacement from it
    pub origin_x: f64,
    pub origin_y: f64,
    /// Current position, refreshed by [`Shadow::update`]
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub amplitude_x: f64,
    pub amplitude_y: f64,
    /// Radians per second
    pub speed: f64,
    /// Phase offset in radians
    pub offset: f64,
    /// Base alpha
    pub alpha: f64,
    pub blur: f64,
    /// Seconds
    pub lifetime: f64,
    /// Field time at which the shadow was born, in seconds
    pub born_at: f64,
    /// Signed horizontal drift, px/s
    pub lateral_drift: f64,
    /// Signed vertical drift, px/s
    pub vertical_drift: f64,
}

impl Shadow {
    /// Seconds since birth; never negative
    pub fn age(&self, now: f64) -> f64 {
        (now - self.born_at).max(0.0)
    }

    /// Alive up to and including the instant the lifetime is used up
    pub fn is_alive(&self, now: f64) -> bool {
        self.age(now) <= self.lifetime
    }

    /// Fraction of the lifetime consumed, clamped to `[0, 1]`
    pub fn progress(&self, now: f64) -> f64 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.age(now) / self.lifetime).clamp(0.0, 1.0)
    }

    /// Displacement from the origin after `age` seconds.
    ///
    /// Each axis sums two sinusoids with distinct frequencies; subtracting the
    /// value at age 0 pins a newborn shadow to its origin.
    pub fn displacement(&self, age: f64) -> (f64, f64) {
        let phase = |freq: f64, shift: f64| {
            (self.speed * freq * age + self.offset * shift).sin() - (self.offset * shift).sin()
        };
        let phase_cos = |freq: f64, shift: f64| {
            (self.speed * freq * age + self.offset * shift).cos() - (self.offset * shift).cos()
        };

        let dx = self.amplitude_x * phase(1.0, 1.0)
            + 0.35 * self.amplitude_x * phase(2.7, 0.5)
            + self.lateral_drift * age;
        let dy = self.amplitude_y * phase_cos(0.8, 1.0)
            + 0.25 * self.amplitude_y * phase(1.9, 1.3)
            + self.vertical_drift * age;

        (dx, dy)
    }

    /// Recompute the position for field time `now`
    pub fn update(&mut self, now: f64) {
        let (dx, dy) = self.displacement(self.age(now));
        self.x = self.origin_x + dx;
        self.y = self.origin_y + dy;
    }

    /// Alpha after the age fade: monotonically decreasing from just under the
    /// base alpha towards zero, without reaching zero at death
    pub fn opacity(&self, now: f64) -> f64 {
        let p = self.progress(now);
        let remaining = 1.0 - p.powf(FADE_EXPONENT);
        self.alpha * (FADE_FLOOR + (1.0 - 2.0 * FADE_FLOOR) * remaining)
    }

    /// Shape at field time `now`: axes breathe around the radius and the
    /// ellipse slowly turns
    pub fn ellipse(&self, now: f64) -> Ellipse {
        let age = self.age(now);
        let wobble = (age * 0.4 + self.offset).sin();
        Ellipse {
            x: self.x,
            y: self.y,
            radius_x: self.radius * (1.0 + ECCENTRICITY * wobble),
            radius_y: self.radius * (1.0 - ECCENTRICITY * wobble),
            rotation: 0.25 * (age * 0.15 + self.offset).sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shadow(born_at: f64, lifetime: f64) -> Shadow {
        Shadow {
            origin_x: 400.0,
            origin_y: 300.0,
            x: 400.0,
            y: 300.0,
            radius: 200.0,
            amplitude_x: 80.0,
            amplitude_y: 60.0,
            speed: 0.2,
            offset: 1.1,
            alpha: 0.1,
            blur: 40.0,
            lifetime,
            born_at,
            lateral_drift: 4.0,
            vertical_drift: -1.0,
        }
    }

    #[test]
    fn test_age_and_liveness() {
        let s = shadow(10.0, 20.0);
        assert_eq!(s.age(5.0), 0.0);
        assert_eq!(s.age(15.0), 5.0);
        assert!(s.is_alive(30.0));
        assert!(!s.is_alive(30.1));
    }

    #[test]
    fn test_newborn_sits_at_origin() {
        let mut s = shadow(0.0, 20.0);
        s.x = 0.0;
        s.y = 0.0;
        s.update(0.0);
        assert!((s.x - 400.0).abs() < 1e-9);
        assert!((s.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_motion_is_deterministic() {
        let mut a = shadow(0.0, 20.0);
        let mut b = shadow(0.0, 20.0);
        a.update(7.25);
        b.update(3.0);
        b.update(7.25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_opacity_bounds_and_trend() {
        let s = shadow(0.0, 20.0);
        let mut previous = f64::INFINITY;
        for step in 0..200 {
            let t = step as f64 * 0.1;
            let o = s.opacity(t);
            assert!(o > 0.0 && o < s.alpha, "opacity {} out of bounds at {}", o, t);
            assert!(o <= previous);
            previous = o;
        }
        assert!(s.opacity(19.9) < s.opacity(0.0) * 0.1);
        assert!(s.opacity(20.0) > 0.0);
    }

    #[test]
    fn test_ellipse_is_slightly_eccentric() {
        let s = shadow(0.0, 20.0);
        for t in [0.0, 3.0, 9.5, 17.0] {
            let e = s.ellipse(t);
            assert!(e.radius_x >= s.radius * (1.0 - ECCENTRICITY) - 1e-9);
            assert!(e.radius_x <= s.radius * (1.0 + ECCENTRICITY) + 1e-9);
            assert!((e.radius_x + e.radius_y - 2.0 * s.radius).abs() < 1e-9);
            assert!(e.rotation.abs() <= 0.25);
        }
    }
}
