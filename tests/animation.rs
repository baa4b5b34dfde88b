//! Shadow field behaviour over many frames

use rand::rngs::StdRng;
use rand::SeedableRng;

use hbnb::animation::{FrameDriver, FrameStatus, Recorder, Shadow, ShadowField};
use hbnb::config::AnimationConfig;

fn config(spawn_chance: f64) -> AnimationConfig {
    AnimationConfig {
        spawn_chance,
        ..AnimationConfig::default()
    }
}

fn field(spawn_chance: f64, seed: u64) -> ShadowField<StdRng> {
    let mut field = ShadowField::new(config(spawn_chance), StdRng::seed_from_u64(seed));
    field.resize(1280.0, 720.0);
    field
}

fn fixed_shadow(born_at: f64, lifetime: f64) -> Shadow {
    Shadow {
        origin_x: 640.0,
        origin_y: 360.0,
        x: 640.0,
        y: 360.0,
        radius: 200.0,
        amplitude_x: 100.0,
        amplitude_y: 60.0,
        speed: 0.2,
        offset: 0.7,
        alpha: 0.1,
        blur: 50.0,
        lifetime,
        born_at,
        lateral_drift: 4.0,
        vertical_drift: -1.0,
    }
}

#[test]
fn test_capacity_never_exceeded() {
    let field = ShadowField::new(config(1.0), StdRng::seed_from_u64(3));
    let mut driver = FrameDriver::new(field);
    let mut surface = Recorder::new(1280.0, 720.0);
    let mut peak = 0;

    for frame in 0..6_000 {
        let status = driver.frame(frame as f64 / 60.0, &mut surface);
        assert_eq!(status, FrameStatus::Continue);
        assert!(driver.field().len() <= 7);
        peak = peak.max(driver.field().len());
        assert!(surface.ellipses_since_clear().len() <= 7);
        surface.take_ops();
    }

    // With the gate always open the field saturates
    assert_eq!(peak, 7);
}

#[test]
fn test_spawn_attributes_in_configured_ranges() {
    let mut field = field(1.0, 11);
    for _ in 0..500 {
        let shadow = field.sample_shadow();
        assert!((120.0..=350.0).contains(&shadow.radius), "radius {}", shadow.radius);
        assert!((18.0..=32.0).contains(&shadow.lifetime), "lifetime {}", shadow.lifetime);
        assert!((40.0..=140.0).contains(&shadow.amplitude_x));
        assert!((0.08..=0.3).contains(&shadow.speed));
        assert!((0.05..=0.14).contains(&shadow.alpha));
        assert!((30.0..=70.0).contains(&shadow.blur));
        assert!((2.0..=8.0).contains(&shadow.lateral_drift.abs()));
        assert!((-3.0..=3.0).contains(&shadow.vertical_drift));
    }
}

#[test]
fn test_same_seed_same_field() {
    let run = |seed| {
        let field = ShadowField::new(config(0.2), StdRng::seed_from_u64(seed));
        let mut driver = FrameDriver::new(field);
        let mut surface = Recorder::new(1280.0, 720.0);
        for frame in 0..300 {
            driver.frame(frame as f64 / 60.0, &mut surface);
        }
        driver.field().shadows().to_vec()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn test_zero_dt_leaves_positions_unchanged() {
    let mut field = field(1.0, 2);
    for _ in 0..5 {
        field.spawn();
        field.advance(0.7);
    }

    let before = field.shadows().to_vec();
    field.advance(0.0);
    assert_eq!(field.shadows(), before.as_slice());
}

#[test]
fn test_age_never_decreases() {
    let mut driver = FrameDriver::new(field(1.0, 9));
    let mut surface = Recorder::new(1280.0, 720.0);
    driver.frame(0.0, &mut surface);

    let born_at = driver.field().shadows()[0].born_at;
    let mut last_age = 0.0;
    for timestamp in [0.1, 0.5, 0.3, f64::NAN, 0.2, 5.0, 4.0, 6.0] {
        driver.frame(timestamp, &mut surface);
        let age = driver.field().now() - born_at;
        assert!(age >= last_age, "age went from {} to {}", last_age, age);
        last_age = age;
    }
}

#[test]
fn test_opacity_fades_within_bounds() {
    let shadow = fixed_shadow(0.0, 20.0);
    let mut last = f64::INFINITY;
    for step in 0..200 {
        let age = step as f64 * 0.1;
        let opacity = shadow.opacity(age);
        assert!(opacity > 0.0 && opacity < shadow.alpha, "opacity {} at {}", opacity, age);
        assert!(opacity <= last);
        last = opacity;
    }
    assert!(shadow.opacity(19.99) < shadow.alpha * 0.05);
}

#[test]
fn test_shadow_drawn_until_lifetime_then_reaped() {
    let mut field = field(0.0, 1);
    field.advance(3.0);
    let born_at = field.now();
    assert!(field.push(fixed_shadow(born_at, 20.0)));

    let mut surface = Recorder::new(1280.0, 720.0);

    field.advance(19.9);
    assert_eq!(field.render(&mut surface), 1);
    let (_, alpha) = surface.ellipses_since_clear()[0];
    assert!(alpha > 0.0 && alpha < 0.1 * 0.5);
    assert_eq!(field.reap(), 0);

    field.advance(0.2);
    surface.take_ops();
    assert_eq!(field.render(&mut surface), 0);
    assert_eq!(field.reap(), 1);
    assert!(field.is_empty());

    for _ in 0..10 {
        field.advance(1.0);
        assert_eq!(field.render(&mut surface), 0);
    }
    assert!(surface.ellipses_since_clear().is_empty());
}

#[test]
fn test_newborn_pinned_to_origin() {
    let mut field = field(0.0, 1);
    let shadow = fixed_shadow(field.now(), 20.0);
    field.push(shadow.clone());
    field.advance(0.0);
    assert_eq!((field.shadows()[0].x, field.shadows()[0].y), (shadow.origin_x, shadow.origin_y));
}
