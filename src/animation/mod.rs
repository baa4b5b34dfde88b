//! Ambient Shadow Animation
//!
//! A handful of large, blurred, translucent ellipses drift across a canvas
//! behind the page content. Each [`Shadow`] is born with random attributes,
//! sways on a sum of sinusoids, fades as it ages and is dropped once its
//! lifetime runs out.
//!
//! ## Frame cycle
//!
//! 1. [`FrameClock`] turns the host timestamp into a delta
//! 2. the surface is cleared
//! 3. [`ShadowField::advance`] moves the clock and every shadow
//! 4. [`ShadowField::render`] draws live shadows
//! 5. [`ShadowField::spawn`] may add one shadow
//! 6. [`ShadowField::reap`] drops dead shadows
//!
//! ## Example
//!
//! ```rust
//! use hbnb::animation::{FrameDriver, FrameStatus, Recorder, ShadowField};
//! use hbnb::config::AnimationConfig;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let field = ShadowField::new(AnimationConfig::default(), StdRng::seed_from_u64(1));
//! let mut driver = FrameDriver::new(field);
//! let mut surface = Recorder::new(1280.0, 720.0);
//!
//! for frame in 0..120 {
//!     assert_eq!(driver.frame(frame as f64 / 60.0, &mut surface), FrameStatus::Continue);
//! }
//! assert!(driver.field().len() <= 7);
//!
//! driver.handle().stop();
//! assert_eq!(driver.frame(2.0, &mut surface), FrameStatus::Stopped);
//! ```

mod driver;
mod field;
mod shadow;
mod surface;

pub use driver::{AnimationHandle, FrameClock, FrameDriver, FrameStatus};
pub use field::ShadowField;
pub use shadow::{Ellipse, Shadow};
pub use surface::{DrawOp, Recorder, Surface};
