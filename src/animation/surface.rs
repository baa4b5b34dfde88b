//! Drawing surface abstraction
//!
//! The shadow field draws through [`Surface`], which mirrors the slice of the
//! canvas 2D context it needs. The browser implements it over
//! `CanvasRenderingContext2d`; [`Recorder`] captures draw calls for tests and
//! tracks the state stack so leaks of alpha or blur are observable.

use super::shadow::Ellipse;

pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> (f64, f64);

    fn clear(&mut self);

    /// Push the drawing state (alpha, filter)
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching [`Surface::save`]
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f64);

    /// Gaussian blur radius in pixels; 0 disables the filter
    fn set_blur(&mut self, radius: f64);

    fn fill_ellipse(&mut self, ellipse: &Ellipse, color: &str);
}

/// A call made against a [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Alpha(f64),
    Blur(f64),
    Ellipse { ellipse: Ellipse, alpha: f64, blur: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    alpha: f64,
    blur: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { alpha: 1.0, blur: 0.0 }
    }
}

/// In-memory surface that records every call
#[derive(Debug, Clone)]
pub struct Recorder {
    width: f64,
    height: f64,
    state: DrawState,
    stack: Vec<DrawState>,
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Ellipses drawn since the last clear
    pub fn ellipses_since_clear(&self) -> Vec<(Ellipse, f64)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);

        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Ellipse { ellipse, alpha, .. } => Some((*ellipse, *alpha)),
                _ => None,
            })
            .collect()
    }

    pub fn global_alpha(&self) -> f64 {
        self.state.alpha
    }

    pub fn blur(&self) -> f64 {
        self.state.blur
    }

    /// Number of saves not yet restored
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for Recorder {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_blur(&mut self, radius: f64) {
        self.state.blur = radius;
        self.ops.push(DrawOp::Blur(radius));
    }

    fn fill_ellipse(&mut self, ellipse: &Ellipse, _color: &str) {
        self.ops.push(DrawOp::Ellipse {
            ellipse: *ellipse,
            alpha: self.state.alpha,
            blur: self.state.blur,
        });
    }
}
