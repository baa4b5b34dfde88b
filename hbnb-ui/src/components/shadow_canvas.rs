//! Shadow Canvas Component
//!
//! Full-window canvas behind the page content, animated by
//! `hbnb::animation` from `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use leptos::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use hbnb::animation::{AnimationHandle, Ellipse, FrameDriver, FrameStatus, ShadowField, Surface};
use hbnb::config::AnimationConfig;

use crate::api::ui_config;

/// Animated background canvas; the loop stops when the component unmounts
#[component]
pub fn ShadowCanvas() -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let running: Rc<RefCell<Option<ShadowLoop>>> = Rc::new(RefCell::new(None));

    let slot = Rc::clone(&running);
    create_effect(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if slot.borrow().is_some() {
            return;
        }

        let canvas: &HtmlCanvasElement = &canvas;
        match ShadowLoop::start(canvas.clone(), ui_config().animation) {
            Some(shadow_loop) => *slot.borrow_mut() = Some(shadow_loop),
            None => web_sys::console::warn_1(&"Shadow animation unavailable".into()),
        }
    });

    on_cleanup(move || {
        if let Some(shadow_loop) = running.borrow_mut().take() {
            shadow_loop.stop();
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            class="shadow-canvas"
            aria-hidden="true"
            style="position: fixed; inset: 0; z-index: -1; pointer-events: none;"
        />
    }
}

/// CSS filter value for a blur radius
fn blur_filter(radius: f64) -> String {
    if radius > 0.0 {
        format!("blur({}px)", radius)
    } else {
        "none".to_string()
    }
}

fn window_size(window: &Window) -> Option<(u32, u32)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width.max(0.0) as u32, height.max(0.0) as u32))
}

/// [`Surface`] over a 2D canvas context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the window size
    fn fit_to(&self, window: &Window) {
        let Some((width, height)) = window_size(window) else {
            return;
        };
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_blur(&mut self, radius: f64) {
        self.ctx.set_filter(&blur_filter(radius));
    }

    fn fill_ellipse(&mut self, ellipse: &Ellipse, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        let traced = self.ctx.ellipse(
            ellipse.x,
            ellipse.y,
            ellipse.radius_x.max(0.0),
            ellipse.radius_y.max(0.0),
            ellipse.rotation,
            0.0,
            TAU,
        );
        if traced.is_ok() {
            self.ctx.fill();
        }
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A running `requestAnimationFrame` loop
pub struct ShadowLoop {
    window: Window,
    handle: AnimationHandle,
    raf_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl ShadowLoop {
    /// Start animating `canvas`. Returns `None` without a window or a 2D
    /// context.
    pub fn start(canvas: HtmlCanvasElement, config: AnimationConfig) -> Option<Self> {
        let window = web_sys::window()?;
        let mut surface = CanvasSurface::new(canvas)?;
        let mut driver = FrameDriver::new(ShadowField::new(config, StdRng::from_entropy()));
        let handle = driver.handle();

        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let raf_loop = Rc::clone(&raf_id);
        let callback_loop = Rc::clone(&callback);
        let window_loop = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
            raf_loop.set(None);
            surface.fit_to(&window_loop);
            if driver.frame(timestamp_ms / 1000.0, &mut surface) == FrameStatus::Stopped {
                return;
            }

            // schedule next frame
            if let Some(next) = callback_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(next.as_ref().unchecked_ref()) {
                    raf_loop.set(Some(id));
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let first = {
            let callback = callback.borrow();
            window
                .request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
                .ok()?
        };
        raf_id.set(Some(first));

        Some(Self {
            window,
            handle,
            raf_id,
            callback,
        })
    }

    /// Stop the loop and release the frame callback
    pub fn stop(self) {
        self.handle.stop();
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        self.callback.borrow_mut().take();
    }
}
