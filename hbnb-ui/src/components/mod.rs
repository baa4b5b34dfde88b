//! UI Components
//!
//! Layout pieces shared by every page.

pub mod fragment;
pub mod nav;
pub mod shadow_canvas;
pub mod toast;

pub use fragment::{fragment_view, Fragments};
pub use nav::Nav;
pub use shadow_canvas::ShadowCanvas;
pub use toast::Toast;
