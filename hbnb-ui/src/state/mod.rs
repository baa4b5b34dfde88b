//! State Management
//!
//! Global notice/login state, the cookie-backed session and per-page views.

pub mod global;
pub mod page;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use page::{page_controller, Controller, PageView};
pub use session::DocumentCookies;
