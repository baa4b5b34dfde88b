//! Pages
//!
//! Top-level page components for each route.

pub mod index;
pub mod login;
pub mod place;

pub use index::IndexPage;
pub use login::LoginPage;
pub use place::PlacePage;
