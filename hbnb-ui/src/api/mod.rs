//! API Access
//!
//! gloo-net implementation of `hbnb::client::PlacesApi`.

pub mod client;

pub use client::{ui_config, GlooApi};
