//! # HBnB
//!
//! Front end for the HBnB rental listings API: session handling, a REST
//! client, place and review rendering, and the ambient shadow animation
//! drawn behind the pages.
//!
//! ## Modules
//!
//! - [`animation`]: Shadow lifecycle, frame driver and drawing surface seam
//! - [`client`]: API client trait, endpoints and error mapping
//! - [`config`]: TOML configuration with environment overrides
//! - [`controller`]: Per-page orchestration emitting paint commands
//! - [`models`]: API payloads and review validation
//! - [`render`]: Platform-neutral HTML fragments
//! - [`session`]: Token cookie encoding and storage
//!
//! Everything except the reqwest client and the CLI compiles to
//! `wasm32-unknown-unknown`; the `hbnb-ui` crate builds the browser pages on
//! top of this library with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hbnb::client::HbnbClient;
//! use hbnb::controller::{PageController, PageElements, Paint};
//! use hbnb::session::CookieJar;
//! use hbnb::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = HbnbClient::new(&config.api)?;
//!     let session = CookieJar::new(config.session.clone());
//!     let controller = PageController::new(client, session, config.ui.clone());
//!
//!     for paint in controller.load(PageElements::index(), None).await {
//!         if let Paint::Places(cards) = paint {
//!             println!("{}", hbnb::render::to_html(&cards));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod animation;
pub mod client;
pub mod config;
pub mod controller;
pub mod models;
pub mod render;
pub mod session;

pub use animation::{AnimationHandle, FrameDriver, FrameStatus, ShadowField, Surface};

pub use client::{ClientError, Endpoints, PlacesApi};
#[cfg(feature = "native")]
pub use client::HbnbClient;

pub use config::{AnimationConfig, Config, ConfigError, LoggingConfig, UiConfig};

pub use controller::{Notice, NoticeKind, PageController, PageElements, Paint, PriceFilter};

pub use models::{NewReview, Place, Review, ReviewError};

pub use render::Fragment;

pub use session::{CookieJar, SessionStore};
