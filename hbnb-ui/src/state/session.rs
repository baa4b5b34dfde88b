//! Cookie-backed session
//!
//! The token lives in `document.cookie` so every page of the site sees it.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use hbnb::config::SessionConfig;
use hbnb::session::{expired_token_cookie, read_cookie, token_cookie, SessionStore};

/// [`SessionStore`] over the page's cookies
#[derive(Debug, Clone, Default)]
pub struct DocumentCookies {
    config: SessionConfig,
}

impl DocumentCookies {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()
    }

    fn assign(&self, cookie: &str) {
        let Some(document) = Self::document() else {
            return;
        };
        if let Err(e) = document.set_cookie(cookie) {
            web_sys::console::warn_2(&"Failed to write cookie:".into(), &e);
        }
    }
}

impl SessionStore for DocumentCookies {
    fn token(&self) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        read_cookie(&cookies, &self.config.cookie_name).filter(|t| !t.is_empty())
    }

    fn store_token(&self, token: &str) {
        self.assign(&token_cookie(&self.config, token));
    }

    fn clear(&self) {
        self.assign(&expired_token_cookie(&self.config));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_round_trip_through_document() {
        let cookies = DocumentCookies::new(SessionConfig::default());
        cookies.clear();
        assert_eq!(cookies.token(), None);

        cookies.store_token("a b;c");
        assert_eq!(cookies.token().as_deref(), Some("a b;c"));

        cookies.clear();
        assert_eq!(cookies.token(), None);
    }
}
