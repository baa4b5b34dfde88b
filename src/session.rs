//! Session Accessor
//!
//! The session is a single bearer token kept in a cookie (`token`, path `/`,
//! no expiry). [`SessionStore`] abstracts where the cookie string lives so the
//! page controller runs the same way against `document.cookie` in the browser
//! and against an in-memory [`CookieJar`] natively.

use std::cell::RefCell;

use crate::config::SessionConfig;

/// Read/write access to the session token
pub trait SessionStore {
    /// Current token, if one is stored and non-empty
    fn token(&self) -> Option<String>;

    /// Persist a freshly issued token
    fn store_token(&self, token: &str);

    /// Forget the token
    fn clear(&self);
}

/// Find a cookie value in a `document.cookie` style string.
///
/// Pairs are separated by `;` with optional whitespace. Values are
/// percent-decoded; a value that fails to decode is returned raw.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

/// Build the assignment written to `document.cookie` for a token
pub fn token_cookie(config: &SessionConfig, token: &str) -> String {
    format!(
        "{}={}; path={}",
        config.cookie_name,
        urlencoding::encode(token),
        config.cookie_path
    )
}

/// Build the assignment that expires the token cookie
pub fn expired_token_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; path={}; expires=Thu, 01 Jan 1970 00:00:00 GMT",
        config.cookie_name, config.cookie_path
    )
}

/// In-memory cookie string with browser-like assignment semantics
#[derive(Debug, Default)]
pub struct CookieJar {
    config: SessionConfig,
    pairs: RefCell<Vec<(String, String)>>,
}

impl CookieJar {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            pairs: RefCell::new(Vec::new()),
        }
    }

    /// Jar pre-populated from a cookie header
    pub fn from_header(config: SessionConfig, header: &str) -> Self {
        let jar = Self::new(config);
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.assign(pair);
        }
        jar
    }

    /// Jar holding only the given token
    pub fn with_token(config: SessionConfig, token: &str) -> Self {
        let jar = Self::new(config);
        jar.store_token(token);
        jar
    }

    /// Apply one `document.cookie = ...` assignment.
    ///
    /// Attributes after the first `;` are ignored except `expires`, which
    /// removes the cookie when present.
    pub fn assign(&self, assignment: &str) {
        let mut parts = assignment.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
            return;
        };
        let name = name.trim().to_string();
        let expired = parts.any(|attr| attr.trim().to_ascii_lowercase().starts_with("expires="));

        let mut pairs = self.pairs.borrow_mut();
        pairs.retain(|(existing, _)| *existing != name);
        if !expired {
            pairs.push((name, value.trim().to_string()));
        }
    }

    /// Render the jar as `document.cookie` would read
    pub fn header(&self) -> String {
        self.pairs
            .borrow()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl SessionStore for CookieJar {
    fn token(&self) -> Option<String> {
        read_cookie(&self.header(), &self.config.cookie_name).filter(|t| !t.is_empty())
    }

    fn store_token(&self, token: &str) {
        self.assign(&token_cookie(&self.config, token));
    }

    fn clear(&self) {
        self.assign(&expired_token_cookie(&self.config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie() {
        let cookies = "theme=dark; token=abc.def; lang=fr";
        assert_eq!(read_cookie(cookies, "token").as_deref(), Some("abc.def"));
        assert_eq!(read_cookie(cookies, "lang").as_deref(), Some("fr"));
        assert_eq!(read_cookie(cookies, "missing"), None);
        assert_eq!(read_cookie("", "token"), None);
    }

    #[test]
    fn test_read_cookie_tolerates_spacing_and_encoding() {
        let cookies = "theme=dark;token=a%20b%2Bc ;x=1";
        assert_eq!(read_cookie(cookies, "token").as_deref(), Some("a b+c"));
    }

    #[test]
    fn test_name_is_matched_exactly() {
        assert_eq!(read_cookie("xtoken=1; token=2", "token").as_deref(), Some("2"));
    }

    #[test]
    fn test_token_cookie() {
        let config = SessionConfig::default();
        assert_eq!(token_cookie(&config, "eyJ.a b"), "token=eyJ.a%20b; path=/");
    }

    #[test]
    fn test_jar_store_and_read() {
        let jar = CookieJar::new(SessionConfig::default());
        assert_eq!(jar.token(), None);

        jar.store_token("jwt-1");
        assert_eq!(jar.token().as_deref(), Some("jwt-1"));

        jar.store_token("jwt-2");
        assert_eq!(jar.token().as_deref(), Some("jwt-2"));
        assert_eq!(jar.header(), "token=jwt-2");
    }

    #[test]
    fn test_jar_clear() {
        let jar = CookieJar::from_header(SessionConfig::default(), "theme=dark; token=t");
        jar.clear();
        assert_eq!(jar.token(), None);
        assert_eq!(jar.header(), "theme=dark");
    }

    #[test]
    fn test_empty_token_is_no_session() {
        let jar = CookieJar::from_header(SessionConfig::default(), "token=");
        assert_eq!(jar.token(), None);
    }
}
