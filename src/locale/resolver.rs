//! Locale extraction and text direction.
//!
//! # Design Decisions
//! - Only the leading path segment is considered; a locale-like segment
//!   deeper in the path never selects a locale
//! - Unknown or missing locales fall back silently to the default
//! - Direction and font mode are derived, never stored

use std::convert::Infallible;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Locale used when a path carries none.
pub const DEFAULT_LOCALE: Locale = Locale(*b"en");

/// Locales written right-to-left.
const RTL_LOCALES: [&str; 4] = ["ar", "he", "fa", "ur"];

/// A two-letter lowercase locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale([u8; 2]);

impl Locale {
    /// Parse a locale code. Returns `None` unless `code` is exactly two
    /// ASCII lowercase letters.
    pub fn parse(code: &str) -> Option<Self> {
        match code.as_bytes() {
            [a, b] if a.is_ascii_lowercase() && b.is_ascii_lowercase() => Some(Self([*a, *b])),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII lowercase by construction.
        std::str::from_utf8(&self.0).unwrap_or("en")
    }

    pub fn direction(&self) -> Direction {
        if RTL_LOCALES.contains(&self.as_str()) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn font_mode(&self) -> FontMode {
        match self.direction() {
            Direction::Rtl => FontMode::Arabic,
            Direction::Ltr => FontMode::Latin,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text flow orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Font family selected by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontMode {
    Latin,
    Arabic,
}

impl FontMode {
    /// CSS class applied to the document body.
    pub fn css_class(&self) -> &'static str {
        match self {
            FontMode::Latin => "font-sans",
            FontMode::Arabic => "font-arabic",
        }
    }
}

/// Returns true if `code` is a two-letter lowercase locale code.
pub fn is_locale_code(code: &str) -> bool {
    Locale::parse(code).is_some()
}

/// Resolve the locale from a request path, falling back to `default`.
pub fn resolve_locale_or(path: &str, default: Locale) -> Locale {
    path.strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .and_then(Locale::parse)
        .unwrap_or(default)
}

/// Resolve the locale from a request path, falling back to `en`.
pub fn resolve_locale(path: &str) -> Locale {
    resolve_locale_or(path, DEFAULT_LOCALE)
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(resolve_locale(parts.uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_leading_segment() {
        assert_eq!(resolve_locale("/ar/faq").as_str(), "ar");
        assert_eq!(resolve_locale("/fr").as_str(), "fr");
        assert_eq!(resolve_locale("/de/").as_str(), "de");
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(resolve_locale("/"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale(""), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/api/faq"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/AR/faq"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/arx/faq"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/a/faq"), DEFAULT_LOCALE);
    }

    #[test]
    fn test_ignores_locale_like_segments_deeper_in_path() {
        assert_eq!(resolve_locale("/tours/ar/petra"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/tours-ar"), DEFAULT_LOCALE);
    }

    #[test]
    fn test_custom_default() {
        let fallback = Locale::parse("ar").unwrap();
        assert_eq!(resolve_locale_or("/", fallback), fallback);
    }

    #[test]
    fn test_direction_and_font() {
        let ar = Locale::parse("ar").unwrap();
        assert_eq!(ar.direction(), Direction::Rtl);
        assert_eq!(ar.font_mode().css_class(), "font-arabic");

        let en = Locale::parse("en").unwrap();
        assert_eq!(en.direction(), Direction::Ltr);
        assert_eq!(en.font_mode(), FontMode::Latin);
        assert_eq!(en.direction().as_str(), "ltr");
    }
}
