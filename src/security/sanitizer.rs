//! HTML sanitization for admin-supplied content.
//!
//! Any HTML rendered into a page (FAQ answers in particular) goes through
//! [`HtmlSanitizer`] first. The policy is an allow-list of tags and
//! attributes, with an explicit deny-list that wins over the allow-list.
//!
//! Input is parsed by html5ever (via ammonia), so nested, unclosed or
//! otherwise malformed markup is normalized before filtering rather than
//! matched textually.
//!
//! Residual risk: `style` and `class` are allowed on every element, so CSS
//! based tricks (e.g. `background-image` beacons) are not blocked here.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "a", "ul", "ol", "li", "strong", "em",
    "b", "i", "u", "blockquote", "code", "pre", "img", "div", "span", "table", "thead", "tbody",
    "tr", "th", "td",
];

const GENERIC_ATTRIBUTES: &[&str] = &["class", "style", "title", "role", "aria-label", "aria-hidden"];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "target"]),
    ("img", &["src", "alt", "width", "height"]),
    ("th", &["colspan", "rowspan"]),
    ("td", &["colspan", "rowspan"]),
];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Tags removed even if they appear in the allow-list.
pub const DENIED_TAGS: &[&str] = &["script", "iframe", "object", "embed", "form"];

/// Denied tags whose content is dropped along with the tag.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed"];

/// Attribute name prefix for inline event handlers.
const EVENT_HANDLER_PREFIX: &str = "on";

static SHARED: LazyLock<HtmlSanitizer> = LazyLock::new(HtmlSanitizer::new);

/// Sanitize with the process-wide sanitizer.
pub fn sanitize_html(input: &str) -> String {
    SHARED.sanitize(input)
}

/// Allow-list HTML sanitizer.
pub struct HtmlSanitizer {
    builder: Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = TAG_ATTRIBUTES
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .rm_tags(DENIED_TAGS)
            .clean_content_tags(DROP_CONTENT_TAGS.iter().copied().collect())
            .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .link_rel(Some("noopener noreferrer"))
            .strip_comments(true)
            .attribute_filter(|_element, attribute, value| {
                if is_event_handler(attribute) {
                    None
                } else {
                    Some(Cow::Borrowed(value))
                }
            });

        Self { builder }
    }

    /// Clean `input`. Empty input yields an empty string.
    pub fn sanitize(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return String::new();
        }
        self.builder.clean(input).to_string()
    }

    /// Clean optional input; `None` yields an empty string.
    pub fn sanitize_opt(&self, input: Option<&str>) -> String {
        input.map(|s| self.sanitize(s)).unwrap_or_default()
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_event_handler(attribute: &str) -> bool {
    attribute
        .get(..EVENT_HANDLER_PREFIX.len())
        .map(|p| p.eq_ignore_ascii_case(EVENT_HANDLER_PREFIX))
        .unwrap_or(false)
}
