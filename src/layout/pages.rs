//! Page bodies.
//!
//! Each function returns the content of `<main>`; handlers wrap it with
//! [`render_document`](super::render_document).

use crate::auth::Session;
use crate::layout::document::escape_text;
use crate::locale::{t, Locale, Msg};
use crate::security::sanitizer::HtmlSanitizer;
use crate::store::Faq;

pub fn home(locale: Locale) -> String {
    format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>{}</p>\n<a class=\"button\" href=\"/{}/faq\">{}</a>\n</section>",
        t(locale, Msg::HomeHeading),
        t(locale, Msg::HomeIntro),
        locale,
        t(locale, Msg::NavFaq)
    )
}

/// FAQ list. Questions are plain text; answers are admin-supplied HTML.
pub fn faq(locale: Locale, faqs: &[Faq], sanitizer: &HtmlSanitizer) -> String {
    let mut out = format!("<h1>{}</h1>\n", t(locale, Msg::FaqHeading));
    if faqs.is_empty() {
        out.push_str(&format!("<p class=\"empty\">{}</p>", t(locale, Msg::FaqEmpty)));
        return out;
    }

    out.push_str("<div class=\"faq-list\">\n");
    for item in faqs {
        out.push_str(&format!(
            "<details id=\"faq-{}\">\n<summary>{}</summary>\n<div class=\"answer\">{}</div>\n</details>\n",
            escape_text(&item.id),
            escape_text(&item.question),
            sanitizer.sanitize(&item.answer)
        ));
    }
    out.push_str("</div>");
    out
}

/// Sign-in form. `redirect_url` is carried through so the identity
/// provider can send the user back.
pub fn login(locale: Locale, redirect_url: Option<&str>) -> String {
    let redirect = redirect_url
        .map(|url| {
            format!(
                "<input type=\"hidden\" name=\"redirect_url\" value=\"{}\">\n",
                escape_text(url)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "<h1>{heading}</h1>\n",
            "<form class=\"auth-form\" data-auth-flow=\"sign-in\">\n",
            "{redirect}",
            "<label>{email}<input type=\"email\" name=\"email\" required></label>\n",
            "<label>{password}<input type=\"password\" name=\"password\" required></label>\n",
            "<button type=\"submit\">{submit}</button>\n",
            "</form>\n",
            "<p><a href=\"/{locale}/register\">{register}</a></p>"
        ),
        heading = t(locale, Msg::LoginHeading),
        redirect = redirect,
        email = t(locale, Msg::EmailLabel),
        password = t(locale, Msg::PasswordLabel),
        submit = t(locale, Msg::LoginSubmit),
        locale = locale,
        register = t(locale, Msg::NavRegister),
    )
}

pub fn register(locale: Locale) -> String {
    format!(
        concat!(
            "<h1>{heading}</h1>\n",
            "<form class=\"auth-form\" data-auth-flow=\"sign-up\">\n",
            "<label>{name}<input type=\"text\" name=\"name\" required></label>\n",
            "<label>{email}<input type=\"email\" name=\"email\" required></label>\n",
            "<label>{password}<input type=\"password\" name=\"password\" required></label>\n",
            "<button type=\"submit\">{submit}</button>\n",
            "</form>\n",
            "<p><a href=\"/{locale}/login\">{login}</a></p>"
        ),
        heading = t(locale, Msg::RegisterHeading),
        name = t(locale, Msg::NameLabel),
        email = t(locale, Msg::EmailLabel),
        password = t(locale, Msg::PasswordLabel),
        submit = t(locale, Msg::RegisterSubmit),
        locale = locale,
        login = t(locale, Msg::NavLogin),
    )
}

pub fn dashboard(locale: Locale, session: Option<&Session>) -> String {
    let mut out = format!("<h1>{}</h1>\n", t(locale, Msg::DashboardHeading));
    if let Some(session) = session {
        out.push_str(&format!(
            "<p class=\"greeting\">{} <strong>{}</strong></p>\n",
            t(locale, Msg::DashboardGreeting),
            escape_text(&session.user_id)
        ));
    }
    out.push_str(&format!(
        "<form method=\"post\" action=\"/api/auth/logout\"><button type=\"submit\">{}</button></form>",
        t(locale, Msg::Logout)
    ));
    out
}

/// Fallback view shown when a page could not be produced.
pub fn error(locale: Locale, path: &str) -> String {
    format!(
        "<section class=\"error\">\n<h1>{}</h1>\n<p>{}</p>\n<a class=\"button\" href=\"{}\">{}</a>\n</section>",
        t(locale, Msg::ErrorHeading),
        t(locale, Msg::ErrorBody),
        escape_text(path),
        t(locale, Msg::ErrorReload)
    )
}

pub fn not_found(locale: Locale) -> String {
    format!(
        "<section class=\"not-found\">\n<h1>{}</h1>\n<p>{}</p>\n<a href=\"/{}\">{}</a>\n</section>",
        t(locale, Msg::NotFoundHeading),
        t(locale, Msg::NotFoundBody),
        locale,
        t(locale, Msg::NavHome)
    )
}
