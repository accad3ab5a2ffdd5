//! Document shell and shared chrome.

use crate::locale::{t, Locale, Msg};

/// Escape text for use in element content or a quoted attribute.
pub fn escape_text(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Wrap `body` in the localized document shell.
pub fn render_document(locale: Locale, title: &str, body: &str) -> String {
    let site = t(locale, Msg::SiteName);
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"{lang}\" dir=\"{dir}\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title} | {site}</title>\n",
            "<link rel=\"stylesheet\" href=\"/static/site.css\">\n",
            "</head>\n",
            "<body class=\"{font}\">\n",
            "{header}",
            "<main>\n{body}\n</main>\n",
            "{footer}",
            "</body>\n",
            "</html>\n"
        ),
        lang = locale,
        dir = locale.direction().as_str(),
        title = escape_text(title),
        site = site,
        font = locale.font_mode().css_class(),
        header = header(locale),
        body = body,
        footer = footer(locale),
    )
}

fn header(locale: Locale) -> String {
    let links = [
        ("", Msg::NavHome),
        ("/faq", Msg::NavFaq),
        ("/login", Msg::NavLogin),
        ("/register", Msg::NavRegister),
        ("/dashboard", Msg::NavDashboard),
    ];

    let mut nav = String::new();
    for (path, label) in links {
        nav.push_str(&format!(
            "<li><a href=\"/{}{}\">{}</a></li>",
            locale,
            path,
            t(locale, label)
        ));
    }
    format!(
        "<header>\n<a class=\"brand\" href=\"/{}\">{}</a>\n<nav><ul>{}</ul></nav>\n</header>\n",
        locale,
        t(locale, Msg::SiteName),
        nav
    )
}

fn footer(locale: Locale) -> String {
    format!(
        "<footer><p>{} {}</p></footer>\n",
        t(locale, Msg::SiteName),
        t(locale, Msg::Footer)
    )
}
