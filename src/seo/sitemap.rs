//! `sitemap.xml` generation.
//!
//! One `<url>` per published locale and public page. Every entry lists
//! the same page in all published locales as `xhtml:link` alternates.
//! Authenticated sections are never listed.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::SiteSettings;

/// A locale-relative public page.
#[derive(Debug, Clone, Copy)]
pub struct SitemapPage {
    /// Path after the locale prefix ("" for the home page).
    pub path: &'static str,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

pub const PUBLIC_PAGES: &[SitemapPage] = &[
    SitemapPage { path: "", changefreq: "weekly", priority: "1.0" },
    SitemapPage { path: "/faq", changefreq: "monthly", priority: "0.8" },
    SitemapPage { path: "/login", changefreq: "yearly", priority: "0.5" },
    SitemapPage { path: "/register", changefreq: "yearly", priority: "0.5" },
];

pub fn render_sitemap(site: &SiteSettings, lastmod: NaiveDate) -> String {
    let base = site.base_url_trimmed();
    let lastmod = lastmod.format("%Y-%m-%d");

    let mut out = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" ",
        "xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    ));

    // Writing into a String cannot fail.
    for locale in &site.locales {
        for page in PUBLIC_PAGES {
            let _ = writeln!(out, "  <url>");
            let _ = writeln!(out, "    <loc>{}</loc>", xml_escape(&page_url(base, locale, page)));
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", lastmod);
            let _ = writeln!(out, "    <changefreq>{}</changefreq>", page.changefreq);
            let _ = writeln!(out, "    <priority>{}</priority>", page.priority);
            for alternate in &site.locales {
                let _ = writeln!(
                    out,
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                    xml_escape(alternate),
                    xml_escape(&page_url(base, alternate, page))
                );
            }
            let _ = writeln!(out, "  </url>");
        }
    }
    out.push_str("</urlset>\n");
    out
}

fn page_url(base: &str, locale: &str, page: &SitemapPage) -> String {
    format!("{}/{}{}", base, locale, page.path)
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
