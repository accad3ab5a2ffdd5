//! `robots.txt` generation.

use crate::config::SiteSettings;

/// Path prefixes crawlers are asked to skip.
const DISALLOWED: &[&str] = &["/dashboard/", "/api/"];

pub fn render_robots(site: &SiteSettings) -> String {
    let mut out = String::from("User-Agent: *\nAllow: /\n");
    for path in DISALLOWED {
        out.push_str("Disallow: ");
        out.push_str(path);
        out.push('\n');
    }
    out.push('\n');
    out.push_str("Sitemap: ");
    out.push_str(&site.sitemap_url());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_robots() {
        let expected = "User-Agent: *\nAllow: /\nDisallow: /dashboard/\nDisallow: /api/\n\nSitemap: https://www.watermelontours.com/sitemap.xml\n";
        assert_eq!(render_robots(&SiteSettings::default()), expected);
    }

    #[test]
    fn test_configured_base_url() {
        let site = SiteSettings {
            base_url: "https://staging.example.org/".into(),
            ..SiteSettings::default()
        };
        assert!(render_robots(&site).ends_with("Sitemap: https://staging.example.org/sitemap.xml\n"));
    }
}
