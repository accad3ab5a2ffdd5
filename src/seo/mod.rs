//! Search engine facing output.
//!
//! # Responsibilities
//! - robots.rs: crawler policy pointing at the sitemap
//! - sitemap.rs: public pages per published locale, with alternates
//! - ping.rs: notify search engines that the sitemap changed

pub mod ping;
pub mod robots;
pub mod sitemap;

pub use ping::{PingError, PingOutcome, SearchEngine, SearchEnginePinger};
pub use robots::render_robots;
pub use sitemap::{render_sitemap, SitemapPage, PUBLIC_PAGES};
