//! `sitemap.xml` for the generated pages.
//!
//! Lists the home page, the product listing, every product page and every
//! blog post page as absolute URLs under `siteUrl`. With an empty `siteUrl` the locations are
//! root-relative paths, which crawlers ignore but which keep the file valid
//! for local previews.

use crate::links;
use crate::types::SiteConfig;
use std::fmt::Write;

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub priority: f32,
}

/// Entries for the home page, listing, and each product id in order.
pub fn entries<'a>(config: &SiteConfig, ids: impl IntoIterator<Item = &'a str>) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            loc: links::home_url(config),
            priority: 1.0,
        },
        SitemapEntry {
            loc: links::listing_url(config),
            priority: 0.8,
        },
    ];
    entries.extend(ids.into_iter().map(|id| SitemapEntry {
        loc: links::canonical_url(config, id),
        priority: 0.6,
    }));
    entries
}

/// Entries for blog post pages, given their site-relative URLs.
pub fn post_entries<'a>(config: &SiteConfig, urls: impl IntoIterator<Item = &'a str>) -> Vec<SitemapEntry> {
    urls.into_iter()
        .map(|url| SitemapEntry {
            loc: format!("{}{}", config.base_url(), url),
            priority: 0.5,
        })
        .collect()
}

/// Serialize entries as a sitemaps.org `urlset` document.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing to a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
