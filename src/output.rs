//! CLI output formatting for every subcommand.
//!
//! # Information-First Display
//!
//! Output leads with what the site contains (products, categories, pages)
//! and shows file paths and load status as indented context. Entities share
//! one pattern: a header line with a positional index and name, then
//! indented detail lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Config
//!     Site: Gear Lab (https://gearlab.example)
//!     Status: loaded
//! Catalog
//!     Status: loaded
//!     Products: 10 (1 skipped)
//!     Posts: 1
//! Categories
//! 001 Audio (5 products)
//! 002 Video (5 products)
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Listing → products/index.html
//! 001 desk-lamp → products/desk-lamp.html
//! 002 earbuds → products/earbuds.html
//! Post → blog/desk-lamps.html
//!
//! Skipped
//!     ../evil (unsafe id)
//!
//! Generated 2 product pages, 1 post page, 5 sitemap URLs in dist
//! ```
//!
//! ## Search
//!
//! ```text
//! 001 Studio Headphones (Audio)
//!     Price: $49.99
//!     Rating: ⭐⭐⭐⭐⭐ 4.5/5
//!     Page: /products/studio-cans.html
//! ```
//!
//! # Architecture
//!
//! Each subcommand has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog;
use crate::generate::GenerateReport;
use crate::links;
use crate::render;
use crate::types::{DocStatus, Product, SiteData};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn status_line(status: &DocStatus) -> String {
    match status {
        DocStatus::Loaded => format!("{}Status: loaded", indent(1)),
        DocStatus::Fallback(reason) => {
            format!("{}Status: fallback to defaults ({})", indent(1), reason)
        }
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the load report and catalog summary.
pub fn format_load_output(data: &SiteData) -> Vec<String> {
    let mut lines = Vec::new();
    let site = &data.config;

    lines.push("Config".to_string());
    if site.site_url.is_empty() {
        lines.push(format!("{}Site: {}", indent(1), site.site_title));
    } else {
        lines.push(format!(
            "{}Site: {} ({})",
            indent(1),
            site.site_title,
            site.site_url
        ));
    }
    lines.push(status_line(&data.report.config));

    lines.push("Catalog".to_string());
    lines.push(status_line(&data.report.catalog));
    if data.report.skipped_products > 0 {
        lines.push(format!(
            "{}Products: {} ({} skipped)",
            indent(1),
            data.catalog.len(),
            data.report.skipped_products
        ));
    } else {
        lines.push(format!("{}Products: {}", indent(1), data.catalog.len()));
    }
    lines.push(format!("{}Posts: {}", indent(1), data.posts.len()));

    let categories = catalog::categories(&data.catalog);
    if !categories.is_empty() {
        lines.push("Categories".to_string());
        for (i, category) in categories.iter().enumerate() {
            let count = data
                .catalog
                .iter()
                .filter(|p| p.category == *category)
                .count();
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                category,
                plural(count, "product", "products")
            ));
        }
    }

    lines
}

/// Print the load report to stdout.
pub fn print_load_output(data: &SiteData) {
    for line in format_load_output(data) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format what a generator run wrote.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let listing = Path::new("products").join("index.html");
    let mut product_pos = 0;

    for page in &report.pages {
        if page.as_path() == Path::new("index.html") {
            lines.push(format!("Home → {}", page.display()));
        } else if *page == listing {
            lines.push(format!("Listing → {}", page.display()));
        } else if !page.starts_with("products") {
            lines.push(format!("Post → {}", page.display()));
        } else {
            product_pos += 1;
            let id = page
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            lines.push(format!(
                "{} {} → {}",
                format_index(product_pos),
                id,
                page.display()
            ));
        }
    }

    if !report.skipped_ids.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for id in &report.skipped_ids {
            let shown = if id.is_empty() { "(empty)" } else { id.as_str() };
            lines.push(format!("{}{} (unsafe id)", indent(1), shown));
        }
    }
    if !report.skipped_posts.is_empty() {
        if report.skipped_ids.is_empty() {
            lines.push(String::new());
            lines.push("Skipped".to_string());
        }
        for url in &report.skipped_posts {
            lines.push(format!("{}{} (not a local page)", indent(1), url));
        }
    }

    let mut summary = plural(report.product_pages(), "product page", "product pages");
    if report.post_pages() > 0 {
        summary.push_str(", ");
        summary.push_str(&plural(report.post_pages(), "post page", "post pages"));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} in {}",
        summary,
        plural(report.sitemap_urls, "sitemap URL", "sitemap URLs"),
        report.output_dir.display()
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// search
// ============================================================================

/// Format search hits. `results` is `None` when the query was too short to run.
pub fn format_search_results(
    query: &str,
    min_len: usize,
    results: Option<&[&Product]>,
) -> Vec<String> {
    let Some(results) = results else {
        return vec![format!(
            "Query \"{}\" is too short (minimum {} characters)",
            query.trim(),
            min_len
        )];
    };
    if results.is_empty() {
        return vec![format!("No products match \"{}\"", query.trim())];
    }

    let mut lines = Vec::new();
    for (i, product) in results.iter().enumerate() {
        let rating = product.clamped_rating();
        if product.category.is_empty() {
            lines.push(format!("{} {}", format_index(i + 1), product.name));
        } else {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                product.name,
                product.category
            ));
        }
        if !product.price.is_empty() {
            lines.push(format!("{}Price: {}", indent(1), product.price));
        }
        lines.push(format!(
            "{}Rating: {} {}",
            indent(1),
            render::star_rating(rating),
            render::rating_text(rating)
        ));
        lines.push(format!(
            "{}Page: {}",
            indent(1),
            links::product_page_path(&product.id)
        ));
    }
    lines
}

/// Print search hits to stdout.
pub fn print_search_results(query: &str, min_len: usize, results: Option<&[&Product]>) {
    for line in format_search_results(query, min_len, results) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::LoadReport;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn load_output_lists_categories_with_counts() {
        let data = site_data(catalog(&[("a", "Audio"), ("b", "Video"), ("c", "Audio")]));
        let lines = format_load_output(&data);

        assert_eq!(lines[0], "Config");
        assert_eq!(lines[1], "    Site: Gear Lab (https://gearlab.example)");
        assert_eq!(lines[2], "    Status: loaded");
        assert!(lines.contains(&"    Products: 3".to_string()));
        assert!(lines.contains(&"001 Audio (2 products)".to_string()));
        assert!(lines.contains(&"002 Video (1 product)".to_string()));
    }

    #[test]
    fn load_output_shows_fallback_and_skips() {
        let mut data = site_data(Vec::new());
        data.report = LoadReport {
            config: DocStatus::Fallback("HTTP 500".to_string()),
            catalog: DocStatus::Loaded,
            skipped_products: 2,
        };
        let lines = format_load_output(&data);

        assert_eq!(lines[2], "    Status: fallback to defaults (HTTP 500)");
        assert!(lines.contains(&"    Products: 0 (2 skipped)".to_string()));
        assert!(!lines.contains(&"Categories".to_string()));
    }

    #[test]
    fn generate_output_names_every_page() {
        let report = GenerateReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                PathBuf::from("index.html"),
                Path::new("products").join("index.html"),
                Path::new("products").join("desk-lamp.html"),
                Path::new("products").join("earbuds.html"),
            ],
            skipped_ids: vec!["../evil".to_string()],
            skipped_posts: Vec::new(),
            sitemap_urls: 4,
        };
        let lines = format_generate_output(&report);

        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "Listing → products/index.html");
        assert_eq!(lines[2], "001 desk-lamp → products/desk-lamp.html");
        assert_eq!(lines[3], "002 earbuds → products/earbuds.html");
        assert!(lines.contains(&"    ../evil (unsafe id)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 product pages, 4 sitemap URLs in dist"
        );
    }

    #[test]
    fn generate_output_lists_posts() {
        let report = GenerateReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                PathBuf::from("index.html"),
                Path::new("products").join("index.html"),
                Path::new("blog").join("desk-lamps.html"),
            ],
            skipped_ids: Vec::new(),
            skipped_posts: vec!["https://other.example/a.html".to_string()],
            sitemap_urls: 3,
        };
        let lines = format_generate_output(&report);

        assert_eq!(lines[2], "Post → blog/desk-lamps.html");
        assert!(lines.contains(&"Skipped".to_string()));
        assert!(lines.contains(&"    https://other.example/a.html (not a local page)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 0 product pages, 1 post page, 3 sitemap URLs in dist"
        );
    }

    #[test]
    fn search_output_for_hits() {
        let items = catalog(&[("studio-cans", "Audio")]);
        let hits: Vec<&Product> = items.iter().collect();
        let lines = format_search_results("cans", 3, Some(hits.as_slice()));

        assert_eq!(lines[0], "001 Product studio-cans (Audio)");
        assert_eq!(lines[1], "    Price: $49.99");
        assert_eq!(lines[2], "    Rating: ⭐⭐⭐⭐⭐ 4.5/5");
        assert_eq!(lines[3], "    Page: /products/studio-cans.html");
    }

    #[test]
    fn search_output_for_short_and_empty() {
        assert_eq!(
            format_search_results(" ab ", 3, None),
            vec!["Query \"ab\" is too short (minimum 3 characters)".to_string()]
        );
        assert_eq!(
            format_search_results("zebra", 3, Some(&[][..])),
            vec!["No products match \"zebra\"".to_string()]
        );
    }
}
