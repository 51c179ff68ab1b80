//! Static site generation.
//!
//! Takes loaded [`SiteData`] and writes the finished site. Every page goes
//! through the same two steps: the [`page`](crate::page) controller builds a
//! [`PageState`](crate::page::PageState), then the
//! [`document`](crate::document) adapter turns it into HTML.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home: featured, categories, posts
//! ├── sitemap.xml
//! ├── assets/                    # Copied from <source>/assets (if present)
//! ├── blog/
//! │   └── desk-lamps.html        # One page per post, at the post's own URL
//! └── products/
//!     ├── index.html             # Listing with filters and search
//!     ├── desk-lamp.html         # One page per product
//!     └── ...
//! ```
//!
//! Product ids become file names, so an id that is empty or could escape the
//! `products/` directory (`/`, `\`, `..`) is skipped with a warning rather
//! than written. Other characters are kept in the file name and
//! percent-encoded in links.
//!
//! A post is written only when its `url` is a site-relative `.html` path
//! (see [`post_output_path`]); external links are left alone.

use crate::config::{BuildConfig, ConfigError};
use crate::document::{self, Layout};
use crate::page;
use crate::sitemap;
use crate::types::SiteData;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// What a generator run wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Written pages relative to `output_dir`, in write order.
    pub pages: Vec<PathBuf>,
    /// Product ids that could not be used as file names.
    pub skipped_ids: Vec<String>,
    /// Post URLs that do not map to a file under the output directory.
    pub skipped_posts: Vec<String>,
    pub sitemap_urls: usize,
}

impl GenerateReport {
    pub fn product_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.starts_with("products"))
            .filter(|p| p.file_name().is_some_and(|name| name != "index.html"))
            .count()
    }

    /// Pages outside `products/` other than the home page.
    pub fn post_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| !p.starts_with("products") && p.as_path() != Path::new("index.html"))
            .count()
    }
}

/// Whether `id` is safe to use as `products/<id>.html`.
pub fn is_safe_id(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains('/') && !id.contains('\\') && !id.contains("..")
}

/// Output file for a post URL such as `/blog/desk-lamps.html`.
///
/// `None` for anything that is not a site-relative `.html` path or that
/// could leave the output directory.
pub fn post_output_path(url: &str) -> Option<PathBuf> {
    let relative = url.strip_prefix('/')?;
    if relative.starts_with('/') || !relative.ends_with(".html") {
        return None;
    }
    if relative.contains(['\\', '?', '#', '%']) {
        return None;
    }
    let mut path = PathBuf::new();
    for segment in relative.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        path.push(segment);
    }
    Some(path)
}

/// Write the whole site into `output_dir` using the standard layout.
pub fn generate(
    data: &SiteData,
    config: &BuildConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    generate_with_layout(data, config, &Layout::default(), output_dir)
}

pub fn generate_with_layout(
    data: &SiteData,
    config: &BuildConfig,
    layout: &Layout,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    config.validate()?;

    let products_dir = output_dir.join("products");
    fs::create_dir_all(&products_dir)?;

    let mut report = GenerateReport {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };
    let mut write_page = |relative: PathBuf, state: &page::PageState| -> std::io::Result<()> {
        let html = document::render_document(state, layout, &config.search);
        let path = output_dir.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html.into_string())?;
        tracing::info!(page = %relative.display(), "generated");
        report.pages.push(relative);
        Ok(())
    };

    write_page(PathBuf::from("index.html"), &page::build_home(data, config))?;
    write_page(
        Path::new("products").join("index.html"),
        &page::build_listing(data, config),
    )?;

    let mut written_ids = Vec::new();
    let mut skipped_ids = Vec::new();
    for product in &data.catalog {
        if !is_safe_id(&product.id) {
            tracing::warn!(id = %product.id, "product id is not a safe file name, skipped");
            skipped_ids.push(product.id.clone());
            continue;
        }
        if written_ids.contains(&product.id.as_str()) {
            tracing::warn!(id = %product.id, "duplicate product id, first entry wins");
            continue;
        }
        let state = page::build_product(data, config, &product.id);
        write_page(
            Path::new("products").join(format!("{}.html", product.id)),
            &state,
        )?;
        written_ids.push(product.id.as_str());
    }

    let mut written_posts: Vec<&str> = Vec::new();
    let mut skipped_posts = Vec::new();
    for post in &data.posts {
        let Some(relative) = post_output_path(&post.url) else {
            tracing::warn!(url = %post.url, "post url is not a local page, not generated");
            skipped_posts.push(post.url.clone());
            continue;
        };
        if written_posts.contains(&post.url.as_str()) {
            continue;
        }
        if relative.starts_with("products") || relative == Path::new("index.html") {
            tracing::warn!(url = %post.url, "post url collides with a catalog page, not generated");
            skipped_posts.push(post.url.clone());
            continue;
        }
        write_page(relative, &page::build_post(data, &post.url))?;
        written_posts.push(post.url.as_str());
    }
    report.skipped_ids = skipped_ids;
    report.skipped_posts = skipped_posts;

    let mut entries = sitemap::entries(&data.config, written_ids.iter().copied());
    entries.extend(sitemap::post_entries(&data.config, written_posts.iter().copied()));
    fs::write(output_dir.join("sitemap.xml"), sitemap::render(&entries))?;
    report.sitemap_urls = entries.len();
    tracing::info!(urls = entries.len(), "generated sitemap.xml");

    Ok(report)
}

/// Copy `src` into `dst` recursively, creating directories as needed.
pub fn copy_assets(src: &Path, dst: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copied += copy_assets(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}
