//! Loading the two site documents.
//!
//! A site is driven by two static JSON files, fetched fresh on every build:
//!
//! ```text
//! config/site-config.json   → SiteConfig
//! config/products.json      → { "products": [...], "posts": [...] }
//! ```
//!
//! Both fetches are independent and run concurrently on the rayon pool, then
//! join before anything is rendered. Loading never fails: a config document
//! that cannot be fetched or parsed is replaced by [`SiteConfig::default`], and
//! a product document that cannot be used yields an empty catalog. Each
//! fallback is logged and recorded in the [`LoadReport`]. There are no retries.
//!
//! ## Fetching
//!
//! I/O goes through the [`Fetch`] capability so the loader never knows where
//! documents come from:
//!
//! - [`DirFetcher`] reads from a local site root (the usual `build` case).
//! - [`HttpFetcher`] GETs from a deployed site, with a request timeout so a
//!   hung server cannot stall the build.
//! - [`MemoryFetcher`] serves canned bodies and status codes.

use crate::types::{BlogPost, DocStatus, LoadReport, Product, SiteConfig, SiteData};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Path of the site configuration document, relative to the site root.
pub const SITE_CONFIG_PATH: &str = "config/site-config.json";

/// Path of the product catalog document, relative to the site root.
pub const PRODUCTS_PATH: &str = "config/products.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Source of raw document bytes, addressed by site-relative path.
pub trait Fetch: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}

/// Reads documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetch for DirFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let full = self.root.join(path.trim_start_matches('/'));
        std::fs::read(&full).map_err(|source| LoadError::Io {
            path: full.display().to_string(),
            source,
        })
    }
}

/// GETs documents relative to a base URL.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Build a fetcher with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("affiliate-site/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.url_for(path);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Serves canned documents. Paths without an entry are [`LoadError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Result<Vec<u8>, u16>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub fn with_document(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(path.to_string(), Ok(body.into()));
        self
    }

    /// Answer `path` with a non-success HTTP status.
    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.documents.insert(path.to_string(), Err(status));
        self
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match self.documents.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(LoadError::Status {
                status: *status,
                url: path.to_string(),
            }),
            None => Err(LoadError::NotFound(path.to_string())),
        }
    }
}

/// Parsed product document.
#[derive(Debug, Default)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
    pub posts: Vec<BlogPost>,
    /// Product records dropped because they failed to deserialize.
    pub skipped: usize,
    /// `false` when the `products` key was absent or not an array.
    pub has_products: bool,
}

/// Fetch and parse both documents, falling back per document on failure.
pub fn load_site_data(fetcher: &dyn Fetch) -> SiteData {
    let (config_result, catalog_result) = rayon::join(
        || fetcher.fetch(SITE_CONFIG_PATH),
        || fetcher.fetch(PRODUCTS_PATH),
    );

    let mut report = LoadReport::default();

    let config = match config_result.and_then(|bytes| parse_site_config(&bytes)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = SITE_CONFIG_PATH, error = %e, "using default site configuration");
            report.config = DocStatus::Fallback(e.to_string());
            SiteConfig::default()
        }
    };

    let document = match catalog_result.and_then(|bytes| parse_catalog(&bytes)) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(path = PRODUCTS_PATH, error = %e, "using empty catalog");
            report.catalog = DocStatus::Fallback(e.to_string());
            CatalogDocument::default()
        }
    };
    if report.catalog.is_loaded() && !document.has_products {
        tracing::warn!(path = PRODUCTS_PATH, "document has no `products` array, using empty catalog");
        report.catalog = DocStatus::Fallback("missing `products` array".to_string());
    }
    report.skipped_products = document.skipped;

    tracing::debug!(
        products = document.products.len(),
        posts = document.posts.len(),
        "site data loaded"
    );

    SiteData {
        config,
        catalog: document.products,
        posts: document.posts,
        report,
    }
}

/// Parse `site-config.json`. A key set to `null` takes its default value.
pub fn parse_site_config(bytes: &[u8]) -> Result<SiteConfig, LoadError> {
    let mut value: serde_json::Value = serde_json::from_slice(bytes)?;
    drop_nulls(&mut value);
    Ok(serde_json::from_value(value)?)
}

/// Remove `null` object members, recursively, so they read as absent keys.
fn drop_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Parse `products.json`.
///
/// The document must be a JSON object. Inside it, a missing or non-array
/// `products` is an empty catalog, and records that fail to deserialize are
/// skipped one by one so a single bad entry does not cost the whole catalog.
/// A `null` field inside a record is treated as missing.
pub fn parse_catalog(bytes: &[u8]) -> Result<CatalogDocument, LoadError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Object(mut root) = value else {
        return Err(LoadError::InvalidDocument(
            "product document must be a JSON object".to_string(),
        ));
    };

    let mut document = CatalogDocument::default();

    if let Some(serde_json::Value::Array(items)) = root.remove("products") {
        document.has_products = true;
        for (index, mut item) in items.into_iter().enumerate() {
            drop_nulls(&mut item);
            match serde_json::from_value::<Product>(item) {
                Ok(product) => document.products.push(product),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed product record");
                    document.skipped += 1;
                }
            }
        }
    }

    if let Some(serde_json::Value::Array(items)) = root.remove("posts") {
        document.posts = items
            .into_iter()
            .filter_map(|mut item| {
                drop_nulls(&mut item);
                serde_json::from_value::<BlogPost>(item).ok()
            })
            .collect();
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG_JSON: &str = r#"{
        "siteTitle": "Gear Lab",
        "siteUrl": "https://gearlab.example",
        "amazonAffiliateId": "gearlab-20"
    }"#;

    const PRODUCTS_JSON: &str = r#"{
        "products": [
            {"id": "lamp", "name": "Desk Lamp", "category": "Lighting", "rating": 4.5},
            {"id": "fan", "name": "Tower Fan", "category": "Cooling", "rating": 3.9}
        ],
        "posts": [
            {"title": "Best lamps", "excerpt": "...", "url": "/blog/lamps.html", "image": "lamps.jpg"}
        ]
    }"#;

    fn fetcher(config: &str, products: &str) -> MemoryFetcher {
        MemoryFetcher::new()
            .with_document(SITE_CONFIG_PATH, config)
            .with_document(PRODUCTS_PATH, products)
    }

    #[test]
    fn loads_both_documents() {
        let data = load_site_data(&fetcher(CONFIG_JSON, PRODUCTS_JSON));
        assert_eq!(data.config.site_title, "Gear Lab");
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.catalog[0].id, "lamp");
        assert_eq!(data.posts.len(), 1);
        assert!(data.report.config.is_loaded());
        assert!(data.report.catalog.is_loaded());
    }

    #[test]
    fn config_server_error_falls_back_to_defaults() {
        let fetcher = MemoryFetcher::new()
            .with_status(SITE_CONFIG_PATH, 500)
            .with_document(PRODUCTS_PATH, PRODUCTS_JSON);
        let data = load_site_data(&fetcher);

        assert_eq!(data.config, SiteConfig::default());
        assert_eq!(data.config.site_title, "Product Reviews");
        assert!(!data.report.config.is_loaded());
        // The catalog is unaffected by the config failure
        assert_eq!(data.catalog.len(), 2);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let data = load_site_data(&fetcher("{not json", PRODUCTS_JSON));
        assert_eq!(data.config, SiteConfig::default());
        assert!(matches!(data.report.config, DocStatus::Fallback(_)));
    }

    #[test]
    fn missing_products_document_yields_empty_catalog() {
        let fetcher = MemoryFetcher::new().with_document(SITE_CONFIG_PATH, CONFIG_JSON);
        let data = load_site_data(&fetcher);
        assert!(data.catalog.is_empty());
        assert!(!data.report.catalog.is_loaded());
        assert_eq!(data.config.site_title, "Gear Lab");
    }

    #[test]
    fn empty_products_array_is_loaded_and_empty() {
        let data = load_site_data(&fetcher(CONFIG_JSON, r#"{"products": []}"#));
        assert!(data.catalog.is_empty());
        assert!(data.report.catalog.is_loaded());
    }

    #[test]
    fn absent_or_non_array_products_is_empty_catalog() {
        for body in [r#"{}"#, r#"{"products": {"id": "x"}}"#, r#"{"products": null}"#] {
            let data = load_site_data(&fetcher(CONFIG_JSON, body));
            assert!(data.catalog.is_empty(), "body {body}");
            assert!(!data.report.catalog.is_loaded(), "body {body}");
        }
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            parse_catalog(b"[1, 2, 3]"),
            Err(LoadError::InvalidDocument(_))
        ));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let body = r#"{"products": [
            {"id": "ok-1"},
            {"name": "no id"},
            {"id": "bad-rating", "rating": "five"},
            {"id": "ok-2"}
        ]}"#;
        let document = parse_catalog(body.as_bytes()).unwrap();
        let ids: Vec<_> = document.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok-1", "ok-2"]);
        assert_eq!(document.skipped, 2);
    }

    #[test]
    fn null_fields_degrade_to_defaults() {
        let body = r#"{"products": [
            {"id": "lamp", "name": "Desk Lamp", "images": null, "faqs": null,
             "keywords": null, "rating": null, "price": null,
             "pros": ["Bright"], "cons": ["Heavy"]},
            {"id": null, "name": "Still needs an id"},
            {"id": "fan", "faqs": [{"question": "Loud?", "answer": null}]}
        ]}"#;
        let document = parse_catalog(body.as_bytes()).unwrap();
        assert_eq!(document.skipped, 1);
        let ids: Vec<_> = document.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["lamp", "fan"]);

        let lamp = &document.products[0];
        assert_eq!(lamp.name, "Desk Lamp");
        assert!(lamp.images.is_empty());
        assert!(lamp.faqs.is_empty());
        assert_eq!(lamp.rating, 0.0);
        assert_eq!(lamp.pros, vec!["Bright"]);

        let fan = &document.products[1];
        assert_eq!(fan.faqs[0].question, "Loud?");
        assert_eq!(fan.faqs[0].answer, "");
    }

    #[test]
    fn null_config_keys_take_default_values() {
        let config = parse_site_config(
            br#"{"siteTitle": "Gear Lab", "siteUrl": null, "authorName": null,
                 "analytics": null, "socialMedia": null}"#,
        )
        .unwrap();
        assert_eq!(config.site_title, "Gear Lab");
        assert_eq!(config.site_url, "");
        assert_eq!(config.author_name, "Product Reviewer");
        assert_eq!(config.analytics, None);
        assert!(config.social_media.is_empty());
    }

    #[test]
    fn dir_fetcher_reads_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(tmp.path().join(SITE_CONFIG_PATH), CONFIG_JSON).unwrap();
        std::fs::write(tmp.path().join(PRODUCTS_PATH), PRODUCTS_JSON).unwrap();

        let data = load_site_data(&DirFetcher::new(tmp.path()));
        assert_eq!(data.config.amazon_affiliate_id, "gearlab-20");
        assert_eq!(data.catalog.len(), 2);
    }

    #[test]
    fn dir_fetcher_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = DirFetcher::new(tmp.path()).fetch(PRODUCTS_PATH).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn memory_fetcher_reports_status() {
        let fetcher = MemoryFetcher::new().with_status("a.json", 503);
        assert!(matches!(
            fetcher.fetch("a.json"),
            Err(LoadError::Status { status: 503, .. })
        ));
        assert!(matches!(fetcher.fetch("b.json"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn http_fetcher_joins_paths() {
        let fetcher = HttpFetcher::new("https://gearlab.example/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            fetcher.url_for("/config/products.json"),
            "https://gearlab.example/config/products.json"
        );
    }
}
