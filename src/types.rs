//! Shared types read from the two site documents.
//!
//! `site-config.json` deserializes into [`SiteConfig`]; `products.json` holds
//! the catalog ([`Product`]) and optional blog teasers ([`BlogPost`]). Both
//! documents use camelCase keys. Everything here is read-only after load.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Site-wide settings from `config/site-config.json`.
///
/// Unknown keys are ignored and missing keys fall back to the value in
/// [`SiteConfig::default`], which is also the record used when the document
/// cannot be loaded at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_title: String,
    pub site_description: String,
    /// Absolute origin used for canonical and structured-data URLs, no
    /// trailing slash (one is stripped if present, see [`SiteConfig::base_url`]).
    pub site_url: String,
    pub author_name: String,
    pub amazon_affiliate_id: String,
    /// Platform name → profile URL. Empty URLs are skipped when rendering.
    pub social_media: BTreeMap<String, String>,
    /// Google Analytics measurement id. `None` skips analytics injection.
    pub analytics: Option<String>,
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Product Reviews".to_string(),
            site_description: "Honest product reviews and recommendations".to_string(),
            site_url: String::new(),
            author_name: "Product Reviewer".to_string(),
            amazon_affiliate_id: "your-affiliate-id".to_string(),
            social_media: BTreeMap::new(),
            analytics: None,
            contact_email: "contact@example.com".to_string(),
        }
    }
}

impl SiteConfig {
    /// `site_url` without a trailing slash, so paths can be appended directly.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Analytics id, treating an empty string the same as an absent key.
    pub fn analytics_id(&self) -> Option<&str> {
        self.analytics.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// One frequently-asked question attached to a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A reviewed product. `id` doubles as the URL slug (`/products/<id>.html`).
///
/// Only `id` is required; every other field degrades to empty so a sparse
/// record still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    /// Display price, kept textual. JSON numbers are accepted and stringified.
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    /// Score out of 5. Not validated at load; renderers clamp.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    /// Image filenames under the product image directory, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amazon_url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl Product {
    /// Rating clamped into `[0, 5]`; NaN counts as 0.
    pub fn clamped_rating(&self) -> f64 {
        if self.rating.is_nan() {
            0.0
        } else {
            self.rating.clamp(0.0, 5.0)
        }
    }
}

/// A blog teaser shown in the "recent posts" section of the home page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    /// Link target, usually `/blog/<slug>.html`.
    pub url: String,
    /// Image filename under `/assets/images/blog/`.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISO-8601 publication date, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// How one of the two documents was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum DocStatus {
    Loaded,
    /// The document could not be used; the reason is kept for diagnostics.
    Fallback(String),
}

impl DocStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DocStatus::Loaded)
    }
}

/// Per-document outcome of a load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub config: DocStatus,
    pub catalog: DocStatus,
    /// Product records dropped because they failed to deserialize.
    pub skipped_products: usize,
}

impl Default for LoadReport {
    fn default() -> Self {
        Self {
            config: DocStatus::Loaded,
            catalog: DocStatus::Loaded,
            skipped_products: 0,
        }
    }
}

/// Everything a build renders from: configuration, catalog and posts.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub config: SiteConfig,
    pub catalog: Vec<Product>,
    pub posts: Vec<BlogPost>,
    pub report: LoadReport,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
