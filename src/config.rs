//! Build configuration.
//!
//! Controls how the generator fetches and renders, as opposed to
//! [`SiteConfig`](crate::types::SiteConfig), which is the site's own data
//! document. Loaded from an optional `site.toml` in the source directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [source]
//! timeout_secs = 10            # HTTP timeout per document fetch
//!
//! [render]
//! featured_limit = 8           # Cards in the home page featured slice
//! related_limit = 3            # Related products on a product page
//! placeholder_image = "placeholder.jpg"
//! summary_excerpt_chars = 120  # Summary characters in the meta description
//!
//! [search]
//! min_query_len = 3            # Shorter queries do not filter
//! debounce_ms = 300            # Quiet period before a query runs
//! ```
//!
//! ## Partial Configuration
//!
//! The file is sparse; override only what you need:
//!
//! ```toml
//! [render]
//! featured_limit = 6
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the source directory.
pub const CONFIG_FILENAME: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Document fetching.
    pub source: SourceConfig,
    /// Rendering limits and fallbacks.
    pub render: RenderConfig,
    /// Listing search behaviour.
    pub search: SearchConfig,
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be at least 1".into(),
            ));
        }
        if self.render.featured_limit == 0 {
            return Err(ConfigError::Validation(
                "render.featured_limit must be at least 1".into(),
            ));
        }
        if self.render.related_limit == 0 {
            return Err(ConfigError::Validation(
                "render.related_limit must be at least 1".into(),
            ));
        }
        if self.render.summary_excerpt_chars == 0 {
            return Err(ConfigError::Validation(
                "render.summary_excerpt_chars must be at least 1".into(),
            ));
        }
        if self.render.placeholder_image.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.placeholder_image must not be empty".into(),
            ));
        }
        if self.search.min_query_len == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Document fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Per-request timeout for the HTTP fetcher. Local reads ignore it.
    pub timeout_secs: u64,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Size of the featured slice on the home page.
    pub featured_limit: usize,
    /// Related products shown on a product page.
    pub related_limit: usize,
    /// Image filename used when a product has no images.
    pub placeholder_image: String,
    /// How much of `summary` goes into the meta description.
    pub summary_excerpt_chars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            featured_limit: 8,
            related_limit: 3,
            placeholder_image: "placeholder.jpg".to_string(),
            summary_excerpt_chars: 120,
        }
    }
}

/// Search-as-you-type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters, trimmed) do not filter.
    pub min_query_len: usize,
    /// Quiet period after the last keystroke before the query runs.
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            debounce_ms: 300,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the build config for a source directory: stock defaults overlaid by
/// `site.toml` when present.
pub fn load_config(dir: &Path) -> Result<BuildConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Affiliate Site Build Configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Site content (title, affiliate id, social links) is not configured here:
# it lives in config/site-config.json next to config/products.json.

# ---------------------------------------------------------------------------
# Document fetching
# ---------------------------------------------------------------------------
[source]
# Timeout in seconds for each document fetched with --url.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# Number of products in the home page featured section.
featured_limit = 8

# Number of related products listed on each product page.
related_limit = 3

# Image used for products that have no images. Resolved under
# /assets/images/products/.
placeholder_image = "placeholder.jpg"

# Characters of the product summary included in the meta description.
summary_excerpt_chars = 120

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Minimum query length (characters) before search filters the listing.
min_query_len = 3

# Quiet period in milliseconds after typing stops before a query runs.
debounce_ms = 300
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BuildConfig::default();
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.render.featured_limit, 8);
        assert_eq!(config.render.related_limit, 3);
        assert_eq!(config.render.placeholder_image, "placeholder.jpg");
        assert_eq!(config.search.min_query_len, 3);
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(BuildConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: BuildConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = BuildConfig::default();
        assert_eq!(parsed.render.featured_limit, defaults.render.featured_limit);
        assert_eq!(parsed.render.related_limit, defaults.render.related_limit);
        assert_eq!(parsed.source.timeout_secs, defaults.source.timeout_secs);
        assert_eq!(parsed.search.debounce_ms, defaults.search.debounce_ms);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.render.featured_limit, 8);
    }

    #[test]
    fn load_config_merges_partial_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[render]\nfeatured_limit = 6\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.render.featured_limit, 6);
        // Untouched keys in the same table keep their defaults
        assert_eq!(config.render.related_limit, 3);
        assert_eq!(config.search.min_query_len, 3);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[render\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("[render]\nfeatured = 6\n").unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let overlay: toml::Value = toml::from_str("[colors]\nlink = \"#000\"\n").unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = BuildConfig::default();
        config.render.related_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        let mut config = BuildConfig::default();
        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = BuildConfig::default();
        config.search.min_query_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_placeholder() {
        let mut config = BuildConfig::default();
        config.render.placeholder_image = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value = toml::from_str("[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 5\nz = 6").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(5));
        assert_eq!(merged["t"]["z"].as_integer(), Some(6));
    }
}
