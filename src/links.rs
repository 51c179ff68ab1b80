//! URL construction for every link the site emits.
//!
//! Site-relative paths (`/products/<id>.html`) are used inside pages; absolute
//! URLs (`<siteUrl>/...`) are used wherever a crawler reads them out of
//! context: canonical links, OpenGraph tags, structured data and the sitemap.
//!
//! ## Affiliate links
//!
//! Outbound links carry the operator's tag as a `tag` query parameter:
//!
//! ```text
//! https://www.amazon.com/dp/B0001           → https://www.amazon.com/dp/B0001?tag=site-20
//! https://www.amazon.com/dp/B0001?th=1      → https://www.amazon.com/dp/B0001?th=1&tag=site-20
//! https://www.amazon.com/dp/B0001?tag=old   → https://www.amazon.com/dp/B0001?tag=site-20
//! ```
//!
//! Any existing `tag` is replaced, so applying the tag twice yields the same URL.

use crate::types::{Product, SiteConfig};

/// Site-relative directory holding product images.
pub const PRODUCT_IMAGE_DIR: &str = "/assets/images/products";

/// Site-relative directory holding blog teaser images.
pub const BLOG_IMAGE_DIR: &str = "/assets/images/blog";

/// Append (or replace) the affiliate `tag` query parameter on `raw`.
pub fn affiliate_url(raw: &str, affiliate_id: &str) -> String {
    let (without_fragment, fragment) = match raw.split_once('#') {
        Some((url, fragment)) => (url, Some(fragment)),
        None => (raw, None),
    };
    let (base, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));

    let tag = format!("tag={}", urlencoding::encode(affiliate_id));
    let mut params: Vec<&str> = query
        .split('&')
        .filter(|param| !param.is_empty() && !is_tag_param(param))
        .collect();
    params.push(&tag);

    let mut url = format!("{}?{}", base, params.join("&"));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn is_tag_param(param: &str) -> bool {
    param == "tag" || param.starts_with("tag=")
}

/// Affiliate link for a product using the configured tag.
pub fn product_affiliate_url(product: &Product, config: &SiteConfig) -> String {
    affiliate_url(&product.amazon_url, &config.amazon_affiliate_id)
}

/// Site-relative product page path. The id is percent-encoded so a `?`,
/// `#` or space in it still points at the written file.
pub fn product_page_path(id: &str) -> String {
    format!("/products/{}.html", urlencoding::encode(id))
}

/// Absolute canonical URL of a product page.
pub fn canonical_url(config: &SiteConfig, id: &str) -> String {
    format!("{}{}", config.base_url(), product_page_path(id))
}

/// Absolute URL of the home page.
pub fn home_url(config: &SiteConfig) -> String {
    format!("{}/", config.base_url())
}

/// Absolute URL of the product listing page.
pub fn listing_url(config: &SiteConfig) -> String {
    format!("{}/products/", config.base_url())
}

/// Primary image filename, or the placeholder when the product has none.
pub fn primary_image<'a>(product: &'a Product, placeholder: &'a str) -> &'a str {
    product
        .images
        .first()
        .map(String::as_str)
        .unwrap_or(placeholder)
}

/// Site-relative path of a product image.
pub fn product_image_path(filename: &str) -> String {
    format!("{}/{}", PRODUCT_IMAGE_DIR, filename)
}

/// Absolute URL of a product image.
pub fn absolute_image_url(config: &SiteConfig, filename: &str) -> String {
    format!("{}{}", config.base_url(), product_image_path(filename))
}

/// Site-relative path of a blog teaser image.
pub fn blog_image_path(filename: &str) -> String {
    format!("{}/{}", BLOG_IMAGE_DIR, filename)
}

/// Listing link filtered to one category. The name is percent-encoded.
pub fn category_path(category: &str) -> String {
    format!("/products/?category={}", urlencoding::encode(category))
}
