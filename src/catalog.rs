//! Read-only queries over the product catalog.
//!
//! The catalog is small (tens to low hundreds of entries), so every query is a
//! linear scan that preserves catalog order. Nothing here sorts: document
//! order is the only order the site has.
//!
//! Product ids are expected to be unique but this is not checked. Lookups
//! return the first match, so a duplicate id is simply shadowed.

use crate::types::Product;

/// Find a product by id. First match wins.
pub fn find_product<'a>(catalog: &'a [Product], id: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.id == id)
}

/// Distinct non-empty categories in order of first appearance.
pub fn categories(catalog: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in catalog {
        let category = product.category.as_str();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Other products in the same category as `product`, up to `limit`.
///
/// The product itself is excluded by id, so a duplicate-id record is excluded
/// along with it.
pub fn related<'a>(catalog: &'a [Product], product: &Product, limit: usize) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .collect()
}

/// The featured slice: the first `limit` products.
pub fn featured(catalog: &[Product], limit: usize) -> &[Product] {
    &catalog[..limit.min(catalog.len())]
}

/// Case-insensitive search over name, description and keywords.
///
/// Returns `None` when the trimmed query is shorter than `min_len` characters,
/// meaning "no search is active" rather than "nothing matched".
pub fn search<'a>(catalog: &'a [Product], query: &str, min_len: usize) -> Option<Vec<&'a Product>> {
    let query = query.trim();
    if query.chars().count() < min_len {
        return None;
    }
    let needle = query.to_lowercase();
    Some(
        catalog
            .iter()
            .filter(|p| matches_query(p, &needle))
            .collect(),
    )
}

fn matches_query(product: &Product, needle: &str) -> bool {
    search_text(product).contains(needle)
}

/// Lowercased name, description and keywords, one per line.
///
/// Cards carry this as `data-search` so the listing script matches the same
/// fields as [`search`].
pub fn search_text(product: &Product) -> String {
    let mut fields = vec![product.name.as_str(), product.description.as_str()];
    fields.extend(product.keywords.iter().map(String::as_str));
    fields.join("\n").to_lowercase()
}

/// Category selection on the product listing.
///
/// "Everything" is the empty parameter, so a real category may be called
/// `all` without colliding with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a filter button value or `?category=` parameter. Only the empty
    /// string selects everything.
    pub fn from_param(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &product.category == category,
        }
    }

    /// Value used in `data-category` attributes and filter buttons.
    pub fn as_param(&self) -> &str {
        match self {
            CategoryFilter::All => "",
            CategoryFilter::Only(category) => category,
        }
    }
}
