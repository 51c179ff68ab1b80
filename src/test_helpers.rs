//! Shared fixtures for the unit test suite.
//!
//! Builders produce fully-populated records so each test only spells out the
//! fields it actually cares about:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut p = product("desk-lamp", "Lighting");
//! p.faqs.clear();
//! let catalog = catalog(&[("a", "Audio"), ("b", "Video")]);
//! ```

use crate::types::{BlogPost, Faq, Product, SiteConfig, SiteData};
use std::collections::BTreeMap;

/// A site config with every field set and a real-looking origin.
pub fn site_config() -> SiteConfig {
    let mut social_media = BTreeMap::new();
    social_media.insert(
        "twitter".to_string(),
        "https://twitter.com/gearlab".to_string(),
    );
    SiteConfig {
        site_title: "Gear Lab".to_string(),
        site_description: "Hands-on gear reviews".to_string(),
        site_url: "https://gearlab.example".to_string(),
        author_name: "Sam Tester".to_string(),
        amazon_affiliate_id: "gearlab-20".to_string(),
        social_media,
        analytics: None,
        contact_email: "hello@gearlab.example".to_string(),
    }
}

/// A complete product in `category`, named after its id.
pub fn product(id: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: format!("Long description of {id}."),
        summary: format!("Short summary of {id}."),
        price: "$49.99".to_string(),
        rating: 4.5,
        category: category.to_string(),
        images: vec![format!("{id}-1.jpg"), format!("{id}-2.jpg")],
        amazon_url: format!("https://www.amazon.com/dp/{id}"),
        keywords: vec![format!("{id} review"), category.to_lowercase()],
        pros: vec!["Sturdy".to_string(), "Quiet".to_string()],
        cons: vec!["Pricey".to_string()],
        faqs: vec![Faq {
            question: format!("Is {id} worth it?"),
            answer: "Yes, for most people.".to_string(),
        }],
    }
}

/// A catalog built from `(id, category)` pairs, in order.
pub fn catalog(entries: &[(&str, &str)]) -> Vec<Product> {
    entries
        .iter()
        .map(|(id, category)| product(id, category))
        .collect()
}

pub fn blog_post(slug: &str) -> BlogPost {
    BlogPost {
        title: format!("Post {slug}"),
        excerpt: format!("Excerpt for {slug}..."),
        url: format!("/blog/{slug}.html"),
        image: format!("{slug}.jpg"),
        author: None,
        date: None,
    }
}

/// Site data that loaded cleanly from the given catalog.
pub fn site_data(catalog: Vec<Product>) -> SiteData {
    SiteData {
        config: site_config(),
        catalog,
        posts: vec![blog_post("budget-tech")],
        report: Default::default(),
    }
}
