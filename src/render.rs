//! Catalog rendering.
//!
//! Every function here is pure: it takes catalog data and returns a maud
//! [`Markup`] fragment. Nothing registers event handlers or knows which page
//! a fragment ends up on; the page controller decides where fragments are
//! mounted.
//!
//! ## Fragments
//!
//! | Function | Used for |
//! |----------|----------|
//! | [`product_card`] / [`product_grid`] | featured, listing and related grids |
//! | [`category_list`] | one card per distinct category |
//! | [`related_list`] | same-category products on a product page |
//! | [`post_cards`] | blog teasers on the home page |
//! | [`gallery`], [`faq_section`], [`bullet_list`], [`cta_button`] | product page body |
//! | [`breadcrumbs`] | product page trail with `BreadcrumbList` microdata |
//! | [`category_filters`] | listing filter buttons |
//! | [`social_links`] | header/footer profile links |
//!
//! Interpolated text is escaped by maud, so product data can never inject
//! markup.
//!
//! ## Star ratings
//!
//! Ratings render as `floor(r)` stars plus one more when the fractional part
//! is at least one half. A 3.5 shows four stars, a 3.49 shows three.

use crate::catalog::{self, CategoryFilter};
use crate::links;
use crate::types::{BlogPost, Faq, Product, SiteConfig};
use maud::{Markup, html};

const STAR: char = '⭐';

/// Star symbols for a rating. Out-of-range ratings are clamped to `[0, 5]`.
pub fn star_rating(rating: f64) -> String {
    let rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    };
    let full = rating.floor();
    let mut count = full as usize;
    if rating - full >= 0.5 {
        count += 1;
    }
    std::iter::repeat_n(STAR, count).collect()
}

/// Numeric rating as shown next to the stars, e.g. `4.5/5`.
pub fn rating_text(rating: f64) -> String {
    format!("{}/5", rating)
}

/// A single product card linking to the product page and the affiliate offer.
///
/// Products without images show `placeholder`. The buy button is omitted when
/// the product has no outbound URL, since the tag alone is not a link.
pub fn product_card(product: &Product, config: &SiteConfig, placeholder: &str) -> Markup {
    let page = links::product_page_path(&product.id);
    let image = links::product_image_path(links::primary_image(product, placeholder));
    let rating = product.clamped_rating();

    html! {
        div.product-card
            data-category=(product.category)
            data-product-id=(product.id)
            data-search=(catalog::search_text(product)) {
            a.card-link href=(page) {
                img.product-image src=(image) alt=(product.name) loading="lazy";
            }
            div.product-content {
                h3.product-title {
                    a href=(page) { (product.name) }
                }
                div.product-rating {
                    span.stars aria-label={ "Rated " (rating_text(rating)) } { (star_rating(rating)) }
                    " "
                    span.rating-value { (rating_text(rating)) }
                }
                @if !product.price.is_empty() {
                    div.product-price { (product.price) }
                }
                @if !product.amazon_url.is_empty() {
                    a.buy-button
                        href=(links::product_affiliate_url(product, config))
                        target="_blank"
                        rel="noopener noreferrer sponsored" {
                        "View on Amazon"
                    }
                }
            }
        }
    }
}

/// Cards for `products`, in the order given.
pub fn product_grid<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    config: &SiteConfig,
    placeholder: &str,
) -> Markup {
    html! {
        @for product in products {
            (product_card(product, config, placeholder))
        }
    }
}

/// One card per distinct category, in order of first appearance.
pub fn category_list(catalog: &[Product]) -> Markup {
    html! {
        @for category in catalog::categories(catalog) {
            div.category-card data-category=(category) {
                h3.category-title { (category) }
                a.category-link href=(links::category_path(category)) { "View Products" }
            }
        }
    }
}

/// Cards for products related to `product` (same category, itself excluded).
pub fn related_list(
    catalog: &[Product],
    product: &Product,
    limit: usize,
    config: &SiteConfig,
    placeholder: &str,
) -> Markup {
    product_grid(catalog::related(catalog, product, limit), config, placeholder)
}

/// Blog teaser cards.
pub fn post_cards(posts: &[BlogPost]) -> Markup {
    html! {
        @for post in posts {
            div.post-card {
                @if !post.image.is_empty() {
                    img.post-image src=(links::blog_image_path(&post.image)) alt=(post.title) loading="lazy";
                }
                div.post-content {
                    h3.post-title { (post.title) }
                    p.post-excerpt { (post.excerpt) }
                    a.read-more href=(post.url) { "Read More" }
                }
            }
        }
    }
}

/// Every product image. The first loads eagerly, the rest lazily.
pub fn gallery(product: &Product, placeholder: &str) -> Markup {
    let alt = format!("Image of {}", product.name);
    let placeholder_only = [placeholder.to_string()];
    let images: &[String] = if product.images.is_empty() {
        &placeholder_only
    } else {
        &product.images
    };

    html! {
        @for (idx, image) in images.iter().enumerate() {
            img.gallery-image
                src=(links::product_image_path(image))
                alt=(alt)
                loading=(if idx == 0 { "eager" } else { "lazy" });
        }
    }
}

/// The FAQ block. Empty when there are no FAQs.
pub fn faq_section(faqs: &[Faq]) -> Markup {
    html! {
        @if !faqs.is_empty() {
            h2 { "Frequently Asked Questions" }
            @for faq in faqs {
                div.faq-item {
                    h4.faq-question { (faq.question) }
                    p.faq-answer { (faq.answer) }
                }
            }
        }
    }
}

/// `<li>` items for a pros or cons list.
pub fn bullet_list(items: &[String]) -> Markup {
    html! {
        @for item in items {
            li { (item) }
        }
    }
}

/// The main call-to-action on a product page.
pub fn cta_button(product: &Product, config: &SiteConfig) -> Markup {
    html! {
        @if !product.amazon_url.is_empty() {
            a.cta-button
                href=(links::product_affiliate_url(product, config))
                target="_blank"
                rel="noopener noreferrer sponsored" {
                "Check Price on Amazon"
            }
        }
    }
}

/// Home › Products › name, with schema.org `BreadcrumbList` microdata.
pub fn breadcrumbs(product: &Product) -> Markup {
    html! {
        ol itemscope itemtype="https://schema.org/BreadcrumbList" {
            li itemprop="itemListElement" itemscope itemtype="https://schema.org/ListItem" {
                a itemprop="item" href="/" { span itemprop="name" { "Home" } }
                meta itemprop="position" content="1";
            }
            li itemprop="itemListElement" itemscope itemtype="https://schema.org/ListItem" {
                a itemprop="item" href="/products/" { span itemprop="name" { "Products" } }
                meta itemprop="position" content="2";
            }
            li itemprop="itemListElement" itemscope itemtype="https://schema.org/ListItem" {
                span itemprop="name" { (product.name) }
                meta itemprop="position" content="3";
            }
        }
    }
}

/// Filter buttons for the product listing: "All" then each category.
pub fn category_filters(catalog: &[Product]) -> Markup {
    html! {
        button.filter-btn.active type="button" data-category=(CategoryFilter::All.as_param()) { "All" }
        @for category in catalog::categories(catalog) {
            button.filter-btn type="button" data-category=(category) { (category) }
        }
    }
}

/// Icon shown for a social platform.
pub fn social_icon(platform: &str) -> &'static str {
    match platform.to_ascii_lowercase().as_str() {
        "facebook" => "📘",
        "instagram" => "📷",
        "twitter" | "x" => "🐦",
        "youtube" => "📺",
        "linkedin" => "💼",
        _ => "🔗",
    }
}

/// Profile links for every platform with a non-empty URL.
pub fn social_links(config: &SiteConfig) -> Markup {
    html! {
        @for (platform, url) in &config.social_media {
            @if !url.trim().is_empty() {
                a.social-link
                    href=(url)
                    target="_blank"
                    rel="noopener noreferrer"
                    aria-label={ "Follow us on " (platform) } {
                    (social_icon(platform))
                }
            }
        }
    }
}
