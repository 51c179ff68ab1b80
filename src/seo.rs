//! SEO metadata: head tags and schema.org structured data.
//!
//! Instead of mutating a live document, the injectors here update a [`Head`]
//! model that the document adapter renders later. The model is keyed:
//!
//! - meta tags by logical name (`description`, `og:title`, `twitter:card`, …)
//! - links by `rel`
//! - scripts by id
//! - JSON-LD documents by their `@type`
//!
//! [`Head::upsert`] replaces a tag with the same key in place, or appends it.
//! Because of that every injector is re-entrant: applying product SEO twice
//! leaves exactly one `og:title`, holding the latest value.
//!
//! The HTML attribute of a meta tag is derived from its name ([`meta_attribute`]):
//! OpenGraph names use `property`, everything else uses `name`. A tag therefore
//! cannot end up duplicated under both attributes.
//!
//! ## Product pages
//!
//! ```text
//! <title>       <name> Review | <siteTitle>
//! description   In-depth review of the <name>. … <summary excerpt>
//! keywords      comma-joined keywords
//! canonical     <siteUrl>/products/<id>.html
//! og:*          title, description, image, url, type=article
//! twitter:*     card=summary_large_image, title, description, image
//! JSON-LD       Product (always), FAQPage (only with FAQs)
//! ```

use crate::config::RenderConfig;
use crate::links;
use crate::types::{BlogPost, Product, SiteConfig};
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

/// Id of the external analytics loader script.
const ANALYTICS_SCRIPT_ID: &str = "analytics";

/// Id of the inline analytics bootstrap.
const ANALYTICS_INIT_ID: &str = "analytics-init";

/// A single element inside `<head>`.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadTag {
    Meta { name: String, content: String },
    Link { rel: String, href: String },
    Script { id: String, src: String, is_async: bool },
    InlineScript { id: String, body: String },
    JsonLd(Value),
}

/// Identity of a [`HeadTag`]; at most one tag per key lives in a [`Head`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKey {
    Meta(String),
    Link(String),
    Script(String),
    JsonLd(String),
}

impl HeadTag {
    pub fn meta(name: &str, content: impl Into<String>) -> Self {
        HeadTag::Meta {
            name: name.to_string(),
            content: content.into(),
        }
    }

    pub fn link(rel: &str, href: impl Into<String>) -> Self {
        HeadTag::Link {
            rel: rel.to_string(),
            href: href.into(),
        }
    }

    pub fn key(&self) -> TagKey {
        match self {
            HeadTag::Meta { name, .. } => TagKey::Meta(name.clone()),
            HeadTag::Link { rel, .. } => TagKey::Link(rel.clone()),
            HeadTag::Script { id, .. } | HeadTag::InlineScript { id, .. } => {
                TagKey::Script(id.clone())
            }
            HeadTag::JsonLd(value) => TagKey::JsonLd(schema_type(value).to_string()),
        }
    }
}

fn schema_type(value: &Value) -> &str {
    value.get("@type").and_then(Value::as_str).unwrap_or("Thing")
}

/// HTML attribute that carries a meta tag's name.
pub fn meta_attribute(name: &str) -> &'static str {
    if name.starts_with("og:") || name.starts_with("article:") {
        "property"
    } else {
        "name"
    }
}

/// In-memory `<head>`: a title plus keyed tags in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Head {
    title: String,
    tags: Vec<HeadTag>,
}

impl Head {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn tags(&self) -> &[HeadTag] {
        &self.tags
    }

    /// Replace the tag with the same key in place, or append it.
    pub fn upsert(&mut self, tag: HeadTag) {
        let key = tag.key();
        match self.tags.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = tag,
            None => self.tags.push(tag),
        }
    }

    pub fn remove(&mut self, key: &TagKey) -> Option<HeadTag> {
        let idx = self.tags.iter().position(|tag| &tag.key() == key)?;
        Some(self.tags.remove(idx))
    }

    pub fn get(&self, key: &TagKey) -> Option<&HeadTag> {
        self.tags.iter().find(|tag| &tag.key() == key)
    }

    /// Content of the meta tag with this name.
    pub fn meta_content(&self, name: &str) -> Option<&str> {
        match self.get(&TagKey::Meta(name.to_string())) {
            Some(HeadTag::Meta { content, .. }) => Some(content),
            _ => None,
        }
    }

    pub fn link_href(&self, rel: &str) -> Option<&str> {
        match self.get(&TagKey::Link(rel.to_string())) {
            Some(HeadTag::Link { href, .. }) => Some(href),
            _ => None,
        }
    }

    /// The JSON-LD document of the given `@type`.
    pub fn schema(&self, schema_type: &str) -> Option<&Value> {
        match self.get(&TagKey::JsonLd(schema_type.to_string())) {
            Some(HeadTag::JsonLd(value)) => Some(value),
            _ => None,
        }
    }

    /// Render the title and tags. The document adapter adds charset,
    /// viewport and styles around this.
    pub fn render(&self) -> Markup {
        html! {
            title { (self.title) }
            @for tag in &self.tags {
                (render_tag(tag))
            }
        }
    }
}

fn render_tag(tag: &HeadTag) -> Markup {
    match tag {
        HeadTag::Meta { name, content } => html! {
            @if meta_attribute(name) == "property" {
                meta property=(name) content=(content);
            } @else {
                meta name=(name) content=(content);
            }
        },
        HeadTag::Link { rel, href } => html! {
            link rel=(rel) href=(href);
        },
        HeadTag::Script { id, src, is_async } => html! {
            script id=(id) src=(src) async[*is_async] {}
        },
        HeadTag::InlineScript { id, body } => html! {
            script id=(id) { (PreEscaped(escape_script(body))) }
        },
        HeadTag::JsonLd(value) => {
            let json = serde_json::to_string_pretty(value).unwrap_or_default();
            html! {
                script type="application/ld+json" { (PreEscaped(escape_script(&json))) }
            }
        }
    }
}

/// Keep script bodies from closing their own `<script>` element.
fn escape_script(body: &str) -> String {
    body.replace("</", "<\\/")
}

// =============================================================================
// Text helpers
// =============================================================================

/// First `max_chars` characters of `text`, with `...` when truncated.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// `<name> Review | <siteTitle>`
pub fn product_title(product: &Product, site: &SiteConfig) -> String {
    format!("{} Review | {}", product.name, site.site_title)
}

/// The fixed review template followed by an excerpt of the summary.
pub fn meta_description(product: &Product, excerpt_chars: usize) -> String {
    let lead = format!(
        "In-depth review of the {}. Discover its features, pros, cons, and see if it's the right choice for you.",
        product.name
    );
    let summary = excerpt(&product.summary, excerpt_chars);
    if summary.is_empty() {
        lead
    } else {
        format!("{} {}", lead, summary)
    }
}

/// `<siteTitle> - <siteDescription>`, or just the title without a description.
pub fn home_title(site: &SiteConfig) -> String {
    if site.site_description.is_empty() {
        site.site_title.clone()
    } else {
        format!("{} - {}", site.site_title, site.site_description)
    }
}

// =============================================================================
// Structured data
// =============================================================================

/// schema.org `Product` with nested review, rating and offer.
pub fn product_schema(product: &Product, site: &SiteConfig, render: &RenderConfig) -> Value {
    let images: Vec<String> = if product.images.is_empty() {
        vec![links::absolute_image_url(site, &render.placeholder_image)]
    } else {
        product
            .images
            .iter()
            .map(|image| links::absolute_image_url(site, image))
            .collect()
    };
    let rating = product.clamped_rating();

    json!({
        "@context": "https://schema.org/",
        "@type": "Product",
        "name": product.name,
        "image": images,
        "description": product.description,
        "sku": product.id,
        "review": {
            "@type": "Review",
            "reviewRating": {
                "@type": "Rating",
                "ratingValue": rating,
                "bestRating": "5"
            },
            "author": { "@type": "Person", "name": site.author_name }
        },
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": rating,
            "reviewCount": "1"
        },
        "offers": {
            "@type": "Offer",
            "url": links::product_affiliate_url(product, site),
            "priceCurrency": "USD",
            "price": product.price,
            "availability": "https://schema.org/InStock"
        }
    })
}

/// schema.org `FAQPage`, or `None` when the product has no FAQs.
pub fn faq_schema(product: &Product) -> Option<Value> {
    if product.faqs.is_empty() {
        return None;
    }
    let questions: Vec<Value> = product
        .faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer }
            })
        })
        .collect();

    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions
    }))
}

/// schema.org `WebSite` with a sitelinks search action.
pub fn website_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.site_title,
        "url": links::home_url(site),
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/products/?q={{search_term_string}}", site.base_url())
            },
            "query-input": "required name=search_term_string"
        }
    })
}

/// schema.org `Article` for a blog post.
pub fn article_schema(post: &BlogPost, site: &SiteConfig) -> Value {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": post.title,
        "description": post.excerpt,
        "author": {
            "@type": "Person",
            "name": post.author.as_deref().unwrap_or(&site.author_name)
        },
        "publisher": { "@type": "Organization", "name": site.site_title }
    });
    if !post.image.is_empty() {
        schema["image"] = json!(format!(
            "{}{}",
            site.base_url(),
            links::blog_image_path(&post.image)
        ));
    }
    if let Some(date) = &post.date {
        schema["datePublished"] = json!(date);
        schema["dateModified"] = json!(date);
    }
    schema
}

// =============================================================================
// Injectors
// =============================================================================

/// Apply everything a product page needs to `head`.
pub fn apply_product_seo(head: &mut Head, product: &Product, site: &SiteConfig, render: &RenderConfig) {
    let title = product_title(product, site);
    let description = meta_description(product, render.summary_excerpt_chars);
    let canonical = links::canonical_url(site, &product.id);
    let image = links::absolute_image_url(
        site,
        links::primary_image(product, &render.placeholder_image),
    );

    head.set_title(title.clone());

    head.upsert(HeadTag::meta("description", description.clone()));
    if product.keywords.is_empty() {
        head.remove(&TagKey::Meta("keywords".to_string()));
    } else {
        head.upsert(HeadTag::meta("keywords", product.keywords.join(", ")));
    }
    head.upsert(HeadTag::link("canonical", canonical.clone()));

    head.upsert(HeadTag::meta("og:title", title.clone()));
    head.upsert(HeadTag::meta("og:description", description.clone()));
    head.upsert(HeadTag::meta("og:image", image.clone()));
    head.upsert(HeadTag::meta("og:url", canonical));
    head.upsert(HeadTag::meta("og:type", "article"));

    head.upsert(HeadTag::meta("twitter:card", "summary_large_image"));
    head.upsert(HeadTag::meta("twitter:title", title));
    head.upsert(HeadTag::meta("twitter:description", description));
    head.upsert(HeadTag::meta("twitter:image", image));

    head.upsert(HeadTag::JsonLd(product_schema(product, site, render)));
    match faq_schema(product) {
        Some(schema) => head.upsert(HeadTag::JsonLd(schema)),
        None => {
            head.remove(&TagKey::JsonLd("FAQPage".to_string()));
        }
    }
}

/// Site-level SEO for the home page. No per-product tags.
pub fn apply_home_seo(head: &mut Head, site: &SiteConfig) {
    let title = home_title(site);
    head.set_title(title.clone());
    head.upsert(HeadTag::meta("description", site.site_description.clone()));
    head.upsert(HeadTag::link("canonical", links::home_url(site)));
    head.upsert(HeadTag::meta("og:title", title));
    head.upsert(HeadTag::meta("og:description", site.site_description.clone()));
    head.upsert(HeadTag::meta("og:url", links::home_url(site)));
    head.upsert(HeadTag::meta("og:type", "website"));
    head.upsert(HeadTag::JsonLd(website_schema(site)));
}

/// SEO for a blog post page.
pub fn apply_article_seo(head: &mut Head, post: &BlogPost, site: &SiteConfig) {
    let title = format!("{} | {}", post.title, site.site_title);
    let url = if post.url.starts_with('/') {
        format!("{}{}", site.base_url(), post.url)
    } else {
        post.url.clone()
    };

    head.set_title(title.clone());
    head.upsert(HeadTag::meta("description", post.excerpt.clone()));
    head.upsert(HeadTag::link("canonical", url.clone()));
    head.upsert(HeadTag::meta("og:title", title));
    head.upsert(HeadTag::meta("og:description", post.excerpt.clone()));
    head.upsert(HeadTag::meta("og:url", url));
    head.upsert(HeadTag::meta("og:type", "article"));
    head.upsert(HeadTag::JsonLd(article_schema(post, site)));
}

/// Google Analytics loader and bootstrap when an id is configured; removes
/// them otherwise.
pub fn apply_analytics(head: &mut Head, site: &SiteConfig) {
    let Some(id) = site.analytics_id() else {
        head.remove(&TagKey::Script(ANALYTICS_SCRIPT_ID.to_string()));
        head.remove(&TagKey::Script(ANALYTICS_INIT_ID.to_string()));
        return;
    };

    let js_id = serde_json::to_string(id).unwrap_or_default();
    head.upsert(HeadTag::Script {
        id: ANALYTICS_SCRIPT_ID.to_string(),
        src: format!(
            "https://www.googletagmanager.com/gtag/js?id={}",
            urlencoding::encode(id)
        ),
        is_async: true,
    });
    head.upsert(HeadTag::InlineScript {
        id: ANALYTICS_INIT_ID.to_string(),
        body: format!(
            "window.dataLayer = window.dataLayer || [];\nfunction gtag(){{dataLayer.push(arguments);}}\ngtag('js', new Date());\ngtag('config', {});",
            js_id
        ),
    });
}
