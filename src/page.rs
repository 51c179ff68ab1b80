//! Page controller: builds the complete state of one page.
//!
//! A [`PageState`] is everything a page shows, held as data: the [`Head`]
//! model plus one rendered fragment per [`MountPoint`]. Building it touches
//! no files and no document; the [`document`](crate::document) adapter turns
//! it into HTML afterwards.
//!
//! ## Page types
//!
//! - **Home**: featured slice, categories, recent posts, site-level SEO.
//! - **Listing**: every product card and the category filter buttons.
//! - **Product**: product fields, gallery, FAQs, related products and product
//!   SEO. An unknown id gives a [`PageStatus::NotFound`] page that carries
//!   only the site-level title, never tags for a product that does not exist.
//! - **Post**: one blog teaser as a page of its own, with `Article` SEO.
//!
//! Every page also gets the site title, footer name, social links and
//! analytics.

use crate::catalog;
use crate::config::BuildConfig;
use crate::links;
use crate::render;
use crate::seo::{self, Head};
use crate::types::SiteData;
use maud::{Markup, html};
use std::collections::BTreeMap;

/// Text shown in place of a product that is not in the catalog.
pub const NOT_FOUND_TEXT: &str = "Product not found!";

pub const POST_NOT_FOUND_TEXT: &str = "Post not found!";

/// Named container in a page shell that a fragment is placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MountPoint {
    SiteTitle,
    FooterSiteName,
    SocialLinks,
    FeaturedProductsGrid,
    CategoriesGrid,
    RecentPostsGrid,
    ProductListingGrid,
    CategoryFilters,
    Breadcrumbs,
    ProductName,
    ProductRating,
    ProductPrice,
    ProductDescription,
    CtaButton,
    ProsList,
    ConsList,
    ProductGallery,
    FaqSection,
    RelatedProductsGrid,
    PostTitle,
    PostMeta,
    PostImage,
    PostExcerpt,
}

impl MountPoint {
    /// Element id of the container in the page shell.
    pub fn id(self) -> &'static str {
        match self {
            MountPoint::SiteTitle => "site-title",
            MountPoint::FooterSiteName => "footer-site-name",
            MountPoint::SocialLinks => "social-links",
            MountPoint::FeaturedProductsGrid => "featured-products-grid",
            MountPoint::CategoriesGrid => "categories-grid",
            MountPoint::RecentPostsGrid => "recent-posts-grid",
            MountPoint::ProductListingGrid => "product-listing-grid",
            MountPoint::CategoryFilters => "category-filters",
            MountPoint::Breadcrumbs => "breadcrumbs",
            MountPoint::ProductName => "product-name",
            MountPoint::ProductRating => "product-rating",
            MountPoint::ProductPrice => "product-price",
            MountPoint::ProductDescription => "product-description",
            MountPoint::CtaButton => "cta-button",
            MountPoint::ProsList => "pros-list",
            MountPoint::ConsList => "cons-list",
            MountPoint::ProductGallery => "product-gallery",
            MountPoint::FaqSection => "faq-section",
            MountPoint::RelatedProductsGrid => "related-products-grid",
            MountPoint::PostTitle => "post-title",
            MountPoint::PostMeta => "post-meta",
            MountPoint::PostImage => "post-image",
            MountPoint::PostExcerpt => "post-excerpt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Listing,
    Product(String),
    /// A blog post, keyed by its site-relative URL.
    Post(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ready,
    NotFound,
}

/// Everything one page displays.
#[derive(Debug, Clone)]
pub struct PageState {
    pub kind: PageKind,
    pub status: PageStatus,
    pub head: Head,
    sections: BTreeMap<MountPoint, Markup>,
}

impl PageState {
    fn new(kind: PageKind, head: Head) -> Self {
        Self {
            kind,
            status: PageStatus::Ready,
            head,
            sections: BTreeMap::new(),
        }
    }

    pub fn set_section(&mut self, mount: MountPoint, content: Markup) {
        self.sections.insert(mount, content);
    }

    pub fn section(&self, mount: MountPoint) -> Option<&Markup> {
        self.sections.get(&mount)
    }

    /// Rendered HTML of a section, mostly for assertions.
    pub fn section_html(&self, mount: MountPoint) -> Option<&str> {
        self.section(mount).map(|markup| markup.0.as_str())
    }

    pub fn sections(&self) -> impl Iterator<Item = (MountPoint, &Markup)> {
        self.sections.iter().map(|(mount, markup)| (*mount, markup))
    }
}

/// Sections and head tags shared by every page.
fn site_chrome(data: &SiteData, kind: PageKind) -> PageState {
    let mut head = Head::new(data.config.site_title.clone());
    seo::apply_analytics(&mut head, &data.config);

    let mut state = PageState::new(kind, head);
    let title = &data.config.site_title;
    state.set_section(MountPoint::SiteTitle, html! { (title) });
    state.set_section(MountPoint::FooterSiteName, html! { (title) });
    state.set_section(MountPoint::SocialLinks, render::social_links(&data.config));
    state
}

/// The landing page.
pub fn build_home(data: &SiteData, config: &BuildConfig) -> PageState {
    let mut state = site_chrome(data, PageKind::Home);
    seo::apply_home_seo(&mut state.head, &data.config);

    let featured = catalog::featured(&data.catalog, config.render.featured_limit);
    state.set_section(
        MountPoint::FeaturedProductsGrid,
        render::product_grid(featured, &data.config, &config.render.placeholder_image),
    );
    state.set_section(
        MountPoint::CategoriesGrid,
        render::category_list(&data.catalog),
    );
    state.set_section(MountPoint::RecentPostsGrid, render::post_cards(&data.posts));
    state
}

/// The full product listing with category filters.
pub fn build_listing(data: &SiteData, config: &BuildConfig) -> PageState {
    let mut state = site_chrome(data, PageKind::Listing);
    state
        .head
        .set_title(format!("All Products | {}", data.config.site_title));
    state.head.upsert(seo::HeadTag::meta(
        "description",
        data.config.site_description.clone(),
    ));
    state.head.upsert(seo::HeadTag::link(
        "canonical",
        links::listing_url(&data.config),
    ));

    state.set_section(
        MountPoint::CategoryFilters,
        render::category_filters(&data.catalog),
    );
    state.set_section(
        MountPoint::ProductListingGrid,
        render::product_grid(&data.catalog, &data.config, &config.render.placeholder_image),
    );
    state
}

/// A single product page, or a not-found page when `id` is unknown.
pub fn build_product(data: &SiteData, config: &BuildConfig, id: &str) -> PageState {
    let mut state = site_chrome(data, PageKind::Product(id.to_string()));

    let Some(product) = catalog::find_product(&data.catalog, id) else {
        tracing::warn!(id, "product not found in catalog");
        state.status = PageStatus::NotFound;
        state.set_section(MountPoint::ProductName, html! { (NOT_FOUND_TEXT) });
        return state;
    };

    let placeholder = &config.render.placeholder_image;
    seo::apply_product_seo(&mut state.head, product, &data.config, &config.render);

    let rating = product.clamped_rating();
    state.set_section(MountPoint::Breadcrumbs, render::breadcrumbs(product));
    state.set_section(MountPoint::ProductName, html! { (product.name) });
    state.set_section(
        MountPoint::ProductRating,
        html! {
            span.stars { (render::star_rating(rating)) }
            " "
            span.rating-value { (render::rating_text(rating)) }
        },
    );
    state.set_section(MountPoint::ProductPrice, html! { (product.price) });
    state.set_section(
        MountPoint::ProductDescription,
        html! { (product.description) },
    );
    state.set_section(
        MountPoint::CtaButton,
        render::cta_button(product, &data.config),
    );
    state.set_section(MountPoint::ProsList, render::bullet_list(&product.pros));
    state.set_section(MountPoint::ConsList, render::bullet_list(&product.cons));
    state.set_section(
        MountPoint::ProductGallery,
        render::gallery(product, placeholder),
    );
    state.set_section(MountPoint::FaqSection, render::faq_section(&product.faqs));
    state.set_section(
        MountPoint::RelatedProductsGrid,
        render::related_list(
            &data.catalog,
            product,
            config.render.related_limit,
            &data.config,
            placeholder,
        ),
    );
    state
}

/// A blog post page, or a not-found page when no post has `url`.
pub fn build_post(data: &SiteData, url: &str) -> PageState {
    let mut state = site_chrome(data, PageKind::Post(url.to_string()));

    let Some(post) = data.posts.iter().find(|p| p.url == url) else {
        tracing::warn!(url, "post not found");
        state.status = PageStatus::NotFound;
        state.set_section(MountPoint::PostTitle, html! { (POST_NOT_FOUND_TEXT) });
        return state;
    };

    seo::apply_article_seo(&mut state.head, post, &data.config);

    let author = post.author.as_deref().unwrap_or(&data.config.author_name);
    state.set_section(MountPoint::PostTitle, html! { (post.title) });
    state.set_section(
        MountPoint::PostMeta,
        html! {
            span.post-author { "By " (author) }
            @if let Some(date) = &post.date {
                " · "
                time datetime=(date) { (date) }
            }
        },
    );
    state.set_section(
        MountPoint::PostImage,
        html! {
            @if !post.image.is_empty() {
                img src=(links::blog_image_path(&post.image)) alt=(post.title);
            }
        },
    );
    state.set_section(MountPoint::PostExcerpt, html! { p { (post.excerpt) } });
    state
}
