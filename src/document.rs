//! Document adapter: turns a [`PageState`] into a full HTML document.
//!
//! Each page kind has a fixed shell (header, main region, footer) containing
//! containers with the ids from [`MountPoint::id`]. A [`Layout`] says which of
//! those containers a shell actually has. A section whose mount point the
//! layout lacks is dropped silently (logged at debug level), so a trimmed-down
//! theme can leave out e.g. the related-products grid without the page
//! controller knowing.
//!
//! The head comes straight from the page's [`Head`](crate::seo::Head) model,
//! wrapped in charset, viewport and the embedded stylesheet.
//!
//! ## CSS and JavaScript
//!
//! Both are embedded at compile time:
//! - `static/site.css`: base styles
//! - `static/site.js`: category filter and debounced search on the listing

use crate::config::SearchConfig;
use crate::page::{MountPoint, PageKind, PageState};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeSet;

const CSS: &str = include_str!("../static/site.css");
const LISTING_JS: &str = include_str!("../static/site.js");

/// Which page shell a page kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Home,
    Listing,
    Product,
    Post,
}

impl Shell {
    pub fn for_kind(kind: &PageKind) -> Self {
        match kind {
            PageKind::Home => Shell::Home,
            PageKind::Listing => Shell::Listing,
            PageKind::Product(_) => Shell::Product,
            PageKind::Post(_) => Shell::Post,
        }
    }
}

const CHROME: [MountPoint; 3] = [
    MountPoint::SiteTitle,
    MountPoint::FooterSiteName,
    MountPoint::SocialLinks,
];

/// Mount points available in each shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home: BTreeSet<MountPoint>,
    listing: BTreeSet<MountPoint>,
    product: BTreeSet<MountPoint>,
    post: BTreeSet<MountPoint>,
}

impl Default for Layout {
    fn default() -> Self {
        use MountPoint::*;
        fn with_chrome(mounts: &[MountPoint]) -> BTreeSet<MountPoint> {
            CHROME.iter().chain(mounts).copied().collect()
        }
        Self {
            home: with_chrome(&[FeaturedProductsGrid, CategoriesGrid, RecentPostsGrid]),
            listing: with_chrome(&[CategoryFilters, ProductListingGrid]),
            product: with_chrome(&[
                Breadcrumbs,
                ProductName,
                ProductRating,
                ProductPrice,
                ProductGallery,
                ProductDescription,
                CtaButton,
                ProsList,
                ConsList,
                FaqSection,
                RelatedProductsGrid,
            ]),
            post: with_chrome(&[PostTitle, PostMeta, PostImage, PostExcerpt]),
        }
    }
}

impl Layout {
    /// A layout with no mount points at all.
    pub fn empty() -> Self {
        Self {
            home: BTreeSet::new(),
            listing: BTreeSet::new(),
            product: BTreeSet::new(),
            post: BTreeSet::new(),
        }
    }

    fn mounts(&self, shell: Shell) -> &BTreeSet<MountPoint> {
        match shell {
            Shell::Home => &self.home,
            Shell::Listing => &self.listing,
            Shell::Product => &self.product,
            Shell::Post => &self.post,
        }
    }

    fn mounts_mut(&mut self, shell: Shell) -> &mut BTreeSet<MountPoint> {
        match shell {
            Shell::Home => &mut self.home,
            Shell::Listing => &mut self.listing,
            Shell::Product => &mut self.product,
            Shell::Post => &mut self.post,
        }
    }

    pub fn with_mount(mut self, shell: Shell, mount: MountPoint) -> Self {
        self.mounts_mut(shell).insert(mount);
        self
    }

    pub fn without_mount(mut self, shell: Shell, mount: MountPoint) -> Self {
        self.mounts_mut(shell).remove(&mount);
        self
    }

    pub fn has(&self, shell: Shell, mount: MountPoint) -> bool {
        self.mounts(shell).contains(&mount)
    }
}

/// Renders a page into a complete HTML document.
pub fn render_document(state: &PageState, layout: &Layout, search: &SearchConfig) -> Markup {
    let shell = Shell::for_kind(&state.kind);
    for (mount, _) in state.sections() {
        if !layout.has(shell, mount) {
            tracing::debug!(mount = mount.id(), ?shell, "no mount point, section dropped");
        }
    }

    let slots = Slots {
        state,
        layout,
        shell,
    };
    let (body_class, content) = match shell {
        Shell::Home => ("home-page", home_main(&slots)),
        Shell::Listing => ("listing-page", listing_main(&slots, search)),
        Shell::Product => ("product-page", product_main(&slots)),
        Shell::Post => ("post-page", post_main(&slots)),
    };

    let body = html! {
        (site_header(&slots))
        main class=(body_class) {
            (content)
        }
        (site_footer(&slots))
        @if shell == Shell::Listing {
            script { (PreEscaped(LISTING_JS)) }
        }
    };
    base_document(state, body)
}

/// Looks up sections for the mounts a shell has.
struct Slots<'a> {
    state: &'a PageState,
    layout: &'a Layout,
    shell: Shell,
}

impl Slots<'_> {
    fn present(&self, mount: MountPoint) -> bool {
        self.layout.has(self.shell, mount)
    }

    fn content(&self, mount: MountPoint) -> Markup {
        match self.state.section(mount) {
            Some(markup) => markup.clone(),
            None => html! {},
        }
    }

    /// The container for `mount`, or nothing when the layout lacks it.
    fn slot(&self, mount: MountPoint) -> Markup {
        if !self.present(mount) {
            return html! {};
        }
        let id = mount.id();
        let inner = self.content(mount);
        match mount {
            MountPoint::ProductName | MountPoint::PostTitle => html! { h1 id=(id) { (inner) } },
            MountPoint::ProsList | MountPoint::ConsList => html! { ul id=(id) { (inner) } },
            MountPoint::Breadcrumbs => html! { nav.breadcrumbs id=(id) aria-label="Breadcrumb" { (inner) } },
            MountPoint::SiteTitle => html! { a.site-title id=(id) href="/" { (inner) } },
            MountPoint::FooterSiteName => html! { span id=(id) { (inner) } },
            _ => html! { div id=(id) { (inner) } },
        }
    }
}

fn base_document(state: &PageState, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (state.head.render())
                style { (PreEscaped(CSS)) }
            }
            body id="top" {
                (body)
            }
        }
    }
}

fn site_header(slots: &Slots) -> Markup {
    html! {
        header.site-header {
            (slots.slot(MountPoint::SiteTitle))
            nav.site-nav {
                a href="/" { "Home" }
                a href="/products/" { "Products" }
            }
        }
    }
}

fn site_footer(slots: &Slots) -> Markup {
    html! {
        footer.site-footer {
            @if slots.present(MountPoint::FooterSiteName) {
                p.copyright { "© " (slots.slot(MountPoint::FooterSiteName)) }
            }
            p.disclosure {
                "As an Amazon Associate we earn from qualifying purchases."
            }
            (slots.slot(MountPoint::SocialLinks))
            a.scroll-top href="#top" aria-label="Back to top" { "↑" }
        }
    }
}

fn home_main(slots: &Slots) -> Markup {
    html! {
        @if slots.present(MountPoint::FeaturedProductsGrid) {
            section.featured {
                h2 { "Featured Products" }
                (slots.slot(MountPoint::FeaturedProductsGrid))
            }
        }
        @if slots.present(MountPoint::CategoriesGrid) {
            section.categories {
                h2 { "Shop by Category" }
                (slots.slot(MountPoint::CategoriesGrid))
            }
        }
        @if slots.present(MountPoint::RecentPostsGrid) {
            section.recent-posts {
                h2 { "Latest Reviews" }
                (slots.slot(MountPoint::RecentPostsGrid))
            }
        }
    }
}

fn listing_main(slots: &Slots, search: &SearchConfig) -> Markup {
    html! {
        h1 { "All Products" }
        div.listing-controls {
            input id="product-search"
                type="search"
                placeholder="Search products..."
                aria-label="Search products"
                data-min-length=(search.min_query_len)
                data-debounce-ms=(search.debounce_ms);
            (slots.slot(MountPoint::CategoryFilters))
        }
        (slots.slot(MountPoint::ProductListingGrid))
    }
}

fn product_main(slots: &Slots) -> Markup {
    use MountPoint::*;
    html! {
        (slots.slot(Breadcrumbs))
        article.product-detail {
            (slots.slot(ProductGallery))
            div.product-info {
                (slots.slot(ProductName))
                (slots.slot(ProductRating))
                (slots.slot(ProductPrice))
                (slots.slot(ProductDescription))
                (slots.slot(CtaButton))
            }
        }
        @if slots.present(ProsList) || slots.present(ConsList) {
            section.pros-cons {
                @if slots.present(ProsList) {
                    div.pros { h2 { "Pros" } (slots.slot(ProsList)) }
                }
                @if slots.present(ConsList) {
                    div.cons { h2 { "Cons" } (slots.slot(ConsList)) }
                }
            }
        }
        (slots.slot(FaqSection))
        @if slots.present(RelatedProductsGrid) {
            section.related {
                h2 { "Related Products" }
                (slots.slot(RelatedProductsGrid))
            }
        }
    }
}

fn post_main(slots: &Slots) -> Markup {
    use MountPoint::*;
    html! {
        article.post-detail {
            (slots.slot(PostImage))
            (slots.slot(PostTitle))
            (slots.slot(PostMeta))
            (slots.slot(PostExcerpt))
            p.post-back { a href="/" { "More reviews" } }
        }
    }
}
