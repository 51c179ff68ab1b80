//! # Affiliate Site
//!
//! A static generator for affiliate product-review sites. Two JSON documents
//! describe the site: a site configuration (title, URL, affiliate id, social
//! profiles, analytics) and a product catalog. Every page comes out with
//! tagged affiliate links, meta and Open Graph tags, and schema.org
//! structured data already in its `<head>`.
//!
//! # Architecture: Load, Build State, Render
//!
//! ```text
//! 1. Load      config/*.json  →  SiteData      (file or HTTP, falls back to defaults)
//! 2. Page      SiteData       →  PageState     (head model + one fragment per mount point)
//! 3. Document  PageState      →  HTML          (page shell with mount points filled)
//! ```
//!
//! Steps 2 and 3 are pure functions. Only the loader and the generator touch
//! the outside world, and the loader reaches it through the [`loader::Fetch`]
//! trait so tests run against in-memory documents.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Site config, product, FAQ, blog post and load report records |
//! | [`links`] | Affiliate, canonical, page and image URLs |
//! | [`catalog`] | Lookup, categories, related, featured slice, search, category filter |
//! | [`loader`] | Fetches and parses both documents; recovers from any failure |
//! | [`render`] | Maud fragments: cards, grids, gallery, FAQ, breadcrumbs, filters |
//! | [`seo`] | `Head` model with keyed upsert; product, home and article SEO; analytics |
//! | [`page`] | Builds the `PageState` for home, listing, product and post pages |
//! | [`interact`] | Debounced search and category filtering behind `ListingEvents` |
//! | [`document`] | Page shells and the `Layout` of mount points |
//! | [`sitemap`] | `sitemap.xml` |
//! | [`generate`] | Writes the whole site to an output directory |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Degrade, Never Fail
//!
//! A missing, unreachable or malformed document is not an error. The site
//! config falls back to a fixed default record and the catalog to an empty
//! list; the reason is logged and kept in [`types::LoadReport`] so `check`
//! can show it. A single bad product record is skipped, not the whole
//! catalog. Only a broken `site.toml` or an unwritable output directory stops
//! a build.
//!
//! ## One Tag Per Name
//!
//! The [`seo::Head`] model keys every tag by its logical name (meta name or
//! property, link rel, script id, JSON-LD `@type`). Applying SEO twice leaves
//! exactly one `og:title` holding the latest value, and whether a meta tag
//! uses `name` or `property` follows from the name itself.
//!
//! ## Mount Points Are Optional
//!
//! Pages are described as data first ([`page::PageState`]) and only then
//! placed into a shell. A [`document::Layout`] lacking a mount point simply
//! drops that section, so themes can leave parts of a page out without the
//! page controller changing.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Catalog data is
//! untrusted text; maud escapes every interpolation, so a product name can
//! never inject markup. JSON-LD is the one raw block and is escaped against
//! `</script>` separately.

pub mod catalog;
pub mod config;
pub mod document;
pub mod generate;
pub mod interact;
pub mod links;
pub mod loader;
pub mod output;
pub mod page;
pub mod render;
pub mod seo;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
