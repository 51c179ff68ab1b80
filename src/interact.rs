//! Listing interactivity without a DOM.
//!
//! The product listing reacts to two user events: typing in the search box
//! and picking a category filter. [`ListingEvents`] is the capability a UI
//! layer calls into; it never touches markup itself and answers with a
//! [`ListingUpdate`] naming which product cards should be visible.
//!
//! Search input is debounced. Every keystroke restarts the quiet period and
//! only the last value is searched once the period elapses. The clock is
//! passed in by the caller, which keeps the logic deterministic:
//!
//! ```text
//! t=0ms    on_search_input("hea")
//! t=120ms  on_search_input("head")     restarts the wait
//! t=300ms  poll → None                 only 180ms since last input
//! t=420ms  poll → Some(update)         runs "head" once
//! t=500ms  poll → None                 nothing pending
//! ```
//!
//! Category and search compose: a card is visible when it is in the selected
//! category and, if a search is active, matches the query.

use crate::catalog::{self, CategoryFilter};
use crate::config::SearchConfig;
use crate::types::Product;
use std::time::{Duration, Instant};

/// Holds the latest value until it has been quiet for `wait`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a new value, replacing any pending one and restarting the wait.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// The pending value, once, after the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (_, at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*at) < self.wait {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// The visible state of the listing after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingUpdate {
    /// Ids of visible products, in catalog order.
    pub visible: Vec<String>,
    pub filter: CategoryFilter,
    /// The active search query, if any.
    pub query: Option<String>,
}

/// Events a UI layer forwards to the listing.
pub trait ListingEvents {
    /// A keystroke in the search box. Takes effect on a later [`poll`](Self::poll).
    fn on_search_input(&mut self, query: &str, now: Instant);

    /// A category filter button (empty for all, or a category name).
    fn on_category_select(&mut self, category: &str) -> ListingUpdate;

    /// Run a debounced search if one is due.
    fn poll(&mut self, now: Instant) -> Option<ListingUpdate>;
}

/// Filter and search state over a borrowed catalog.
pub struct ListingController<'a> {
    catalog: &'a [Product],
    filter: CategoryFilter,
    query: Option<String>,
    min_query_len: usize,
    debouncer: Debouncer,
}

impl<'a> ListingController<'a> {
    pub fn new(catalog: &'a [Product], search: &SearchConfig) -> Self {
        Self {
            catalog,
            filter: CategoryFilter::All,
            query: None,
            min_query_len: search.min_query_len,
            debouncer: Debouncer::new(search.debounce()),
        }
    }

    /// Current state without any pending input applied.
    pub fn current(&self) -> ListingUpdate {
        let hits = self
            .query
            .as_deref()
            .and_then(|q| catalog::search(self.catalog, q, self.min_query_len));

        let visible = self
            .catalog
            .iter()
            .filter(|p| self.filter.matches(p))
            .filter(|p| match &hits {
                Some(hits) => hits.iter().any(|hit| std::ptr::eq(*hit, *p)),
                None => true,
            })
            .map(|p| p.id.clone())
            .collect();

        ListingUpdate {
            visible,
            filter: self.filter.clone(),
            query: self.query.clone(),
        }
    }
}

impl ListingEvents for ListingController<'_> {
    fn on_search_input(&mut self, query: &str, now: Instant) {
        self.debouncer.input(query, now);
    }

    fn on_category_select(&mut self, category: &str) -> ListingUpdate {
        self.filter = CategoryFilter::from_param(category);
        self.current()
    }

    fn poll(&mut self, now: Instant) -> Option<ListingUpdate> {
        let query = self.debouncer.poll(now)?;
        let query = query.trim();
        // Too-short queries clear the search rather than keeping a stale one
        self.query = if query.chars().count() < self.min_query_len {
            None
        } else {
            Some(query.to_string())
        };
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn listing() -> Vec<Product> {
        let mut items = catalog(&[
            ("studio-cans", "Audio"),
            ("desk-lamp", "Lighting"),
            ("earbuds", "Audio"),
            ("floor-lamp", "Lighting"),
        ]);
        items[0].name = "Studio Headphones".to_string();
        items[2].keywords = vec!["wireless headphones".to_string()];
        items
    }

    #[test]
    fn debouncer_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        debouncer.input("hea", start);
        debouncer.input("head", start + ms(120));
        assert_eq!(debouncer.poll(start + ms(300)), None);
        assert_eq!(debouncer.poll(start + ms(420)), Some("head".to_string()));
        assert_eq!(debouncer.poll(start + ms(500)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn debouncer_without_input_is_idle() {
        let mut debouncer = Debouncer::new(ms(300));
        assert_eq!(debouncer.poll(Instant::now()), None);
    }

    #[test]
    fn initial_state_shows_everything() {
        let items = listing();
        let controller = ListingController::new(&items, &SearchConfig::default());
        let state = controller.current();
        assert_eq!(state.visible.len(), 4);
        assert_eq!(state.filter, CategoryFilter::All);
        assert_eq!(state.query, None);
    }

    #[test]
    fn category_select_filters() {
        let items = listing();
        let mut controller = ListingController::new(&items, &SearchConfig::default());

        let update = controller.on_category_select("Lighting");
        assert_eq!(update.visible, vec!["desk-lamp", "floor-lamp"]);

        let update = controller.on_category_select("");
        assert_eq!(update.visible.len(), 4);
    }

    #[test]
    fn search_applies_after_debounce() {
        let items = listing();
        let mut controller = ListingController::new(&items, &SearchConfig::default());
        let start = Instant::now();

        controller.on_search_input("headphones", start);
        assert!(controller.poll(start + ms(100)).is_none());
        let update = controller.poll(start + ms(300)).unwrap();
        assert_eq!(update.visible, vec!["studio-cans", "earbuds"]);
        assert_eq!(update.query.as_deref(), Some("headphones"));
    }

    #[test]
    fn short_query_clears_search() {
        let items = listing();
        let mut controller = ListingController::new(&items, &SearchConfig::default());
        let start = Instant::now();

        controller.on_search_input("lamp", start);
        assert_eq!(controller.poll(start + ms(300)).unwrap().visible.len(), 2);

        controller.on_search_input("la", start + ms(400));
        let update = controller.poll(start + ms(700)).unwrap();
        assert_eq!(update.query, None);
        assert_eq!(update.visible.len(), 4);
    }

    #[test]
    fn category_and_search_compose() {
        let items = listing();
        let mut controller = ListingController::new(&items, &SearchConfig::default());
        let start = Instant::now();

        controller.on_search_input("lamp", start);
        controller.poll(start + ms(300)).unwrap();
        let update = controller.on_category_select("Audio");
        assert!(update.visible.is_empty());
        assert_eq!(update.query.as_deref(), Some("lamp"));

        controller.on_search_input("description", start + ms(400));
        let update = controller.poll(start + ms(700)).unwrap();
        assert_eq!(update.visible, vec!["studio-cans", "earbuds"]);
    }
}
