//! Debounced type-ahead search.
//!
//! Every keystroke bumps a generation counter and yields a ticket. A ticket
//! is only honoured (fetched after the debounce delay, then rendered) while
//! it is the newest one, so late responses for superseded queries are
//! dropped no matter when they arrive.

use std::cell::RefCell;
use std::time::Duration;

use marquee_api::traits::{CatalogSource, MediaKind, SearchHit};

use crate::format;

/// A pending search for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    Hidden,
    NoResults(String),
    Results(Vec<SearchHit>),
}

/// Render record for one result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHitView {
    pub id: u64,
    pub title: String,
    pub year: String,
    pub kind_label: &'static str,
    pub poster_path: Option<String>,
    /// Only movies open the details modal.
    pub opens_details: bool,
}

impl From<&SearchHit> for SearchHitView {
    fn from(hit: &SearchHit) -> Self {
        Self {
            id: hit.id,
            title: hit.title.clone(),
            year: format::year(hit.release_year()),
            kind_label: match hit.kind {
                MediaKind::Movie => "Filme",
                MediaKind::Tv => "Série",
            },
            poster_path: hit.poster_path.clone(),
            opens_details: hit.kind == MediaKind::Movie,
        }
    }
}

pub struct SearchController {
    generation: u64,
    view: SearchView,
    debounce: Duration,
}

impl SearchController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            generation: 0,
            view: SearchView::Hidden,
            debounce,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn hit_views(&self) -> Vec<SearchHitView> {
        match &self.view {
            SearchView::Results(hits) => hits.iter().map(SearchHitView::from).collect(),
            _ => Vec::new(),
        }
    }

    /// Input changed. A blank query clears the results immediately and
    /// needs no fetch.
    pub fn input(&mut self, query: &str) -> Option<SearchTicket> {
        self.generation += 1;
        if query.trim().is_empty() {
            self.view = SearchView::Hidden;
            return None;
        }
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Render results for `ticket` unless a newer input has happened since.
    pub fn apply(&mut self, ticket: SearchTicket, hits: Vec<SearchHit>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                query = %ticket.query,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale search results"
            );
            return false;
        }
        self.view = if hits.is_empty() {
            SearchView::NoResults(ticket.query)
        } else {
            SearchView::Results(hits)
        };
        true
    }

    /// Close the results (escape, click outside). Pending tickets go stale.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.view = SearchView::Hidden;
    }
}

/// Debounce, fetch and render one ticket.
///
/// Borrows of the controller never span an await, so several dispatches
/// may be in flight on one thread. Returns whether results were rendered.
pub async fn dispatch<C: CatalogSource>(
    controller: &RefCell<SearchController>,
    catalog: &C,
    ticket: SearchTicket,
) -> bool {
    let delay = controller.borrow().debounce();
    tokio::time::sleep(delay).await;

    if !controller.borrow().is_current(&ticket) {
        return false;
    }
    let hits = catalog.search(ticket.query()).await;
    controller.borrow_mut().apply(ticket, hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hit, FakeCatalog};

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn catalog_with_delays(a_delay: u64, ab_delay: u64) -> FakeCatalog {
        let mut catalog = FakeCatalog::default();
        catalog.search_results.insert("a".into(), vec![hit(1, "A")]);
        catalog.search_results.insert("ab".into(), vec![hit(2, "AB")]);
        catalog
            .search_delays
            .insert("a".into(), Duration::from_millis(a_delay));
        catalog
            .search_delays
            .insert("ab".into(), Duration::from_millis(ab_delay));
        catalog
    }

    /// "a" is typed, its fetch starts, then "ab" is typed before "a" answers.
    async fn race(catalog: &FakeCatalog) -> SearchView {
        let controller = RefCell::new(SearchController::new(DEBOUNCE));
        let first = controller.borrow_mut().input("a").unwrap();

        let typing = async {
            tokio::time::sleep(Duration::from_millis(350)).await;
            let second = controller.borrow_mut().input("ab").unwrap();
            dispatch(&controller, catalog, second).await
        };
        let (first_rendered, second_rendered) =
            tokio::join!(dispatch(&controller, catalog, first), typing);

        assert!(!first_rendered);
        assert!(second_rendered);
        assert_eq!(catalog.searches().len(), 2);
        let view = controller.borrow().view().clone();
        view
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_arriving_last_is_dropped() {
        let catalog = catalog_with_delays(1_000, 10);
        assert_eq!(race(&catalog).await, SearchView::Results(vec![hit(2, "AB")]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_arriving_first_is_dropped() {
        let catalog = catalog_with_delays(100, 200);
        assert_eq!(race(&catalog).await, SearchView::Results(vec![hit(2, "AB")]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_skips_superseded_keystrokes() {
        let catalog = catalog_with_delays(0, 0);
        let controller = RefCell::new(SearchController::new(DEBOUNCE));

        let first = controller.borrow_mut().input("a").unwrap();
        let typing = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let second = controller.borrow_mut().input("ab").unwrap();
            dispatch(&controller, &catalog, second).await
        };
        let (first_rendered, second_rendered) =
            tokio::join!(dispatch(&controller, &catalog, first), typing);

        assert!(!first_rendered);
        assert!(second_rendered);
        assert_eq!(catalog.searches(), vec!["ab".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_fetch() {
        let catalog = catalog_with_delays(0, 0);
        let controller = RefCell::new(SearchController::new(DEBOUNCE));

        let ticket = controller.borrow_mut().input("a").unwrap();
        assert!(dispatch(&controller, &catalog, ticket).await);
        assert_eq!(controller.borrow().hit_views().len(), 1);

        assert!(controller.borrow_mut().input("   ").is_none());
        assert_eq!(controller.borrow().view(), &SearchView::Hidden);
        assert_eq!(catalog.searches().len(), 1);
    }

    #[test]
    fn test_empty_results_show_message() {
        let mut controller = SearchController::new(DEBOUNCE);
        let ticket = controller.input("zzz").unwrap();
        assert!(controller.apply(ticket, Vec::new()));
        assert_eq!(controller.view(), &SearchView::NoResults("zzz".into()));
    }

    #[test]
    fn test_dismiss_discards_pending_ticket() {
        let mut controller = SearchController::new(DEBOUNCE);
        let ticket = controller.input("dune").unwrap();
        controller.dismiss();
        assert!(!controller.apply(ticket, vec![hit(1, "Dune")]));
        assert_eq!(controller.view(), &SearchView::Hidden);
    }

    #[test]
    fn test_hit_view_labels() {
        let mut series = hit(3, "Dark");
        series.kind = MediaKind::Tv;
        series.release_date = Some("2017-12-01".into());
        let view = SearchHitView::from(&series);
        assert_eq!(view.kind_label, "Série");
        assert_eq!(view.year, "2017");
        assert!(!view.opens_details);

        let movie = SearchHitView::from(&hit(4, "Up"));
        assert_eq!(movie.year, "N/A");
        assert!(movie.opens_details);
    }
}
