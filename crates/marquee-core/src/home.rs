//! Home page assembly: the hero carousel and the genre rows.
//!
//! Fetches for a section are issued together and may complete in any
//! order; results are collected into index-addressed vectors before any
//! view is built, so rendering always follows listing order.

use futures::future::join_all;

use marquee_api::traits::{CatalogItem, CatalogSource, ContentDetails, SortKey};

use crate::carousel::Carousel;
use crate::config::{AppConfig, RowSection};
use crate::format;
use crate::genres;
use crate::player::{Player, PlayerFactory};
use crate::scroll_row::{ScrollRow, ScrollSettings};

const DEFAULT_CARD_DURATION: &str = "1h 30min";
/// Genre names shown on a card.
const CARD_GENRES: usize = 3;

/// Where a row's titles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Trending,
    /// Genre id `0` lists titles now in theatres.
    Genre { id: u32, sort: SortKey },
}

impl From<&RowSection> for RowSource {
    fn from(section: &RowSection) -> Self {
        match section.genre {
            None => Self::Trending,
            Some(id) => Self::Genre {
                id,
                sort: section.sort,
            },
        }
    }
}

/// A title in a row, with its independently fetched details.
#[derive(Debug, Clone)]
pub struct Card {
    pub item: CatalogItem,
    pub details: Option<ContentDetails>,
}

/// Render record for a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: u64,
    pub title: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub match_percent: u32,
    pub rating: String,
    pub duration: String,
    pub genres: Vec<&'static str>,
}

impl Card {
    pub fn view(&self) -> CardView {
        let rating = self
            .details
            .as_ref()
            .map(|d| d.rating.code().to_string())
            .unwrap_or_else(|| marquee_api::rating::Rating::DEFAULT.code().to_string());
        CardView {
            id: self.item.id,
            title: self.item.title.clone(),
            backdrop_path: self.item.backdrop_path.clone(),
            poster_path: self.item.poster_path.clone(),
            match_percent: format::match_percent(self.item.vote_average),
            rating,
            duration: format::runtime(
                self.details.as_ref().and_then(|d| d.runtime_minutes),
                DEFAULT_CARD_DURATION,
            ),
            genres: genres::genre_names(&self.item.genre_ids, CARD_GENRES),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub cards: Vec<Card>,
    pub scroll: ScrollRow,
}

impl ContentRow {
    pub fn card_views(&self) -> Vec<CardView> {
        self.cards.iter().map(Card::view).collect()
    }
}

pub struct HomePage<P: Player> {
    pub hero: Option<Carousel<P>>,
    pub rows: Vec<ContentRow>,
}

/// Fetch details for every item concurrently, keeping input order.
async fn fetch_all_details<C: CatalogSource>(
    catalog: &C,
    items: &[CatalogItem],
) -> Vec<Option<ContentDetails>> {
    join_all(items.iter().map(|item| catalog.fetch_details(item.id))).await
}

/// Build the hero carousel from the first `slide_count` trending titles.
pub async fn load_hero<C, F>(
    catalog: &C,
    factory: &mut F,
    slide_count: usize,
) -> Option<Carousel<F::Player>>
where
    C: CatalogSource,
    F: PlayerFactory,
{
    let mut featured = catalog.fetch_trending().await;
    featured.truncate(slide_count);
    if featured.is_empty() {
        tracing::warn!("no featured titles, hero section skipped");
        return None;
    }

    let details = fetch_all_details(catalog, &featured).await;
    let entries = featured.into_iter().zip(details).collect();
    Some(Carousel::build(factory, entries))
}

/// Fetch one row and the details for each of its cards.
pub async fn load_row<C: CatalogSource>(
    catalog: &C,
    section: &RowSection,
    viewport_width: f32,
    settings: ScrollSettings,
) -> ContentRow {
    let items = match RowSource::from(section) {
        RowSource::Trending => catalog.fetch_trending().await,
        RowSource::Genre { id, sort } => catalog.fetch_by_genre(id, sort).await,
    };
    let details = fetch_all_details(catalog, &items).await;
    let cards: Vec<Card> = items
        .into_iter()
        .zip(details)
        .map(|(item, details)| Card { item, details })
        .collect();

    tracing::debug!(row = %section.id, cards = cards.len(), "row loaded");
    ContentRow {
        id: section.id.clone(),
        title: section.title.clone(),
        scroll: ScrollRow::new(cards.len(), None, viewport_width, settings),
        cards,
    }
}

/// Load the hero first, then every configured row concurrently.
pub async fn load_home<C, F>(
    catalog: &C,
    factory: &mut F,
    config: &AppConfig,
) -> HomePage<F::Player>
where
    C: CatalogSource,
    F: PlayerFactory,
{
    let hero = load_hero(catalog, factory, config.hero.slide_count).await;

    let settings = config.scroll_settings();
    let rows = join_all(
        config
            .rows
            .sections
            .iter()
            .map(|section| load_row(catalog, section, config.rows.viewport_width_px, settings)),
    )
    .await;

    tracing::info!(
        slides = hero.as_ref().map_or(0, |h| h.len()),
        rows = rows.len(),
        "home page loaded"
    );
    HomePage { hero, rows }
}
