//! In-memory fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use marquee_api::rating::Rating;
use marquee_api::traits::{
    CatalogItem, CatalogSource, ContentDetails, MediaKind, SearchHit, SortKey, Video,
};

use crate::player::{Player, PlayerConfig, PlayerError, PlayerFactory};

// ── Players ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Created(PlayerConfig),
    Play,
    Pause,
    Muted(bool),
    Volume(u8),
    Destroyed,
}

pub type CallLog = Rc<RefCell<Vec<(usize, Call)>>>;

pub struct FakePlayer {
    id: usize,
    log: CallLog,
    fail_play: bool,
}

impl FakePlayer {
    fn record(&self, call: Call) {
        self.log.borrow_mut().push((self.id, call));
    }
}

impl Player for FakePlayer {
    fn play(&mut self) -> Result<(), PlayerError> {
        if self.fail_play {
            return Err(PlayerError::Playback("blocked".into()));
        }
        self.record(Call::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.record(Call::Pause);
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(Call::Muted(muted));
    }

    fn set_volume(&mut self, volume: u8) {
        self.record(Call::Volume(volume));
    }

    fn destroy(&mut self) {
        self.record(Call::Destroyed);
    }
}

/// Factory that numbers players in creation order and logs every call.
#[derive(Default)]
pub struct FakeFactory {
    pub log: CallLog,
    next_id: usize,
    /// Video keys whose construction fails.
    pub failing_keys: Vec<String>,
    pub fail_play: bool,
}

impl FakeFactory {
    /// Construction fails for these video keys.
    pub fn failing(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Players construct fine but refuse to start.
    pub fn failing_play() -> Self {
        Self {
            fail_play: true,
            ..Self::default()
        }
    }

    pub fn calls_for(&self, id: usize) -> Vec<Call> {
        self.log
            .borrow()
            .iter()
            .filter(|(i, _)| *i == id)
            .map(|(_, c)| c.clone())
            .collect()
    }

    pub fn created(&self) -> usize {
        self.next_id
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn is_destroyed(&self, id: usize) -> bool {
        self.calls_for(id).contains(&Call::Destroyed)
    }
}

impl PlayerFactory for FakeFactory {
    type Player = FakePlayer;

    fn create(&mut self, config: PlayerConfig) -> Result<FakePlayer, PlayerError> {
        if self.failing_keys.contains(&config.video_key) {
            return Err(PlayerError::Init(format!("cannot embed {}", config.video_key)));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.log.borrow_mut().push((id, Call::Created(config)));
        Ok(FakePlayer {
            id,
            log: Rc::clone(&self.log),
            fail_play: self.fail_play,
        })
    }
}

// ── Catalog ──────────────────────────────────────────────────────

pub fn item(id: u64) -> CatalogItem {
    CatalogItem {
        id,
        title: format!("Title {id}"),
        overview: format!("Overview {id}"),
        release_date: Some("2020-05-01".into()),
        backdrop_path: Some(format!("/backdrop{id}.jpg")),
        poster_path: Some(format!("/poster{id}.jpg")),
        vote_average: 7.5,
        genre_ids: vec![28, 12],
    }
}

pub fn details_with_trailer(id: u64, key: &str) -> ContentDetails {
    ContentDetails {
        runtime_minutes: Some(125),
        rating: Rating::Twelve,
        videos: vec![Video {
            key: key.into(),
            site: "YouTube".into(),
            kind: "Trailer".into(),
        }],
        cast_names: vec!["A".into(), "B".into()],
        ..ContentDetails::placeholder(item(id))
    }
}

pub fn details_without_trailer(id: u64) -> ContentDetails {
    ContentDetails {
        runtime_minutes: Some(95),
        ..ContentDetails::placeholder(item(id))
    }
}

/// Scripted catalog. Details and searches can be delayed to force
/// out-of-order completion.
#[derive(Default)]
pub struct FakeCatalog {
    pub trending: Vec<CatalogItem>,
    pub genres: HashMap<u32, Vec<CatalogItem>>,
    pub details: HashMap<u64, ContentDetails>,
    pub detail_delays: HashMap<u64, Duration>,
    pub search_results: HashMap<String, Vec<SearchHit>>,
    pub search_delays: HashMap<String, Duration>,
    pub searches: Mutex<Vec<String>>,
    pub detail_requests: Mutex<Vec<u64>>,
}

impl FakeCatalog {
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn detail_requests(&self) -> Vec<u64> {
        self.detail_requests
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

pub fn hit(id: u64, title: &str) -> SearchHit {
    SearchHit {
        id,
        kind: MediaKind::Movie,
        title: title.into(),
        poster_path: None,
        release_date: None,
    }
}

impl CatalogSource for FakeCatalog {
    async fn fetch_trending(&self) -> Vec<CatalogItem> {
        self.trending.clone()
    }

    async fn fetch_by_genre(&self, genre_id: u32, _sort: SortKey) -> Vec<CatalogItem> {
        self.genres.get(&genre_id).cloned().unwrap_or_default()
    }

    async fn fetch_details(&self, id: u64) -> Option<ContentDetails> {
        if let Ok(mut requests) = self.detail_requests.lock() {
            requests.push(id);
        }
        if let Some(delay) = self.detail_delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        self.details.get(&id).cloned()
    }

    async fn search(&self, query: &str) -> Vec<SearchHit> {
        if let Ok(mut searches) = self.searches.lock() {
            searches.push(query.to_string());
        }
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        self.search_results.get(query).cloned().unwrap_or_default()
    }
}
