//! Terminal rendering and a log-backed player.

use marquee_core::carousel::{Carousel, SlideView};
use marquee_core::format;
use marquee_core::home::ContentRow;
use marquee_core::modal::{ModalView, Preview};
use marquee_core::player::{Player, PlayerConfig, PlayerError, PlayerFactory};
use marquee_core::search::{SearchController, SearchView};

/// Stand-in for an embedded video player: it tracks state and logs.
pub struct ConsolePlayer {
    surface: &'static str,
    key: String,
    playing: bool,
    muted: bool,
    destroyed: bool,
}

impl ConsolePlayer {
    fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

impl Player for ConsolePlayer {
    fn play(&mut self) -> Result<(), PlayerError> {
        if self.destroyed {
            return Err(PlayerError::Playback("player already destroyed".into()));
        }
        if !self.playing {
            tracing::info!(
                surface = self.surface,
                url = %self.watch_url(),
                muted = self.muted,
                "trailer playing"
            );
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            tracing::debug!(surface = self.surface, key = %self.key, "trailer paused");
        }
        self.playing = false;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_volume(&mut self, volume: u8) {
        tracing::trace!(surface = self.surface, volume, "volume set");
    }

    fn destroy(&mut self) {
        tracing::debug!(surface = self.surface, key = %self.key, "player destroyed");
        self.playing = false;
        self.destroyed = true;
    }
}

pub struct ConsoleFactory {
    surface: &'static str,
}

impl ConsoleFactory {
    pub fn new(surface: &'static str) -> Self {
        Self { surface }
    }
}

impl PlayerFactory for ConsoleFactory {
    type Player = ConsolePlayer;

    fn create(&mut self, config: PlayerConfig) -> Result<ConsolePlayer, PlayerError> {
        if config.video_key.trim().is_empty() {
            return Err(PlayerError::Init("empty video key".into()));
        }
        tracing::debug!(
            surface = self.surface,
            key = %config.video_key,
            autoplay = config.autoplay,
            "player created"
        );
        Ok(ConsolePlayer {
            surface: self.surface,
            key: config.video_key,
            playing: false,
            muted: config.muted,
            destroyed: false,
        })
    }
}

// ── Rendering ────────────────────────────────────────────────────

pub fn print_slide(slide: &SlideView, image_base: &str) {
    let marker = if slide.active { '>' } else { ' ' };
    println!(
        "{marker} [{}] {}  ({} | {} | {} | {})",
        slide.index, slide.title, slide.rating, slide.year, slide.duration, slide.quality
    );
    if slide.active {
        println!("      {}", slide.overview);
        if slide.shows_video {
            let audio = if slide.muted { "muted" } else { "sound on" };
            println!("      trailer in background, {audio}");
        } else if let Some(url) = format::image_url(image_base, slide.backdrop_path.as_deref()) {
            println!("      backdrop: {url}");
        }
    }
}

pub fn print_hero<P: Player>(hero: &Carousel<P>, image_base: &str) {
    println!("== Destaques ==");
    for slide in hero.views() {
        print_slide(&slide, image_base);
    }
}

pub fn print_row(index: usize, row: &ContentRow) {
    let scroll = &row.scroll;
    let prev = if scroll.prev_visible() { '<' } else { ' ' };
    let next = if scroll.next_visible() { '>' } else { ' ' };
    println!(
        "== {index}: {} ({} titles) {prev}{next} x={:.0}px of {:.0}",
        row.title,
        row.cards.len(),
        scroll.translate_x(),
        scroll.max_offset().max(0.0)
    );
    for (col, card) in row.card_views().iter().enumerate() {
        println!(
            "   {col:>2}. {}  {}% match | {} | {} | {}",
            card.title,
            card.match_percent,
            card.rating,
            card.duration,
            card.genres.join(", ")
        );
    }
}

pub fn print_modal(view: &ModalView, image_base: &str) {
    println!("== {} ==", view.title);
    println!("{} | {} | {}", view.year, view.rating, view.duration);
    println!("{}", view.overview);
    println!("Elenco: {}", view.cast);
    println!("Gêneros: {}", view.genres);
    match view.preview {
        Preview::Video => println!("[trailer playing]"),
        Preview::Image => {
            if let Some(url) = format::image_url(image_base, view.backdrop_path.as_deref()) {
                println!("preview: {url}");
            }
            if view.can_play {
                println!("(type `trailer` to play)");
            }
        }
    }
}

pub fn print_search(search: &SearchController, image_base: &str) {
    match search.view() {
        SearchView::Hidden => {}
        SearchView::NoResults(query) => println!("Nenhum resultado encontrado para \"{query}\""),
        SearchView::Results(_) => {
            for (n, hit) in search.hit_views().iter().enumerate() {
                let poster = format::image_url(image_base, hit.poster_path.as_deref())
                    .unwrap_or_default();
                println!("   {n}. {} ({}, {}) {poster}", hit.title, hit.year, hit.kind_label);
            }
        }
    }
}
