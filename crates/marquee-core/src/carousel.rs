//! Hero carousel: slide rotation, background trailers and shared mute.

use marquee_api::traits::{CatalogItem, ContentDetails};

use crate::format;
use crate::player::{apply_audio, Player, PlayerConfig, PlayerEvent, PlayerFactory};

/// Duration label when a slide's runtime is unknown.
const DEFAULT_DURATION: &str = "2h";
const OVERVIEW_PLACEHOLDER: &str = "Descrição não disponível.";

/// Whether the rotation timer may still advance slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoplay {
    Running,
    /// Latched by user navigation; never resumes on its own.
    Suspended,
}

/// One featured title.
pub struct Slide<P: Player> {
    pub item: CatalogItem,
    pub details: ContentDetails,
    player: Option<P>,
    active: bool,
}

impl<P: Player> Slide<P> {
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Render record for a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub index: usize,
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub rating: String,
    pub year: String,
    pub duration: String,
    pub quality: &'static str,
    /// Shown when the slide has no live player.
    pub backdrop_path: Option<String>,
    pub shows_video: bool,
    pub mute_visible: bool,
    pub muted: bool,
    pub active: bool,
}

pub struct Carousel<P: Player> {
    slides: Vec<Slide<P>>,
    current: usize,
    muted: bool,
    autoplay: Autoplay,
}

impl<P: Player> Carousel<P> {
    /// Build slides in the given order. Missing details fall back to
    /// placeholders; a clip that cannot be embedded falls back to the
    /// backdrop image.
    pub fn build<F>(factory: &mut F, entries: Vec<(CatalogItem, Option<ContentDetails>)>) -> Self
    where
        F: PlayerFactory<Player = P>,
    {
        let slides = entries
            .into_iter()
            .enumerate()
            .map(|(index, (item, details))| {
                let details = details.unwrap_or_else(|| {
                    tracing::debug!(id = item.id, "slide details unavailable, using defaults");
                    ContentDetails::placeholder(item.clone())
                });
                let player = details.featured_clip().and_then(|clip| {
                    factory
                        .create(PlayerConfig::hero(clip.key.clone(), index == 0))
                        .map_err(|e| {
                            tracing::warn!(id = item.id, error = %e, "hero player unavailable");
                        })
                        .ok()
                });
                Slide {
                    item,
                    details,
                    player,
                    active: index == 0,
                }
            })
            .collect();

        Self {
            slides,
            current: 0,
            muted: true,
            autoplay: Autoplay::Running,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Slide<P>> {
        self.slides.get(self.current)
    }

    pub fn slides(&self) -> &[Slide<P>] {
        &self.slides
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    /// User navigation to the next slide.
    pub fn advance(&mut self) {
        self.suspend_autoplay();
        self.go_to(self.current as isize + 1);
    }

    /// User navigation to the previous slide.
    pub fn retreat(&mut self) {
        self.suspend_autoplay();
        self.go_to(self.current as isize - 1);
    }

    /// User navigation to an arbitrary slide, wrapping out-of-range indices.
    pub fn jump_to(&mut self, index: isize) {
        self.suspend_autoplay();
        self.go_to(index);
    }

    /// Rotation timer fired. Returns whether the slide changed.
    pub fn autoplay_tick(&mut self) -> bool {
        if self.autoplay == Autoplay::Suspended || self.slides.len() < 2 {
            return false;
        }
        self.go_to(self.current as isize + 1);
        true
    }

    fn suspend_autoplay(&mut self) {
        if self.autoplay == Autoplay::Running {
            tracing::debug!("hero autoplay suspended by user navigation");
            self.autoplay = Autoplay::Suspended;
        }
    }

    fn go_to(&mut self, index: isize) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        let next = index.rem_euclid(len as isize) as usize;
        if next == self.current {
            return;
        }

        let old = &mut self.slides[self.current];
        old.active = false;
        if let Some(player) = old.player.as_mut() {
            player.pause();
        }

        let muted = self.muted;
        let new = &mut self.slides[next];
        new.active = true;
        start_player(new, next, muted);

        tracing::debug!(from = self.current, to = next, "hero slide changed");
        self.current = next;
    }

    /// Flip the shared mute flag. Only the active slide's player is
    /// touched now; other slides pick the flag up when activated.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let muted = self.muted;
        if let Some(player) = self
            .slides
            .get_mut(self.current)
            .and_then(|s| s.player.as_mut())
        {
            apply_audio(player, muted);
        }
        muted
    }

    pub fn on_player_event(&mut self, index: usize, event: PlayerEvent) {
        let muted = self.muted;
        let is_current = index == self.current;
        let Some(slide) = self.slides.get_mut(index) else {
            return;
        };
        match event {
            PlayerEvent::Ready if is_current => start_player(slide, index, muted),
            PlayerEvent::Ready => {
                if let Some(player) = slide.player.as_mut() {
                    apply_audio(player, muted);
                }
            }
            // Trailers loop in place; the rotation timer decides when to move on.
            PlayerEvent::Ended => start_player(slide, index, muted),
        }
    }

    pub fn views(&self) -> Vec<SlideView> {
        self.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let has_player = slide.player.is_some();
                SlideView {
                    index,
                    id: slide.item.id,
                    title: slide.item.title.clone(),
                    overview: if slide.item.overview.is_empty() {
                        OVERVIEW_PLACEHOLDER.to_string()
                    } else {
                        slide.item.overview.clone()
                    },
                    rating: slide.details.rating.code().to_string(),
                    year: format::year(slide.item.release_year()),
                    duration: format::runtime(slide.details.runtime_minutes, DEFAULT_DURATION),
                    quality: "HD",
                    backdrop_path: if has_player {
                        None
                    } else {
                        slide.item.backdrop_path.clone()
                    },
                    shows_video: has_player,
                    mute_visible: has_player,
                    muted: self.muted,
                    active: slide.active,
                }
            })
            .collect()
    }

    /// Destroy every slide player.
    pub fn teardown(&mut self) {
        for slide in &mut self.slides {
            if let Some(mut player) = slide.player.take() {
                player.destroy();
            }
        }
    }
}

/// Play a slide's trailer with the shared audio state. A player that cannot
/// start is destroyed, leaving the slide on its backdrop.
fn start_player<P: Player>(slide: &mut Slide<P>, index: usize, muted: bool) {
    let Some(player) = slide.player.as_mut() else {
        return;
    };
    match player.play() {
        Ok(()) => apply_audio(player, muted),
        Err(e) => {
            tracing::warn!(index, error = %e, "hero trailer did not start, showing backdrop");
            player.destroy();
            slide.player = None;
        }
    }
}

impl<P: Player> Drop for Carousel<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
