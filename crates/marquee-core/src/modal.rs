//! Details modal with on-demand trailer playback.
//!
//! The modal owns at most one player. A player is only built when the user
//! presses play, and it is destroyed (not paused) whenever the modal closes
//! or is reopened for another title.

use marquee_api::traits::{CatalogSource, ContentDetails};

use crate::format;
use crate::player::{Player, PlayerConfig, PlayerFactory};

const UNAVAILABLE: &str = "Informação não disponível";
/// Cast members listed in the modal.
const CAST_LIMIT: usize = 5;

/// What occupies the preview area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Image,
    Video,
}

/// How the modal was dismissed. Every reason takes the same teardown path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Backdrop,
    Escape,
}

pub struct ModalSession<P: Player> {
    pub details: ContentDetails,
    trailer_key: Option<String>,
    player: Option<P>,
    preview: Preview,
}

/// Render record for the open modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub id: u64,
    pub title: String,
    pub year: String,
    pub duration: String,
    pub overview: String,
    pub rating: String,
    pub backdrop_path: Option<String>,
    pub preview: Preview,
    pub can_play: bool,
    pub cast: String,
    pub genres: String,
}

pub struct DetailsModal<F: PlayerFactory> {
    factory: F,
    session: Option<ModalSession<F::Player>>,
}

impl<F: PlayerFactory> DetailsModal<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            session: None,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_player(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.player.is_some())
    }

    pub fn preview(&self) -> Option<Preview> {
        self.session.as_ref().map(|s| s.preview)
    }

    /// Whether the open title has a playable trailer.
    pub fn can_play(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.trailer_key.is_some())
    }

    /// Show freshly fetched details. Any previous player is destroyed
    /// before the new session exists. Returns whether the modal is open.
    pub fn open(&mut self, details: Option<ContentDetails>) -> bool {
        self.release_player();
        self.session = None;

        let Some(details) = details.filter(ContentDetails::has_metadata) else {
            tracing::warn!("details unavailable, modal not opened");
            return false;
        };

        let trailer_key = details.trailer().map(|v| v.key.clone());
        if trailer_key.is_none() {
            tracing::debug!(id = details.item.id, "no trailer available");
        }
        self.session = Some(ModalSession {
            details,
            trailer_key,
            player: None,
            preview: Preview::Image,
        });
        true
    }

    /// Start trailer playback, building the player on first use.
    ///
    /// Failures are logged and leave the modal showing the preview image.
    pub fn play(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(key) = session.trailer_key.clone() else {
            return false;
        };

        if session.player.is_none() {
            match self.factory.create(PlayerConfig::modal(key)) {
                Ok(player) => session.player = Some(player),
                Err(e) => {
                    tracing::warn!(
                        id = session.details.item.id,
                        error = %e,
                        "modal player unavailable"
                    );
                    session.preview = Preview::Image;
                    return false;
                }
            }
        }

        session.preview = Preview::Video;
        let Some(player) = session.player.as_mut() else {
            return false;
        };
        match player.play() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = session.details.item.id, error = %e, "trailer playback failed");
                player.destroy();
                session.player = None;
                session.preview = Preview::Image;
                false
            }
        }
    }

    /// Dismiss the modal, destroying the player and restoring the preview.
    pub fn close(&mut self, reason: CloseReason) {
        tracing::debug!(?reason, "closing details modal");
        self.release_player();
        self.session = None;
    }

    fn release_player(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(mut player) = session.player.take() {
                player.destroy();
            }
            session.preview = Preview::Image;
        }
    }

    pub fn view(&self) -> Option<ModalView> {
        let session = self.session.as_ref()?;
        let details = &session.details;
        let cast: Vec<&str> = details
            .cast_names
            .iter()
            .take(CAST_LIMIT)
            .map(String::as_str)
            .collect();
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();

        Some(ModalView {
            id: details.item.id,
            title: details.item.title.clone(),
            year: format::year(details.item.release_year()),
            duration: format::runtime(details.runtime_minutes, ""),
            overview: details.item.overview.clone(),
            rating: details.rating.code().to_string(),
            backdrop_path: details.item.backdrop_path.clone(),
            preview: session.preview,
            can_play: session.trailer_key.is_some(),
            cast: format::join_or(&cast, UNAVAILABLE),
            genres: format::join_or(&genres, UNAVAILABLE),
        })
    }
}

impl<F: PlayerFactory> Drop for DetailsModal<F> {
    fn drop(&mut self) {
        self.release_player();
    }
}

/// Fetch fresh details for `id` and open the modal with them.
pub async fn open_details<C, F>(catalog: &C, modal: &mut DetailsModal<F>, id: u64) -> bool
where
    C: CatalogSource,
    F: PlayerFactory,
{
    let details = catalog.fetch_details(id).await;
    modal.open(details)
}

/// Open the modal for `id` and start its trailer right away if it has one.
pub async fn play_title<C, F>(catalog: &C, modal: &mut DetailsModal<F>, id: u64) -> bool
where
    C: CatalogSource,
    F: PlayerFactory,
{
    open_details(catalog, modal, id).await && modal.can_play() && modal.play()
}
