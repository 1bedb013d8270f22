//! Embedded video player capability.
//!
//! Controllers never talk to a concrete player technology. They construct
//! players through a [`PlayerFactory`] and drive them through [`Player`];
//! lifecycle notifications come back as [`PlayerEvent`]s.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("player construction failed: {0}")]
    Init(String),

    #[error("playback failed: {0}")]
    Playback(String),
}

/// How the player's control overlay is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// No overlay at all (hero slides).
    Hidden,
    /// The provider's full control bar (details modal).
    Full,
}

/// Construction options handed to the player provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub video_key: String,
    pub autoplay: bool,
    pub controls: Controls,
    pub loop_on_end: bool,
    pub muted: bool,
    pub inline: bool,
    pub modest_branding: bool,
}

impl PlayerConfig {
    /// Background player for a hero slide. Only the first slide autoplays.
    pub fn hero(video_key: impl Into<String>, autoplay: bool) -> Self {
        Self {
            video_key: video_key.into(),
            autoplay,
            controls: Controls::Hidden,
            loop_on_end: true,
            muted: true,
            inline: true,
            modest_branding: true,
        }
    }

    /// Foreground trailer player for the details modal.
    pub fn modal(video_key: impl Into<String>) -> Self {
        Self {
            video_key: video_key.into(),
            autoplay: true,
            controls: Controls::Full,
            loop_on_end: false,
            muted: false,
            inline: true,
            modest_branding: true,
        }
    }
}

/// Notifications emitted by a live player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Ready,
    Ended,
}

pub trait Player {
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn set_volume(&mut self, volume: u8);
    /// Release the player. It must not be used afterwards.
    fn destroy(&mut self);
}

pub trait PlayerFactory {
    type Player: Player;

    fn create(&mut self, config: PlayerConfig) -> Result<Self::Player, PlayerError>;
}

/// Bring a player's audio in line with a mute flag.
pub fn apply_audio<P: Player + ?Sized>(player: &mut P, muted: bool) {
    if muted {
        player.set_muted(true);
    } else {
        player.set_muted(false);
        player.set_volume(100);
    }
}
