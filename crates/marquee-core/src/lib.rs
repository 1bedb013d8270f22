//! Page controllers for the Marquee catalog front end.
//!
//! Everything here is renderer-agnostic: controllers own state and expose
//! plain view records, while players and the catalog sit behind traits.

pub mod carousel;
pub mod config;
pub mod error;
pub mod format;
pub mod genres;
pub mod home;
pub mod modal;
pub mod player;
pub mod scroll_row;
pub mod search;

#[cfg(test)]
mod testing;
