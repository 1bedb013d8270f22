//! Regional content rating resolution.
//!
//! Ratings are expressed in the Brazilian classification scheme (`L`, `10`,
//! `12`, `14`, `16`, `18`). A title's rating comes from its regional
//! certification when the catalog has one, otherwise from the foreign
//! (US) certification mapped through a fixed table, otherwise from a
//! genre heuristic, otherwise a fixed default.

use serde::{Deserialize, Serialize};

/// TMDB genre id for Animation.
pub const ANIMATION_GENRE: u32 = 16;
/// TMDB genre id for Family.
pub const FAMILY_GENRE: u32 = 10751;

/// A regional content rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// `L`: suitable for all ages.
    General,
    Ten,
    Twelve,
    Fourteen,
    Sixteen,
    Eighteen,
    /// A regional code outside the known tiers, passed through verbatim.
    Custom(String),
}

impl Rating {
    /// Rating used when nothing else can be resolved.
    pub const DEFAULT: Rating = Rating::Fourteen;

    /// Parse a regional certification code.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "L" => Self::General,
            "10" => Self::Ten,
            "12" => Self::Twelve,
            "14" => Self::Fourteen,
            "16" => Self::Sixteen,
            "18" => Self::Eighteen,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The code shown on rating badges.
    pub fn code(&self) -> &str {
        match self {
            Self::General => "L",
            Self::Ten => "10",
            Self::Twelve => "12",
            Self::Fourteen => "14",
            Self::Sixteen => "16",
            Self::Eighteen => "18",
            Self::Custom(code) => code,
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Map a US (MPA) certification to the regional scheme.
///
/// Unknown grades map to [`Rating::DEFAULT`].
pub fn map_foreign_certification(certification: &str) -> Rating {
    match certification.trim() {
        "G" => Rating::General,
        "PG" => Rating::Ten,
        "PG-13" => Rating::Twelve,
        "R" => Rating::Sixteen,
        "NC-17" => Rating::Eighteen,
        _ => Rating::DEFAULT,
    }
}

/// Resolve the rating for a title.
///
/// The order is fixed: regional, then foreign mapped, then the
/// animation/family heuristic, then the default.
pub fn resolve_rating(regional: Option<&str>, foreign: Option<&str>, genre_ids: &[u32]) -> Rating {
    if let Some(code) = non_empty(regional) {
        return Rating::from_code(code);
    }
    if let Some(code) = non_empty(foreign) {
        return map_foreign_certification(code);
    }
    if genre_ids
        .iter()
        .any(|&g| g == ANIMATION_GENRE || g == FAMILY_GENRE)
    {
        return Rating::General;
    }
    Rating::DEFAULT
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
