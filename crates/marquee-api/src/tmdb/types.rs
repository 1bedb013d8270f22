use serde::Deserialize;

use crate::rating::resolve_rating;
use crate::traits::{CatalogItem, ContentDetails, Genre, MediaKind, SearchHit, Video};

// ── Response envelopes ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Error body TMDB returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct TmdbErrorBody {
    pub status_message: Option<String>,
}

// ── Listings ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl TmdbMovie {
    pub fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            title: self.title.or(self.name).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.or(self.first_air_date),
            backdrop_path: self.backdrop_path,
            poster_path: self.poster_path,
            vote_average: self.vote_average.unwrap_or_default(),
            genre_ids: self.genre_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbMultiResult {
    pub id: u64,
    #[serde(default)]
    pub media_type: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl TmdbMultiResult {
    /// `None` for people and any other non-title result.
    pub fn into_hit(self) -> Option<SearchHit> {
        let kind = MediaKind::from_tmdb(&self.media_type)?;
        Some(SearchHit {
            id: self.id,
            kind,
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path: self.poster_path,
            release_date: self.release_date.or(self.first_air_date),
        })
    }
}

// ── Details ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    pub videos: Option<PagedResponse<TmdbVideo>>,
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
}

// ── Release dates ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReleaseDatesResponse {
    #[serde(default)]
    pub results: Vec<ReleaseDatesByCountry>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseDatesByCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ReleaseDateEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseDateEntry {
    pub certification: Option<String>,
}

impl ReleaseDatesResponse {
    /// Certification of the first release date listed for `region`.
    pub fn certification_for(&self, region: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.iso_3166_1 == region)?
            .release_dates
            .first()?
            .certification
            .as_deref()
    }
}

// ── Merging ──────────────────────────────────────────────────────

/// Merge the two halves of a details lookup.
///
/// Either half may be missing. Without metadata the result carries only
/// the id and the rating; with neither half there is nothing to return.
pub fn assemble_details(
    id: u64,
    details: Option<TmdbMovieDetails>,
    releases: Option<ReleaseDatesResponse>,
    regional_region: &str,
    foreign_region: &str,
) -> Option<ContentDetails> {
    if details.is_none() && releases.is_none() {
        return None;
    }

    let regional = releases
        .as_ref()
        .and_then(|r| r.certification_for(regional_region));
    let foreign = releases
        .as_ref()
        .and_then(|r| r.certification_for(foreign_region));

    let Some(details) = details else {
        let rating = resolve_rating(regional, foreign, &[]);
        return Some(ContentDetails::from_rating(id, rating));
    };

    let genre_ids: Vec<u32> = details.genres.iter().map(|g| g.id).collect();
    let rating = resolve_rating(regional, foreign, &genre_ids);

    let videos = details
        .videos
        .map(|v| {
            v.results
                .into_iter()
                .map(|v| Video {
                    key: v.key,
                    site: v.site,
                    kind: v.kind,
                })
                .collect()
        })
        .unwrap_or_default();
    let cast_names = details
        .credits
        .map(|c| c.cast.into_iter().map(|m| m.name).collect())
        .unwrap_or_default();

    Some(ContentDetails {
        item: CatalogItem {
            id: details.id,
            title: details.title.unwrap_or_default(),
            overview: details.overview.unwrap_or_default(),
            release_date: details.release_date,
            backdrop_path: details.backdrop_path,
            poster_path: details.poster_path,
            vote_average: details.vote_average.unwrap_or_default(),
            genre_ids,
        },
        runtime_minutes: details.runtime.filter(|&r| r > 0),
        genres: details
            .genres
            .into_iter()
            .map(|g| Genre {
                id: g.id,
                name: g.name,
            })
            .collect(),
        cast_names,
        videos,
        rating,
        rating_only: false,
    })
}
