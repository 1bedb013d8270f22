//! Trait definitions for the movie catalog.
//!
//! The TMDB client implements [`CatalogSource`], so the page controllers
//! stay independent of the remote service. Every method absorbs failures:
//! an error and "no data" look the same to callers.

use std::future::Future;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rating::Rating;

/// A read-only movie catalog.
pub trait CatalogSource: Send + Sync {
    /// Popular titles, first page.
    fn fetch_trending(&self) -> impl Future<Output = Vec<CatalogItem>> + Send;

    /// Titles of one genre. Genre id `0` means "now playing".
    fn fetch_by_genre(
        &self,
        genre_id: u32,
        sort: SortKey,
    ) -> impl Future<Output = Vec<CatalogItem>> + Send;

    /// Full details for one title, freshly fetched on every call.
    fn fetch_details(&self, id: u64) -> impl Future<Output = Option<ContentDetails>> + Send;

    /// Multi-type search, restricted to movies and series.
    fn search(&self, query: &str) -> impl Future<Output = Vec<SearchHit>> + Send;
}

/// Sort order for discover queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "release_date.desc")]
    ReleaseDateDesc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PopularityDesc => "popularity.desc",
            Self::ReleaseDateDesc => "release_date.desc",
        }
    }
}

/// A title as listed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: f32,
    pub genre_ids: Vec<u32>,
}

impl CatalogItem {
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

/// A named genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// A video attached to a title (trailer, teaser, clip...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    pub kind: String,
}

impl Video {
    /// A trailer hosted on YouTube with a usable key.
    pub fn is_playable_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube" && !self.key.is_empty()
    }
}

/// Details merged from the metadata, release-date and rating lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub item: CatalogItem,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
    pub cast_names: Vec<String>,
    pub videos: Vec<Video>,
    pub rating: Rating,
    /// Set when the metadata lookup failed and only the rating is known.
    #[serde(default)]
    pub rating_only: bool,
}

impl ContentDetails {
    /// Details with default placeholders, used when nothing could be fetched.
    pub fn placeholder(item: CatalogItem) -> Self {
        Self {
            item,
            runtime_minutes: None,
            genres: Vec::new(),
            cast_names: Vec::new(),
            videos: Vec::new(),
            rating: Rating::DEFAULT,
            rating_only: false,
        }
    }

    /// Details for `id` where only the rating could be resolved.
    pub fn from_rating(id: u64, rating: Rating) -> Self {
        Self {
            rating,
            rating_only: true,
            ..Self::placeholder(CatalogItem {
                id,
                ..Default::default()
            })
        }
    }

    /// Whether title metadata is present, as opposed to a rating alone.
    pub fn has_metadata(&self) -> bool {
        !self.rating_only
    }

    /// First strict trailer: typed `Trailer`, hosted on YouTube, non-empty key.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.is_playable_trailer())
    }

    /// Clip for a hero slide: the first `Trailer`, else the first video.
    pub fn featured_clip(&self) -> Option<&Video> {
        let mut usable = self.videos.iter().filter(|v| !v.key.is_empty());
        usable
            .clone()
            .find(|v| v.kind == "Trailer")
            .or_else(|| usable.next())
    }
}

/// Kind of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn from_tmdb(media_type: &str) -> Option<Self> {
        match media_type {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

/// A search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

impl SearchHit {
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}
