use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::CatalogError;
use super::types::{
    assemble_details, PagedResponse, ReleaseDatesResponse, TmdbErrorBody, TmdbMovie,
    TmdbMovieDetails, TmdbMultiResult,
};
use crate::traits::{CatalogItem, CatalogSource, ContentDetails, SearchHit, SortKey};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Request settings shared by every call.
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub base_url: String,
    /// Pinned `language` parameter.
    pub language: String,
    /// Region whose certification is used directly.
    pub regional_region: String,
    /// Region whose certification is mapped when the regional one is missing.
    pub foreign_region: String,
    pub search_limit: usize,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            language: "pt-BR".to_string(),
            regional_region: "BR".to_string(),
            foreign_region: "US".to_string(),
            search_limit: 6,
        }
    }
}

/// TMDB v3 REST client.
pub struct TmdbClient {
    access_token: String,
    http: Client,
    settings: TmdbSettings,
}

impl TmdbClient {
    pub fn new(access_token: String) -> Self {
        Self::with_settings(access_token, TmdbSettings::default())
    }

    pub fn with_settings(access_token: String, settings: TmdbSettings) -> Self {
        Self {
            access_token,
            http: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &TmdbSettings {
        &self.settings
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or(body)
                });
            Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Authenticated GET with the pinned language.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let resp = self
            .http
            .get(format!("{}{path}", self.settings.base_url))
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .query(&[("language", self.settings.language.as_str())])
            .query(query)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn get_listing(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let page: PagedResponse<TmdbMovie> = self.get_json(path, query).await?;
        Ok(page.results.into_iter().map(TmdbMovie::into_item).collect())
    }

    pub async fn try_trending(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.get_listing("/movie/popular", &[("page", "1")]).await
    }

    pub async fn try_by_genre(
        &self,
        genre_id: u32,
        sort: SortKey,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        if genre_id == 0 {
            return self.get_listing("/movie/now_playing", &[]).await;
        }
        let genre = genre_id.to_string();
        self.get_listing(
            "/discover/movie",
            &[("with_genres", genre.as_str()), ("sort_by", sort.as_str())],
        )
        .await
    }

    pub async fn try_movie_details(&self, id: u64) -> Result<TmdbMovieDetails, CatalogError> {
        self.get_json(
            &format!("/movie/{id}"),
            &[("append_to_response", "videos,credits")],
        )
        .await
    }

    pub async fn try_release_dates(&self, id: u64) -> Result<ReleaseDatesResponse, CatalogError> {
        self.get_json(&format!("/movie/{id}/release_dates"), &[]).await
    }

    pub async fn try_search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let page: PagedResponse<TmdbMultiResult> = self
            .get_json("/search/multi", &[("query", query), ("page", "1")])
            .await?;

        Ok(page
            .results
            .into_iter()
            .filter_map(TmdbMultiResult::into_hit)
            .take(self.settings.search_limit)
            .collect())
    }
}

/// Log a failed call and degrade it to an empty value.
fn absorb<T: Default>(operation: &str, result: Result<T, CatalogError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(operation, error = %e, "catalog request failed");
        T::default()
    })
}

impl CatalogSource for TmdbClient {
    async fn fetch_trending(&self) -> Vec<CatalogItem> {
        absorb("trending", self.try_trending().await)
    }

    async fn fetch_by_genre(&self, genre_id: u32, sort: SortKey) -> Vec<CatalogItem> {
        absorb("by_genre", self.try_by_genre(genre_id, sort).await)
    }

    async fn fetch_details(&self, id: u64) -> Option<ContentDetails> {
        let (details, releases) =
            tokio::join!(self.try_movie_details(id), self.try_release_dates(id));

        let details = details
            .map_err(|e| tracing::warn!(id, error = %e, "details request failed"))
            .ok();
        let releases = releases
            .map_err(|e| tracing::warn!(id, error = %e, "release dates request failed"))
            .ok();

        assemble_details(
            id,
            details,
            releases,
            &self.settings.regional_region,
            &self.settings.foreign_region,
        )
    }

    async fn search(&self, query: &str) -> Vec<SearchHit> {
        absorb("search", self.try_search(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> TmdbClient {
        TmdbClient::with_settings(
            "token".into(),
            TmdbSettings {
                // Nothing listens on the discard port.
                base_url: "http://127.0.0.1:9".into(),
                ..TmdbSettings::default()
            },
        )
    }

    #[tokio::test]
    async fn test_blank_search_skips_network() {
        let client = unreachable_client();
        let hits = client.try_search("   ").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_absorbed() {
        let client = unreachable_client();
        assert!(client.try_trending().await.is_err());
        assert!(client.fetch_trending().await.is_empty());
        assert!(client.fetch_by_genre(28, SortKey::default()).await.is_empty());
        assert!(client.fetch_details(550).await.is_none());
        assert!(client.search("duna").await.is_empty());
    }

    #[test]
    fn test_default_settings() {
        let client = TmdbClient::new("abc".into());
        assert_eq!(client.auth_header(), "Bearer abc");
        assert_eq!(client.settings().language, "pt-BR");
        assert_eq!(client.settings().search_limit, 6);
    }
}
