use thiserror::Error;

/// Errors from the TMDB client.
///
/// These never cross the [`CatalogSource`](crate::traits::CatalogSource)
/// boundary; they surface only through the `try_*` methods.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}
