//! Client side of the movie catalog: the [`traits::CatalogSource`] contract,
//! the TMDB implementation, and regional rating resolution.

pub mod rating;
pub mod tmdb;
pub mod traits;
