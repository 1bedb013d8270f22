//! TMDB movie genre names, as served for the pinned pt-BR locale.

/// Display name for a TMDB movie genre id.
pub fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Ação",
        12 => "Aventura",
        16 => "Animação",
        35 => "Comédia",
        80 => "Crime",
        99 => "Documentário",
        18 => "Drama",
        10751 => "Família",
        14 => "Fantasia",
        36 => "História",
        27 => "Terror",
        10402 => "Música",
        9648 => "Mistério",
        10749 => "Romance",
        878 => "Ficção Científica",
        10770 => "Cinema TV",
        53 => "Thriller",
        10752 => "Guerra",
        37 => "Faroeste",
        _ => return None,
    };
    Some(name)
}

/// Names for up to `limit` known genres, in the given order.
pub fn genre_names(ids: &[u32], limit: usize) -> Vec<&'static str> {
    ids.iter()
        .take(limit)
        .filter_map(|&id| genre_name(id))
        .collect()
}
