/// Runtime as `"2h 5min"`, or `fallback` when unknown.
pub fn runtime(minutes: Option<u32>, fallback: &str) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}min", m / 60, m % 60),
        _ => fallback.to_string(),
    }
}

/// Vote average (0-10) as a whole match percentage.
pub fn match_percent(vote_average: f32) -> u32 {
    (vote_average * 10.0).floor().clamp(0.0, 100.0) as u32
}

pub fn year(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Absolute image URL for a catalog image path.
pub fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{}{path}", base.trim_end_matches('/')))
}

/// Join names with `", "`, or return `fallback` when there are none.
pub fn join_or<S: AsRef<str>>(names: &[S], fallback: &str) -> String {
    if names.is_empty() {
        return fallback.to_string();
    }
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
