//! Matching listed ski areas to decoded map points.
//!
//! Listing text and map labels for the same area drift apart in punctuation
//! (curly versus straight apostrophes, en dash versus hyphen) and in suffix
//! detail ("Alyeska" on the list, "Alyeska Resort" on the map), so matching
//! normalizes punctuation and falls back from equality to prefix.

use crate::types::MapPoint;

/// Canonicalizes punctuation that differs between listing text and map
/// labels: the right single quotation mark becomes an apostrophe, the en
/// dash a hyphen.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.replace('\u{2019}', "'").replace('\u{2013}', "-")
}

/// Finds the map point for a ski-area name.
///
/// Pass 1 takes the first point whose normalized name equals the normalized
/// target. Only when no point is equal does pass 2 run, taking the first
/// point whose normalized name starts with the normalized target. `None`
/// means the map and the listing disagree; callers treat that as fatal.
#[must_use]
pub fn match_point<'a>(name: &str, points: &'a [MapPoint]) -> Option<&'a MapPoint> {
    let target = normalize_name(name);

    if let Some(point) = points.iter().find(|p| normalize_name(&p.name) == target) {
        return Some(point);
    }

    points
        .iter()
        .find(|p| normalize_name(&p.name).starts_with(&target))
}
