//! Decoder for the `_pageData` payload embedded in a map document.
//!
//! The map host renders markers client-side from a JSON array assigned to
//! `var _pageData` as a quoted, backslash-escaped string literal. The array
//! is undocumented and positional; the index paths below were recovered by
//! observation and double as drift detectors. Every marker on the lift
//! layer carries the winter-skilift stock icon, so a foreign icon means the
//! map mixed layers and the run must stop rather than drop points.
//!
//! Observed shape:
//!
//! ```text
//! [_, ["mf.map", ..6.., [[_, _, _, _, <points>]]]]
//! point: [[<icon url>], ..4.., [[_, [lat, lon]]], [[<name>]]]
//! ```

use regex::Regex;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::types::MapPoint;

const SKILIFT_ICON_SUFFIX: &str = "/1411-rec-winter-skilift.png";

/// Decodes all lift-layer markers from a map document, in source order.
///
/// # Errors
///
/// Returns [`ScrapeError::Deserialize`] when the embedded string is not
/// JSON, and [`ScrapeError::MalformedPayload`] for every structural
/// mismatch: zero or duplicate `_pageData` assignments, a missing
/// `"mf.map"` tag, an absent or empty point list, a foreign icon, or a
/// coordinate pair that is not two numbers.
pub fn decode_map_points(document: &str) -> Result<Vec<MapPoint>, ScrapeError> {
    let raw = extract_page_data(document)?;
    let unescaped = raw.replace("\\\"", "\"");

    let payload: Value =
        serde_json::from_str(&unescaped).map_err(|e| ScrapeError::Deserialize {
            context: "map _pageData".to_string(),
            source: e,
        })?;

    let top = payload
        .as_array()
        .ok_or_else(|| malformed("top level is not an array"))?;
    if top.len() != 2 {
        return Err(malformed(&format!(
            "expected 2 top-level elements, found {}",
            top.len()
        )));
    }

    let map_data = &top[1];
    if map_data.get(0).and_then(Value::as_str) != Some("mf.map") {
        return Err(malformed("missing \"mf.map\" tag"));
    }

    let entries = map_data
        .get(6)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(4))
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("no point list at [6][0][4]"))?;
    if entries.is_empty() {
        return Err(malformed("point list is empty"));
    }

    entries.iter().map(decode_point).collect()
}

/// Locates the single `_pageData` assignment and returns the escaped string
/// literal between its quotes.
fn extract_page_data(document: &str) -> Result<&str, ScrapeError> {
    let re = Regex::new(r#"var _pageData = "(.*)";"#).expect("valid regex");

    let mut captures = re.captures_iter(document);
    let first = captures
        .next()
        .ok_or_else(|| malformed("no _pageData assignment found"))?;
    if captures.next().is_some() {
        return Err(malformed("multiple _pageData assignments found"));
    }

    Ok(first.get(1).map_or("", |m| m.as_str()))
}

fn decode_point(entry: &Value) -> Result<MapPoint, ScrapeError> {
    let icon = entry
        .get(0)
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("point entry has no icon URL"))?;
    if !icon.ends_with(SKILIFT_ICON_SUFFIX) {
        return Err(malformed(&format!(
            "foreign icon \"{icon}\" on the lift layer"
        )));
    }

    let coordinates = entry
        .get(4)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(1))
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("point entry has no coordinate pair"))?;
    if coordinates.len() != 2 {
        return Err(malformed(&format!(
            "expected 2 coordinates, found {}",
            coordinates.len()
        )));
    }
    let latitude = coordinates[0]
        .as_f64()
        .ok_or_else(|| malformed("latitude is not a number"))?;
    let longitude = coordinates[1]
        .as_f64()
        .ok_or_else(|| malformed("longitude is not a number"))?;

    let name = entry
        .get(5)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("point entry has no name"))?
        .trim()
        .to_string();

    Ok(MapPoint {
        name,
        latitude,
        longitude,
    })
}

fn malformed(reason: &str) -> ScrapeError {
    ScrapeError::MalformedPayload {
        context: "map document".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps a payload the way the map host serves it: a JSON array
    /// flattened into a quoted script literal with escaped quotes.
    fn map_document(payload: &Value) -> String {
        let escaped = payload.to_string().replace('"', "\\\"");
        format!(
            "<!DOCTYPE html><html><head><script>var _pageData = \"{escaped}\";</script></head></html>"
        )
    }

    fn lift_point(name: &str, lat: f64, lon: f64) -> Value {
        serde_json::json!([
            ["https://www.gstatic.com/mapspro/images/stock/1411-rec-winter-skilift.png"],
            null,
            null,
            null,
            [[null, [lat, lon]]],
            [[name]]
        ])
    }

    fn payload_with_points(points: Vec<Value>) -> Value {
        serde_json::json!([
            null,
            ["mf.map", null, null, null, null, null, [[null, null, null, null, points]]]
        ])
    }

    #[test]
    fn decodes_points_in_document_order() {
        let payload = payload_with_points(vec![
            lift_point("Alyeska Resort", 60.961, -149.094),
            lift_point("Eaglecrest", 58.274, -134.515),
        ]);
        let points = decode_map_points(&map_document(&payload)).expect("should decode");

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Alyeska Resort");
        assert_eq!(points[0].latitude, 60.961);
        assert_eq!(points[0].longitude, -149.094);
        assert_eq!(points[1].name, "Eaglecrest");
    }

    #[test]
    fn point_names_are_trimmed() {
        let payload = payload_with_points(vec![lift_point("  Mount Eyak ", 60.552, -145.748)]);
        let points = decode_map_points(&map_document(&payload)).expect("should decode");
        assert_eq!(points[0].name, "Mount Eyak");
    }

    #[test]
    fn fails_without_page_data() {
        let result = decode_map_points("<html><body>no script here</body></html>");
        assert!(
            matches!(result, Err(ScrapeError::MalformedPayload { .. })),
            "expected MalformedPayload, got: {result:?}"
        );
    }

    #[test]
    fn fails_with_duplicate_page_data() {
        let payload = payload_with_points(vec![lift_point("Alyeska", 60.9, -149.0)]);
        let document = format!("{}\n{}", map_document(&payload), map_document(&payload));
        let result = decode_map_points(&document);
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_when_payload_is_not_json() {
        let result =
            decode_map_points("<script>var _pageData = \"not a payload\";</script>");
        assert!(
            matches!(result, Err(ScrapeError::Deserialize { .. })),
            "expected Deserialize, got: {result:?}"
        );
    }

    #[test]
    fn fails_when_tag_is_not_mf_map() {
        let payload = serde_json::json!([
            null,
            ["mf.other", null, null, null, null, null, [[null, null, null, null, []]]]
        ]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_when_top_level_has_extra_elements() {
        let payload = serde_json::json!([null, ["mf.map"], null]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_when_point_list_is_missing() {
        let payload = serde_json::json!([null, ["mf.map", null, null]]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_when_point_list_is_empty() {
        let payload = payload_with_points(vec![]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_on_foreign_icon() {
        let mut point = lift_point("Parking Lot", 60.9, -149.0);
        point[0][0] = serde_json::json!(
            "https://www.gstatic.com/mapspro/images/stock/1197-fac-parking.png"
        );
        let payload = payload_with_points(vec![point]);
        let result = decode_map_points(&map_document(&payload));
        assert!(
            matches!(result, Err(ScrapeError::MalformedPayload { .. })),
            "expected MalformedPayload, got: {result:?}"
        );
    }

    #[test]
    fn fails_on_short_coordinate_pair() {
        let mut point = lift_point("Alyeska", 60.9, -149.0);
        point[4][0][1] = serde_json::json!([60.9]);
        let payload = payload_with_points(vec![point]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }

    #[test]
    fn fails_on_non_numeric_coordinate() {
        let mut point = lift_point("Alyeska", 60.9, -149.0);
        point[4][0][1] = serde_json::json!(["60.9", "-149.0"]);
        let payload = payload_with_points(vec![point]);
        let result = decode_map_points(&map_document(&payload));
        assert!(matches!(result, Err(ScrapeError::MalformedPayload { .. })));
    }
}
