//! Classification grammar for the free-text `type` column of a lift sheet.
//!
//! The vocabulary is an ad-hoc accumulation from years of hand-entered
//! spreadsheet cells; the literal and prefix tables below reproduce it
//! exactly. Anything outside the tables is a hard error rather than a skip,
//! so new vocabulary shows up as a failed run instead of a silently
//! unclassified lift.

use serde::Serialize;

use liftdb_core::FeatureType;

use crate::error::ScrapeError;

/// Structured reading of one `type` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiftClass {
    pub kind: FeatureType,
    /// Riders per carrier; two entries for a chondola (chair side, then
    /// cabin side), `[0]` when the vocabulary does not state a capacity.
    pub capacity: Vec<u32>,
    pub pulse: bool,
}

/// `<prefix> N` families: a category word followed by a carrier capacity.
const PREFIX_FAMILIES: &[(&str, FeatureType, bool)] = &[
    ("pulse gondola ", FeatureType::Gondola, true),
    ("3s gondola ", FeatureType::BigGondola, false),
    ("gondola ", FeatureType::Gondola, false),
    ("cabriolet ", FeatureType::Cabriolet, false),
    ("funitel ", FeatureType::Funitel, false),
    ("tram ", FeatureType::Tram, false),
];

/// `<prefix> A/B` families: chondolas carry chair and cabin capacities.
const CHONDOLA_FAMILIES: &[(&str, bool)] = &[("pulse chondola ", true), ("chondola ", false)];

/// Classifies a `type` cell into a [`LiftClass`].
///
/// Input is trimmed and lower-cased, then matched against the exact-literal
/// table first and the prefix families second. `Ok(None)` is the one cell
/// the grammar recognizes but cannot represent: `"double/t-bar"`, a single
/// installation alternating chair and t-bar carriers.
///
/// # Errors
///
/// Returns [`ScrapeError::UnknownLiftType`] for any text outside the
/// grammar, including a matched prefix whose capacity tail is not an
/// unsigned integer.
pub fn classify_lift_type(text: &str) -> Result<Option<LiftClass>, ScrapeError> {
    let normalized = text.trim().to_lowercase();

    if let Some(class) = exact_class(&normalized) {
        return Ok(Some(class));
    }

    if normalized == "double/t-bar" {
        return Ok(None);
    }

    for &(prefix, kind, pulse) in PREFIX_FAMILIES {
        if let Some(tail) = normalized.strip_prefix(prefix) {
            let capacity = parse_capacity(tail, &normalized)?;
            return Ok(Some(LiftClass {
                kind,
                capacity: vec![capacity],
                pulse,
            }));
        }
    }

    for &(prefix, pulse) in CHONDOLA_FAMILIES {
        if let Some(tail) = normalized.strip_prefix(prefix) {
            let capacity = parse_split_capacity(tail, &normalized)?;
            return Ok(Some(LiftClass {
                kind: FeatureType::Chondola,
                capacity,
                pulse,
            }));
        }
    }

    Err(ScrapeError::UnknownLiftType { text: normalized })
}

/// The exact-literal table. An empty cell is vocabulary too: it reads as an
/// unclassified lift, not an error.
fn exact_class(text: &str) -> Option<LiftClass> {
    let (kind, capacity, pulse) = match text {
        "" => (FeatureType::Unknown, vec![0], false),
        "single" => (FeatureType::Chair, vec![1], false),
        "double" => (FeatureType::Chair, vec![2], false),
        "triple" => (FeatureType::Chair, vec![3], false),
        "quad" => (FeatureType::Chair, vec![4], false),
        "high speed triple" => (FeatureType::ChairHispeed, vec![3], false),
        "high speed quad" => (FeatureType::ChairHispeed, vec![4], false),
        "high speed six" => (FeatureType::ChairHispeed, vec![6], false),
        "high speed eight" => (FeatureType::ChairHispeed, vec![8], false),
        "t-bar" => (FeatureType::Bar, vec![2], false),
        "j-bar" => (FeatureType::Bar, vec![1], false),
        "platter" => (FeatureType::Platter, vec![1], false),
        "handle tow" => (FeatureType::HandleTow, vec![1], false),
        "pulse double" => (FeatureType::Chair, vec![2], true),
        "pulse quad" => (FeatureType::Chair, vec![4], true),
        // Bare "pulse gondola" cells never state a capacity; keep the
        // unknown sentinel rather than guessing one.
        "pulse gondola" => (FeatureType::Gondola, vec![0], true),
        _ => return None,
    };
    Some(LiftClass {
        kind,
        capacity,
        pulse,
    })
}

fn parse_capacity(tail: &str, cell: &str) -> Result<u32, ScrapeError> {
    tail.trim()
        .parse::<u32>()
        .map_err(|_| ScrapeError::UnknownLiftType {
            text: cell.to_string(),
        })
}

fn parse_split_capacity(tail: &str, cell: &str) -> Result<Vec<u32>, ScrapeError> {
    let unknown = || ScrapeError::UnknownLiftType {
        text: cell.to_string(),
    };

    let (chair, cabin) = tail.trim().split_once('/').ok_or_else(unknown)?;
    let chair = chair.parse::<u32>().map_err(|_| unknown())?;
    let cabin = cabin.parse::<u32>().map_err(|_| unknown())?;
    Ok(vec![chair, cabin])
}
