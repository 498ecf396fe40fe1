use serde::Serialize;

/// Operational status of a lift, as read from the `status` column of a
/// published sheet. Unrecognized values stay `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureStatus {
    Unknown,
    Operating,
    Removed,
    Construction,
}

/// Mechanical lift category. The set is closed over everything the source
/// publishes; `Carpet` is reserved for surface conveyors that appear on maps
/// but have no type vocabulary yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    Unknown,
    Chair,
    ChairHispeed,
    Bar,
    Platter,
    Carpet,
    Tram,
    Gondola,
    Chondola,
    BigGondola,
    Cabriolet,
    Funitel,
    HandleTow,
}

impl FeatureType {
    /// Whether this category runs in pulse configuration. Pulse operation
    /// occurs on fixed-grip chairs, gondolas, and chondolas.
    #[must_use]
    pub fn supports_pulse(self) -> bool {
        matches!(
            self,
            FeatureType::Chair | FeatureType::Gondola | FeatureType::Chondola
        )
    }
}

/// One lift installation at a ski area, in the order the sheet lists it.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub name: Option<String>,
    pub status: FeatureStatus,
    /// Riders per carrier. One entry for every type except `Chondola`,
    /// which carries two (chair seats, then cabin capacity). `[0]` means
    /// the capacity is unknown.
    ///
    /// Serialized as `accomodates` — the misspelling is the published key
    /// and consumers depend on it.
    #[serde(rename = "accomodates")]
    pub capacity: Vec<u32>,
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub pulse: bool,
    /// Always present in the record; currently never populated from the
    /// sheet's `notes` column.
    pub notes: String,
}

impl Default for Feature {
    fn default() -> Self {
        Feature {
            name: None,
            status: FeatureStatus::Unknown,
            capacity: vec![0],
            kind: FeatureType::Unknown,
            pulse: false,
            notes: String::new(),
        }
    }
}

/// A ski area with resolved coordinates and its full lift inventory.
#[derive(Debug, Clone, Serialize)]
pub struct SkiArea {
    pub name: String,
    /// Blog path segment the area was discovered under. Internal crawl
    /// state, not part of the output record.
    #[serde(skip)]
    pub slug: String,
    /// `(latitude, longitude)` from the matched map point.
    #[serde(rename = "latlong")]
    pub coordinates: (f64, f64),
    pub features: Vec<Feature>,
}

impl SkiArea {
    /// Returns the number of lifts recorded for this area.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}
