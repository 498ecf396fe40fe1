/// A territory listed on a country page: region display text plus the blog
/// slug its own page lives under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub name: String,
    pub slug: String,
}

/// A ski area listed on a territory page, before its map point is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaLink {
    pub name: String,
    pub slug: String,
}

/// A named marker decoded from a territory's map document. Scoped to
/// processing one territory and discarded once its ski areas are matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
