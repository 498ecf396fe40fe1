use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("blog API error: {0}")]
    WordPress(#[from] liftdb_wp::WordPressError),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A fetched document does not have the structure the pipeline relies on.
    /// Treated as format drift and fatal for the whole run.
    #[error("malformed {context}: {reason}")]
    MalformedPayload { context: String, reason: String },

    /// A sheet header cell outside the known column vocabulary.
    #[error("unknown sheet column \"{column}\"")]
    UnknownColumn { column: String },

    /// A `type` cell the classification grammar cannot place.
    #[error("unknown lift type \"{text}\"")]
    UnknownLiftType { text: String },

    #[error("no map point matches ski area \"{name}\"")]
    PointNotFound { name: String },

    /// A derived URL failed its expected-prefix validation.
    #[error("URL \"{url}\" does not start with \"{expected}\"")]
    UrlScheme { url: String, expected: String },
}
