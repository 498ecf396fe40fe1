//! WordPress public-API response types.
//!
//! Only the slice of the post envelope the pipeline reads is modeled here.
//! The API returns far more (author, metadata, taxonomy, comment counts);
//! serde drops the rest on the floor.

use serde::Deserialize;

/// A published post, reduced to its rendered body.
///
/// `content` is an HTML fragment, not a full document — listing posts hold
/// the link lists, area posts hold the sheet embed.
#[derive(Debug, Deserialize)]
pub struct Post {
    pub content: String,
}
