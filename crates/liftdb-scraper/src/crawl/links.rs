//! HTML and URL plumbing for the crawl: listing links, embedded iframes,
//! and the rewrites that turn embed URLs into fetchable documents.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ScrapeError;

/// Extracts `(name, slug)` pairs from a listing post's `<li><a href>` items.
///
/// Plain-HTTP links are upgraded to HTTPS before the prefix check. The slug
/// is the path after `link_prefix` with at most one trailing slash removed.
///
/// # Errors
///
/// - [`ScrapeError::MalformedPayload`] for a list item with no anchor or an
///   anchor with no `href`.
/// - [`ScrapeError::UrlScheme`] for a link outside `link_prefix`.
pub(crate) fn parse_listing_links(
    html: &str,
    link_prefix: &str,
) -> Result<Vec<(String, String)>, ScrapeError> {
    let fragment = Html::parse_fragment(html);
    let item_selector = Selector::parse("li").expect("valid selector");
    let anchor_selector = Selector::parse("a").expect("valid selector");

    let mut links = Vec::new();
    for item in fragment.select(&item_selector) {
        let anchor = item
            .select(&anchor_selector)
            .next()
            .ok_or_else(|| malformed_listing("list item has no link"))?;
        let name = anchor.text().collect::<String>().trim().to_string();
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| malformed_listing("list item link has no href"))?;

        let link = require_prefix(href.replace("http://", "https://"), link_prefix)?;
        let rest = &link[link_prefix.len()..];
        let slug = rest.strip_suffix('/').unwrap_or(rest).to_string();
        links.push((name, slug));
    }

    Ok(links)
}

/// Returns the `src` of the first `<iframe>` in `html`. The `context` names
/// the page kind in the error.
pub(crate) fn first_iframe_src(html: &str, context: &str) -> Result<String, ScrapeError> {
    let fragment = Html::parse_fragment(html);
    let iframe_selector = Selector::parse("iframe").expect("valid selector");

    let iframe = fragment
        .select(&iframe_selector)
        .next()
        .ok_or_else(|| ScrapeError::MalformedPayload {
            context: context.to_string(),
            reason: "no iframe embed found".to_string(),
        })?;
    let src = iframe
        .value()
        .attr("src")
        .ok_or_else(|| ScrapeError::MalformedPayload {
            context: context.to_string(),
            reason: "iframe embed has no src".to_string(),
        })?;

    Ok(src.to_string())
}

/// Rewrites a map embed `src` into the viewer URL that carries the full
/// point payload: the account path segment goes, HTTP upgrades to HTTPS,
/// and the embed endpoint becomes the view endpoint.
pub(crate) fn derive_map_url(
    embed_src: &str,
    map_url_prefix: &str,
) -> Result<String, ScrapeError> {
    let url = embed_src
        .replace("/u/0", "")
        .replace("http://", "https://")
        .replace("/embed?", "/view?");
    require_prefix(url, map_url_prefix)
}

/// Finds the first `&gid=<digits>` parameter in a sheet page body.
pub(crate) fn extract_gid(body: &str) -> Option<&str> {
    let gid = Regex::new(r"&gid=\d+").expect("valid regex");
    gid.find(body).map(|m| m.as_str())
}

/// Passes `url` through when it starts with `expected`, otherwise fails
/// with [`ScrapeError::UrlScheme`].
pub(crate) fn require_prefix(url: String, expected: &str) -> Result<String, ScrapeError> {
    if url.starts_with(expected) {
        Ok(url)
    } else {
        Err(ScrapeError::UrlScheme {
            url,
            expected: expected.to_string(),
        })
    }
}

fn malformed_listing(reason: &str) -> ScrapeError {
    ScrapeError::MalformedPayload {
        context: "listing".to_string(),
        reason: reason.to_string(),
    }
}
