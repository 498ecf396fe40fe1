//! Crawl orchestration: country roots to territories to ski areas to
//! published lift tables.
//!
//! Every step is fetch-then-parse against a live page, so any failure is
//! treated as format drift and aborts the whole run rather than skipping
//! records silently.

mod links;

use liftdb_core::SkiArea;
use liftdb_wp::WordPressClient;

use crate::error::ScrapeError;
use crate::map_payload::decode_map_points;
use crate::page::PageClient;
use crate::points::match_point;
use crate::sheet::parse_lift_table;
use crate::types::{AreaLink, MapPoint, Territory};

/// URL prefixes the crawl validates derived links against.
///
/// Production uses [`CrawlRules::default`]; tests override `sheet_url_prefix`
/// to point the sheet flow at a mock server.
#[derive(Debug, Clone)]
pub struct CrawlRules {
    /// Prefix every listing link must carry after the HTTPS upgrade.
    pub blog_link_prefix: String,
    /// Prefix a derived map viewer URL must carry.
    pub map_url_prefix: String,
    /// Prefix a resolved sheet URL must carry.
    pub sheet_url_prefix: String,
}

impl Default for CrawlRules {
    fn default() -> Self {
        Self {
            blog_link_prefix: "https://liftblog.com/".to_string(),
            map_url_prefix: "https://www.google.com/maps".to_string(),
            sheet_url_prefix: "https://docs.google.com/spreadsheets".to_string(),
        }
    }
}

/// Walks the blog's listing hierarchy and assembles complete [`SkiArea`]
/// records, one fetch at a time.
pub struct Crawler {
    wp: WordPressClient,
    pages: PageClient,
    rules: CrawlRules,
}

impl Crawler {
    #[must_use]
    pub fn new(wp: WordPressClient, pages: PageClient) -> Self {
        Self::with_rules(wp, pages, CrawlRules::default())
    }

    #[must_use]
    pub fn with_rules(wp: WordPressClient, pages: PageClient, rules: CrawlRules) -> Self {
        Self { wp, pages, rules }
    }

    /// Crawls every country root in `countries`, passing each completed ski
    /// area to `emit` as soon as it is assembled. Returns how many were
    /// emitted.
    ///
    /// # Errors
    ///
    /// Any fetch, decode, or parse failure stops the crawl; records emitted
    /// before the failure have already been handed to `emit`.
    pub async fn run<F>(&self, countries: &[&str], mut emit: F) -> Result<usize, ScrapeError>
    where
        F: FnMut(SkiArea),
    {
        let mut emitted = 0;
        for country in countries {
            tracing::info!(country = %country, "crawling country");
            for territory in self.fetch_territories(country).await? {
                emitted += self.process_territory(&territory, &mut emit).await?;
            }
        }
        Ok(emitted)
    }

    /// Fetches a country root post and lists the territories it links.
    ///
    /// # Errors
    ///
    /// Fails on fetch errors, list items without links, or links outside
    /// the blog.
    pub async fn fetch_territories(
        &self,
        country_slug: &str,
    ) -> Result<Vec<Territory>, ScrapeError> {
        let content = self.wp.get_post_content(country_slug).await?;
        let links = links::parse_listing_links(&content, &self.rules.blog_link_prefix)?;

        Ok(links
            .into_iter()
            .map(|(name, slug)| Territory { name, slug })
            .collect())
    }

    /// Processes one territory: decode its map once, then build a record
    /// for every ski area it lists. The territory post body carries both
    /// the map embed and the ski area listing, so it is fetched once.
    async fn process_territory<F>(
        &self,
        territory: &Territory,
        emit: &mut F,
    ) -> Result<usize, ScrapeError>
    where
        F: FnMut(SkiArea),
    {
        tracing::info!(territory = %territory.name, "crawling territory");
        let content = self.wp.get_post_content(&territory.slug).await?;

        let embed_src = links::first_iframe_src(&content, "territory page")?;
        let map_url = links::derive_map_url(&embed_src, &self.rules.map_url_prefix)?;
        let map_body = self.pages.fetch_text(&map_url).await?;
        let points = decode_map_points(&map_body)?;

        let mut emitted = 0;
        for (name, slug) in links::parse_listing_links(&content, &self.rules.blog_link_prefix)? {
            let area = AreaLink { name, slug };
            emit(self.process_ski_area(&area, &points).await?);
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Builds one complete ski area record: coordinates from the territory
    /// map, features from the area's published sheet.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::PointNotFound`] when no map point matches the area's
    ///   name.
    /// - Any fetch or parse failure along the sheet flow.
    pub async fn process_ski_area(
        &self,
        area: &AreaLink,
        points: &[MapPoint],
    ) -> Result<SkiArea, ScrapeError> {
        tracing::info!(ski_area = %area.name, "crawling ski area");

        let point = match_point(&area.name, points).ok_or_else(|| ScrapeError::PointNotFound {
            name: area.name.clone(),
        })?;

        let content = self.wp.get_post_content(&area.slug).await?;
        let sheet_url = self.resolve_sheet_url(&content).await?;
        let sheet_body = self.pages.fetch_text(&sheet_url).await?;
        let features = parse_lift_table(&sheet_body)?;
        tracing::debug!(ski_area = %area.name, lifts = features.len(), "parsed lift table");

        Ok(SkiArea {
            name: area.name.clone(),
            slug: area.slug.clone(),
            coordinates: (point.latitude, point.longitude),
            features,
        })
    }

    /// Resolves the published-sheet URL from a ski area page: the embed's
    /// `src` with HTML entities decoded, a tab `gid` discovered from the
    /// sheet page itself when the embed omits one, and the `/pubhtml/sheet`
    /// endpoint swap.
    async fn resolve_sheet_url(&self, area_html: &str) -> Result<String, ScrapeError> {
        let mut url = links::first_iframe_src(area_html, "ski area page")?.replace("&amp;", "&");

        if !url.contains("gid=") {
            let body = self.pages.fetch_text(&url).await?;
            let gid = links::extract_gid(&body).ok_or_else(|| ScrapeError::MalformedPayload {
                context: "sheet page".to_string(),
                reason: "no gid parameter found".to_string(),
            })?;
            url.push_str(gid);
        }

        let url = url.replace("/pubhtml", "/pubhtml/sheet");
        links::require_prefix(url, &self.rules.sheet_url_prefix)
    }
}
