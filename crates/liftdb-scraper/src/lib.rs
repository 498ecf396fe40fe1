pub mod classify;
pub mod crawl;
pub mod error;
pub mod map_payload;
pub mod page;
pub mod points;
pub mod sheet;
pub mod types;

pub use classify::{classify_lift_type, LiftClass};
pub use crawl::{CrawlRules, Crawler};
pub use error::ScrapeError;
pub use page::PageClient;
pub use types::{AreaLink, MapPoint, Territory};
