use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod records;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{Feature, FeatureStatus, FeatureType, SkiArea};

/// Crawl roots: country listing pages on the blog, addressed by slug.
///
/// These are fixed operational inputs, not user configuration. The CLI can
/// narrow a run to one of them but never add to the set.
pub const COUNTRY_SLUGS: &[&str] = &["united-states", "canada"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
