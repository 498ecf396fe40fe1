/// Runtime settings shared by the clients and the CLI. Every field has a
/// default; the environment only overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Per-request timeout applied by both HTTP clients.
    pub request_timeout_secs: u64,
    /// User agent sent on map and sheet fetches. The blog's API accepts
    /// anything, but the map host rejects the reqwest default.
    pub user_agent: String,
}
