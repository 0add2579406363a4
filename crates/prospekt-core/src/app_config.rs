/// Catalog site crawled when `PROSPEKT_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://www.prospektmaschine.de";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Scheme + host of the catalog site, without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
    pub log_level: String,
    pub connect_timeout_secs: u64,
}
