use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// `None` is allowed so that pure commands (`grade`) run without a database.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Base URL of the marketplace catalog mirror, e.g. `https://tcgcsv.com`.
    pub marketplace_base_url: String,
    /// Marketplace category the card game lives under (`3` for Pokemon).
    pub marketplace_category_id: u32,
    pub price_tracker_base_url: String,
    pub price_tracker_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// `group_id -> set` mapping file consulted before automatic set resolution.
    pub group_mappings_path: PathBuf,
    /// Where `sync-variants` writes its unmapped-cards report.
    pub unmapped_report_path: PathBuf,
    /// Optional YAML override for the grading fee ladder and thresholds.
    pub grading_policy_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("marketplace_base_url", &self.marketplace_base_url)
            .field("marketplace_category_id", &self.marketplace_category_id)
            .field("price_tracker_base_url", &self.price_tracker_base_url)
            .field(
                "price_tracker_api_key",
                &self.price_tracker_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("group_mappings_path", &self.group_mappings_path)
            .field("unmapped_report_path", &self.unmapped_report_path)
            .field("grading_policy_path", &self.grading_policy_path)
            .finish()
    }
}
