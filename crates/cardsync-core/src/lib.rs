pub mod app_config;
pub mod catalog;
pub mod config;
pub mod grading_policy;
pub mod mappings;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CardVariantEntry, CatalogKey, PatternType, PrintingFlags, VariantType};
pub use config::{load_app_config, load_app_config_from_env};
pub use grading_policy::{load_grading_policy, FeeTier, GradingPolicy};
pub use mappings::{load_group_mappings, save_group_mappings, GroupMapping, GroupMappings};
pub use products::{ExtendedAttribute, MarketplaceProduct};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to access {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    YamlParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
