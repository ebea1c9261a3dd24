use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Read `.env` (if present) and build [`AppConfig`] from the environment.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Build [`AppConfig`] from the process environment only; `.env` is not read.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Assemble the config from `lookup`, applying defaults and validation.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|s| !s.is_empty());
    let env = parse_environment(&or_default("CARDSYNC_ENV", "development"))?;
    let log_level = or_default("CARDSYNC_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("CARDSYNC_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("CARDSYNC_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "CARDSYNC_DB_MIN_CONNECTIONS",
            format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("CARDSYNC_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let marketplace_base_url = or_default("CARDSYNC_MARKETPLACE_BASE_URL", "https://tcgcsv.com");
    let marketplace_category_id = parse_u32("CARDSYNC_MARKETPLACE_CATEGORY_ID", "3")?;
    let price_tracker_base_url = or_default(
        "CARDSYNC_PRICE_TRACKER_BASE_URL",
        "https://www.pokemonpricetracker.com/api/v2",
    );
    let price_tracker_api_key = lookup("PRICE_TRACKER_API_KEY")
        .ok()
        .filter(|s| !s.is_empty());

    let request_timeout_secs = parse_u64("CARDSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CARDSYNC_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("CARDSYNC_USER_AGENT", "cardsync/0.1 (catalog-sync)");

    let group_mappings_path = PathBuf::from(or_default(
        "CARDSYNC_GROUP_MAPPINGS_PATH",
        "./manual_mappings.json",
    ));
    let unmapped_report_path = PathBuf::from(or_default(
        "CARDSYNC_UNMAPPED_REPORT_PATH",
        "./unmapped_cards.json",
    ));
    let grading_policy_path = lookup("CARDSYNC_GRADING_POLICY_PATH")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        marketplace_base_url,
        marketplace_category_id,
        price_tracker_base_url,
        price_tracker_api_key,
        request_timeout_secs,
        user_agent,
        group_mappings_path,
        unmapped_report_path,
        grading_policy_path,
    })
}

/// `CARDSYNC_ENV` value to [`Environment`].
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CARDSYNC_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
