mod grade;
mod mapping;
mod prices;
mod store;
mod variants;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cardsync")]
#[command(about = "Card catalog sync: marketplace variants, prices and grading economics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Attach marketplace products to catalog cards, set by set
    #[command(group(ArgGroup::new("target").required(true).args(["set", "all_sets"])))]
    SyncVariants {
        /// Sync a single set (e.g. sv08.5)
        #[arg(long)]
        set: Option<String>,
        /// Sync every set linked to a marketplace group
        #[arg(long)]
        all_sets: bool,
        /// Preview changes without writing to the database
        #[arg(long)]
        dry_run: bool,
        /// Only count sealed and other non-card products instead of listing them
        #[arg(long)]
        skip_sealed: bool,
    },
    /// Map marketplace groups to catalog sets via the manual mappings file
    MapGroups {
        /// Store the resolved group id and URL on each mapped set
        #[arg(long)]
        apply: bool,
        /// Print the mapping without writing the file or the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch raw and graded prices and store them with a grading assessment
    #[command(group(ArgGroup::new("target").required(true).args(["set", "all_sets"])))]
    SyncPrices {
        /// Sync prices for a single set
        #[arg(long)]
        set: Option<String>,
        /// Sync every set known to the price tracker
        #[arg(long)]
        all_sets: bool,
        /// Print computed rows without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the grading assessment for a set of prices as JSON
    Grade {
        /// Raw (ungraded) market price
        #[arg(long)]
        raw: Decimal,
        /// Grade-9 market price
        #[arg(long)]
        grade9: Option<Decimal>,
        /// Grade-10 market price
        #[arg(long)]
        grade10: Option<Decimal>,
        /// Grading policy YAML; overrides CARDSYNC_GRADING_POLICY_PATH
        #[arg(long)]
        policy: Option<PathBuf>,
    },
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    Ping,
    Migrate,
}

/// Which sets a sync command runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SetTarget {
    One(String),
    All,
}

impl SetTarget {
    fn from_args(set: Option<String>, all_sets: bool) -> Self {
        match set {
            Some(set_id) if !all_sets => Self::One(set_id),
            _ => Self::All,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = cardsync_core::load_app_config()?;
    init_tracing(&config.log_level);

    let Some(command) = cli.command else {
        println!("cardsync: no command given; run with --help for usage");
        return Ok(());
    };

    match command {
        Commands::Grade {
            raw,
            grade9,
            grade10,
            policy,
        } => {
            let policy_path = policy.or_else(|| config.grading_policy_path.clone());
            grade::run_grade(raw, grade9, grade10, policy_path.as_deref())?;
        }
        Commands::Db { command } => {
            let pool = cardsync_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    cardsync_db::ping(&pool).await?;
                    println!("database connection ok");
                }
                DbCommands::Migrate => {
                    let applied = cardsync_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::SyncVariants {
            set,
            all_sets,
            dry_run,
            skip_sealed,
        } => {
            let pool = cardsync_db::connect_pool_from_config(&config).await?;
            let options = variants::SyncOptions {
                dry_run,
                skip_sealed,
            };
            variants::run_sync_variants(
                &pool,
                &config,
                &SetTarget::from_args(set, all_sets),
                options,
            )
            .await?;
        }
        Commands::MapGroups { apply, dry_run } => {
            let pool = cardsync_db::connect_pool_from_config(&config).await?;
            mapping::run_map_groups(&pool, &config, apply, dry_run).await?;
        }
        Commands::SyncPrices {
            set,
            all_sets,
            dry_run,
        } => {
            let pool = cardsync_db::connect_pool_from_config(&config).await?;
            prices::run_sync_prices(&pool, &config, &SetTarget::from_args(set, all_sets), dry_run)
                .await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests;
