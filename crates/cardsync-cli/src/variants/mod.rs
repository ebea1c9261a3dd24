//! `sync-variants`: attach marketplace products to catalog cards.
//!
//! Per set, operator actions from the previous run's report are applied
//! first, then the remaining products are resolved automatically. Products
//! that cannot be matched end up in a fresh unmapped report. Per-set and
//! per-card failures are logged and counted, never fatal.

mod actions;
mod resolve;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;

use cardsync_core::{CardVariantEntry, MarketplaceProduct};
use cardsync_db::{CardProductsUpdate, DbError};
use cardsync_resolver::{primary_entry, InputActions, UnmappedRecord, UnmappedReport, VariantFlags};
use cardsync_sources::MarketplaceClient;

use crate::store::{CatalogStore, PgStore};
use crate::SetTarget;

pub(crate) use actions::process_input_actions;
pub(crate) use resolve::resolve_set_products;

/// Mode flags for one run. The resolver itself reads none of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SyncOptions {
    pub dry_run: bool,
    /// Count non-card listings without logging each one.
    pub skip_sealed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SyncStats {
    pub sets_processed: usize,
    pub input_actions_processed: usize,
    pub cards_updated: usize,
    pub cards_created: usize,
    pub automatic_updates: usize,
    pub multi_product_cards: usize,
    pub non_card_products: usize,
    pub unclassifiable_products: usize,
    pub errors: usize,
}

/// Mutable state carried across all sets of one run.
#[derive(Debug, Default)]
pub(crate) struct SyncRun {
    pub options: SyncOptions,
    pub stats: SyncStats,
    pub unmapped: Vec<UnmappedRecord>,
    /// Products already handled by an input action in this run.
    pub processed_product_ids: HashSet<i64>,
}

impl SyncRun {
    pub(crate) fn new(options: SyncOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

/// Run `sync-variants` over the targeted sets and write the unmapped report.
///
/// # Errors
///
/// Returns an error if the report file cannot be rotated or written, the
/// marketplace client cannot be built, or the set list cannot be loaded.
pub(crate) async fn run_sync_variants(
    pool: &sqlx::PgPool,
    config: &cardsync_core::AppConfig,
    target: &SetTarget,
    options: SyncOptions,
) -> anyhow::Result<()> {
    let report_path = config.unmapped_report_path.as_path();
    let input_path = input_path_for(report_path);
    rotate_report(report_path, &input_path)?;
    let actions = load_input_actions(&input_path);

    let client = MarketplaceClient::new(
        &config.marketplace_base_url,
        config.marketplace_category_id,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build marketplace client: {e}"))?;

    let set_ids: Vec<String> = match target {
        SetTarget::One(set_id) => vec![set_id.clone()],
        SetTarget::All => cardsync_db::list_sets_with_group(pool)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect(),
    };
    tracing::info!(sets = set_ids.len(), dry_run = options.dry_run, "syncing card variants");

    let store = PgStore::new(pool);
    let mut run = SyncRun::new(options);

    for set_id in &set_ids {
        sync_set(pool, &store, &client, &mut run, set_id, &actions).await;
    }

    let report = UnmappedReport::build(std::mem::take(&mut run.unmapped), Utc::now());
    write_report(report_path, &report)?;
    print_summary(&run, &report, report_path);

    Ok(())
}

async fn sync_set(
    pool: &sqlx::PgPool,
    store: &PgStore<'_>,
    client: &MarketplaceClient,
    run: &mut SyncRun,
    set_id: &str,
    actions: &InputActions,
) {
    let processed = process_input_actions(store, run, set_id, actions).await;
    if processed > 0 {
        tracing::info!(set_id, processed, "applied input actions");
    }

    let group_id = match cardsync_db::get_set(pool, set_id).await {
        Ok(Some(set)) => set.marketplace_group_id,
        Ok(None) => {
            tracing::warn!(set_id, "set not found in catalog");
            return;
        }
        Err(e) => {
            tracing::error!(set_id, error = %e, "failed to load set");
            run.stats.errors += 1;
            return;
        }
    };
    let Some(group_id) = group_id else {
        tracing::warn!(set_id, "set has no marketplace group; run map-groups --apply first");
        return;
    };

    let products: Vec<MarketplaceProduct> = match client.fetch_products(group_id).await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(set_id, group_id, error = %e, "failed to fetch marketplace products");
            run.stats.errors += 1;
            return;
        }
    };
    if products.is_empty() {
        tracing::warn!(set_id, group_id, "marketplace group has no products");
        return;
    }

    resolve_set_products(store, run, set_id, products).await;
    run.stats.sets_processed += 1;
}

/// Persist a card's full entry list with the headline product and ball
/// flags derived from it.
pub(crate) async fn write_entries<S: CatalogStore>(
    store: &S,
    card_id: &str,
    entries: &[CardVariantEntry],
) -> Result<(), DbError> {
    let flags = VariantFlags::from_entries(entries);
    let primary = primary_entry(entries);
    store
        .write_card_products(&CardProductsUpdate {
            card_id,
            entries,
            primary_product_id: primary.map(|e| e.product_id),
            primary_image_url: primary.map(|e| e.image_url.as_str()),
            has_poke_ball: flags.has_poke_ball,
            has_master_ball: flags.has_master_ball,
        })
        .await
}

/// `unmapped_cards.json` -> `unmapped_cards_input.json`, next to the report.
pub(crate) fn input_path_for(report_path: &Path) -> PathBuf {
    let stem = report_path
        .file_stem()
        .map_or_else(|| "unmapped_cards".into(), |s| s.to_string_lossy());
    let file_name = match report_path.extension() {
        Some(ext) => format!("{stem}_input.{}", ext.to_string_lossy()),
        None => format!("{stem}_input"),
    };
    report_path.with_file_name(file_name)
}

/// Move last run's report aside so operator edits become this run's input.
pub(crate) fn rotate_report(report_path: &Path, input_path: &Path) -> anyhow::Result<bool> {
    if !report_path.exists() {
        return Ok(false);
    }
    std::fs::rename(report_path, input_path).map_err(|e| {
        anyhow::anyhow!(
            "failed to move {} to {}: {e}",
            report_path.display(),
            input_path.display()
        )
    })?;
    tracing::info!(path = %input_path.display(), "previous unmapped report moved to input file");
    Ok(true)
}

/// A missing or unreadable input file means no actions.
pub(crate) fn load_input_actions(path: &Path) -> InputActions {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return InputActions::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read input actions file");
            return InputActions::default();
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "input actions file is not valid JSON");
            return InputActions::default();
        }
    };

    let actions = InputActions::from_json(&value);
    if actions.rejected > 0 {
        tracing::warn!(
            path = %path.display(),
            rejected = actions.rejected,
            "ignored malformed input action records"
        );
    }
    actions
}

pub(crate) fn write_report(path: &Path, report: &UnmappedReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))
}

fn print_summary(run: &SyncRun, report: &UnmappedReport, report_path: &Path) {
    let stats = &run.stats;
    println!("sets processed:          {}", stats.sets_processed);
    println!("input actions processed: {}", stats.input_actions_processed);
    println!("cards updated:           {}", stats.cards_updated);
    println!("cards created:           {}", stats.cards_created);
    println!("automatic updates:       {}", stats.automatic_updates);
    println!("multi-product cards:     {}", stats.multi_product_cards);
    println!("non-card products:       {}", stats.non_card_products);
    println!("unclassifiable products: {}", stats.unclassifiable_products);
    println!("unmapped records:        {}", report.summary.total_unmapped);
    println!("errors:                  {}", stats.errors);
    println!("unmapped report written to {}", report_path.display());
    if run.options.dry_run {
        println!("dry-run: no database changes were made");
    }
}

#[cfg(test)]
#[path = "variants_test.rs"]
mod tests;
