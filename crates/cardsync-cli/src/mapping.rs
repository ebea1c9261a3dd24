//! `map-groups`: link marketplace groups to catalog sets.
//!
//! The mapping file is regenerated from the live group list on every run.
//! Operator fields (`manual_set_id`, `skip`) survive regeneration; the
//! automatic guess is refreshed against the current set list.

use std::collections::HashSet;
use std::path::Path;

use cardsync_core::{load_group_mappings, save_group_mappings, GroupMapping, GroupMappings};
use cardsync_resolver::{auto_map_group, price_guide_url};
use cardsync_sources::{MarketplaceClient, MarketplaceGroup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MappingCounts {
    pub auto_mapped: usize,
    pub manual: usize,
    pub skipped: usize,
    pub unmapped: usize,
}

impl MappingCounts {
    pub(crate) fn of(mappings: &GroupMappings) -> Self {
        let mut counts = Self::default();
        for mapping in mappings.values() {
            if mapping.skip {
                counts.skipped += 1;
            } else if !mapping.manual_set_id.trim().is_empty() {
                counts.manual += 1;
            } else if mapping.resolved_set_id().is_some() {
                counts.auto_mapped += 1;
            } else {
                counts.unmapped += 1;
            }
        }
        counts
    }
}

/// Merge the live group list into the existing mapping file contents.
///
/// Entries for groups that are no longer listed are kept untouched.
pub(crate) fn build_group_mappings<F>(
    groups: &[MarketplaceGroup],
    existing: &GroupMappings,
    set_exists: F,
) -> GroupMappings
where
    F: Fn(&str) -> bool,
{
    let mut mappings = existing.clone();

    for group in groups {
        let key = group.group_id.to_string();
        let auto_mapped_to = auto_map_group(&group.name, &set_exists);
        let (manual_set_id, skip) = existing
            .get(&key)
            .map(|prev| (prev.manual_set_id.clone(), prev.skip))
            .unwrap_or_default();

        mappings.insert(
            key,
            GroupMapping {
                name: group.name.clone(),
                auto_mapped_to,
                manual_set_id,
                skip,
            },
        );
    }

    mappings
}

fn load_existing(path: &Path) -> anyhow::Result<GroupMappings> {
    if !path.exists() {
        return Ok(GroupMappings::new());
    }
    Ok(load_group_mappings(path)?)
}

/// Refresh the mapping file and, with `apply`, store each resolved group on
/// its set.
///
/// # Errors
///
/// Returns an error if the set list or group list cannot be loaded, or the
/// mapping file cannot be read or written. Individual set updates that fail
/// are logged and skipped.
pub(crate) async fn run_map_groups(
    pool: &sqlx::PgPool,
    config: &cardsync_core::AppConfig,
    apply: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let set_ids: HashSet<String> = cardsync_db::list_set_ids(pool).await?.into_iter().collect();

    let client = MarketplaceClient::new(
        &config.marketplace_base_url,
        config.marketplace_category_id,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build marketplace client: {e}"))?;
    let groups = client.fetch_groups().await?;
    tracing::info!(groups = groups.len(), sets = set_ids.len(), "loaded groups and sets");

    let path = config.group_mappings_path.as_path();
    let existing = load_existing(path)?;
    let mappings = build_group_mappings(&groups, &existing, |id| set_ids.contains(id));

    let counts = MappingCounts::of(&mappings);
    println!(
        "groups: {} (auto-mapped {}, manual {}, skipped {}, unmapped {})",
        mappings.len(),
        counts.auto_mapped,
        counts.manual,
        counts.skipped,
        counts.unmapped
    );

    if dry_run {
        println!("dry-run: would write {}", path.display());
    } else {
        save_group_mappings(path, &mappings)?;
        println!("mappings written to {}", path.display());
    }

    if apply {
        let applied = apply_mappings(pool, &mappings, &set_ids, dry_run).await;
        println!("sets linked to marketplace groups: {applied}");
    }

    Ok(())
}

async fn apply_mappings(
    pool: &sqlx::PgPool,
    mappings: &GroupMappings,
    set_ids: &HashSet<String>,
    dry_run: bool,
) -> usize {
    let mut applied = 0;

    for (group_key, mapping) in mappings {
        let Some(set_id) = mapping.resolved_set_id() else {
            continue;
        };
        if !set_ids.contains(set_id) {
            tracing::warn!(group_id = %group_key, set_id, "mapped set does not exist in catalog");
            continue;
        }
        let Ok(group_id) = group_key.parse::<i64>() else {
            tracing::warn!(group_id = %group_key, "mapping key is not a numeric group id");
            continue;
        };

        let url = price_guide_url(&mapping.name);
        if dry_run {
            println!("dry-run: would link set {set_id} to group {group_id} ({url})");
            applied += 1;
            continue;
        }

        match cardsync_db::update_set_marketplace_group(pool, set_id, group_id, &url).await {
            Ok(true) => applied += 1,
            Ok(false) => tracing::warn!(set_id, group_id, "set disappeared before update"),
            Err(e) => tracing::error!(set_id, group_id, error = %e, "failed to link set"),
        }
    }

    applied
}
