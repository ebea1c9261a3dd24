use cardsync_core::MarketplaceProduct;
use cardsync_resolver::{
    build_variant_record_entries, classify_variant_group, group_by_card_number, merge_entries,
    resolve_candidate_keys, synthetic_key, UnmappedRecord, VariantGroup,
};

use super::{write_entries, SyncRun};
use crate::store::CatalogStore;

/// Automatic resolution of one set's products.
pub(crate) async fn resolve_set_products<S: CatalogStore>(
    store: &S,
    run: &mut SyncRun,
    set_id: &str,
    products: Vec<MarketplaceProduct>,
) {
    let grouped = group_by_card_number(products);
    tracing::info!(
        set_id,
        card_numbers = grouped.groups.len(),
        non_card = grouped.non_card.len(),
        "grouped marketplace products"
    );

    run.stats.non_card_products += grouped.non_card.len();
    if !run.options.skip_sealed {
        for product in &grouped.non_card {
            tracing::info!(set_id, product_id = product.product_id, name = %product.name, "non-card product");
        }
    }

    run.stats.unclassifiable_products += grouped.unclassifiable.len();
    for product in &grouped.unclassifiable {
        tracing::warn!(
            set_id,
            product_id = product.product_id,
            name = %product.name,
            "card product without a usable number"
        );
    }

    for group in &grouped.groups {
        if group.products.len() > 1 {
            run.stats.multi_product_cards += 1;
        }
        match resolve_group(store, run, set_id, group).await {
            Ok(true) => run.stats.automatic_updates += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::error!(
                    set_id,
                    card_number = %group.card_number,
                    error = %e,
                    "failed to resolve card"
                );
                run.stats.errors += 1;
            }
        }
    }
}

/// Returns `false` when no catalog card matched and the group was reported
/// as unmapped.
async fn resolve_group<S: CatalogStore>(
    store: &S,
    run: &mut SyncRun,
    set_id: &str,
    group: &VariantGroup,
) -> Result<bool, cardsync_db::DbError> {
    let mut remaining: Vec<MarketplaceProduct> = Vec::with_capacity(group.products.len());
    for product in &group.products {
        if run.processed_product_ids.contains(&product.product_id) {
            tracing::debug!(set_id, product_id = product.product_id, "handled by input action");
            continue;
        }
        let synthetic = synthetic_key(set_id, product.product_id).card_id();
        if store.card_exists(&synthetic).await? {
            tracing::debug!(set_id, card_id = %synthetic, "product already owns a card");
            continue;
        }
        remaining.push(product.clone());
    }
    if remaining.is_empty() {
        return Ok(true);
    }

    let keys = resolve_candidate_keys(set_id, &group.card_number);
    let Some(card_id) = store.first_existing_card(&keys).await? else {
        let record = if group.products.len() == 1 {
            let product = remaining.swap_remove(0);
            UnmappedRecord::single(set_id, &group.card_number, product)
        } else {
            UnmappedRecord::group(set_id, &group.card_number, remaining)
        };
        run.unmapped.push(record);
        return Ok(false);
    };

    let existing = store.card_entries(&card_id).await?.unwrap_or_default();
    let new_products: Vec<MarketplaceProduct> = remaining
        .into_iter()
        .filter(|p| !existing.iter().any(|e| e.product_id == p.product_id))
        .collect();

    let Some(classified) = classify_variant_group(&new_products) else {
        tracing::debug!(card_id = %card_id, "all products already attached");
        return Ok(true);
    };
    let merged = merge_entries(&existing, &build_variant_record_entries(&classified));

    if run.options.dry_run {
        tracing::info!(card_id = %card_id, added = merged.added, "dry-run: would attach products");
        return Ok(true);
    }

    write_entries(store, &card_id, &merged.entries).await?;
    run.stats.cards_updated += 1;
    tracing::debug!(card_id = %card_id, added = merged.added, "attached products");
    Ok(true)
}
