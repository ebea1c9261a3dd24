//! Operator decisions read back from the previous unmapped report.

use cardsync_core::{MarketplaceProduct, PrintingFlags};
use cardsync_db::NewCard;
use cardsync_resolver::{
    correct_variants, entry_for_product, extract_card_number, extract_rarity, merge_entries,
    normalize_number, synthetic_key, InputAction, InputActions, UnmappedRecord, VariantFlags,
};

use super::{write_entries, SyncRun};
use crate::store::CatalogStore;

/// Apply every non-`review` record filed under `set_id`. Returns how many
/// records were processed; failures are logged and counted as errors.
pub(crate) async fn process_input_actions<S: CatalogStore>(
    store: &S,
    run: &mut SyncRun,
    set_id: &str,
    actions: &InputActions,
) -> usize {
    let mut processed = 0;

    for record in actions.actionable(set_id) {
        let result = match record.action {
            InputAction::Update => apply_update(store, run, record).await,
            InputAction::Create => apply_create(store, run, set_id, record).await,
            InputAction::Skip => Ok(()),
            InputAction::Review => continue,
        };
        processed += 1;

        if let Err(e) = result {
            tracing::error!(
                set_id,
                card_number = %record.card_number,
                action = ?record.action,
                error = %e,
                "input action failed"
            );
            run.stats.errors += 1;
        }
    }

    run.stats.input_actions_processed += processed;
    processed
}

/// Append the record's products to the card the operator named.
async fn apply_update<S: CatalogStore>(
    store: &S,
    run: &mut SyncRun,
    record: &UnmappedRecord,
) -> anyhow::Result<()> {
    let Some(card_id) = record.card_id.as_deref().filter(|id| !id.trim().is_empty()) else {
        anyhow::bail!("update action has no card_id");
    };
    let Some(mut entries) = store.card_entries(card_id).await? else {
        anyhow::bail!("card {card_id} not found");
    };

    let mut added = 0;
    for product in record.tcg_products() {
        let incoming = entry_for_product(product, entries.is_empty());
        let merged = merge_entries(&entries, &[incoming]);
        if merged.added == 0 {
            tracing::info!(card_id, product_id = product.product_id, "product already attached");
            continue;
        }
        entries = merged.entries;
        added += 1;
    }

    if added > 0 {
        if run.options.dry_run {
            tracing::info!(card_id, added, "dry-run: would attach products");
        } else {
            write_entries(store, card_id, &entries).await?;
            run.stats.cards_updated += 1;
            tracing::info!(card_id, added, "attached products from input action");
        }
    }

    // A failed write leaves the products to the automatic pass.
    run.processed_product_ids
        .extend(record.tcg_products().iter().map(|p| p.product_id));
    Ok(())
}

/// One synthetic card per product of the record.
async fn apply_create<S: CatalogStore>(
    store: &S,
    run: &mut SyncRun,
    set_id: &str,
    record: &UnmappedRecord,
) -> anyhow::Result<()> {
    for product in record.tcg_products() {
        run.processed_product_ids.insert(product.product_id);

        let card_id = synthetic_key(set_id, product.product_id).card_id();
        if store.card_exists(&card_id).await? {
            tracing::info!(card_id = %card_id, "card already exists, skipping create");
            continue;
        }
        if run.options.dry_run {
            tracing::info!(card_id = %card_id, "dry-run: would create card");
            continue;
        }

        if create_card(store, set_id, &card_id, product).await? {
            run.stats.cards_created += 1;
            tracing::info!(card_id = %card_id, "created card from marketplace product");
        }
    }
    Ok(())
}

async fn create_card<S: CatalogStore>(
    store: &S,
    set_id: &str,
    card_id: &str,
    product: &MarketplaceProduct,
) -> Result<bool, cardsync_db::DbError> {
    let entries = vec![entry_for_product(product, true)];
    let flags = VariantFlags::from_entries(&entries);
    let rarity = extract_rarity(product);
    let local_id = extract_card_number(product)
        .map(|raw| normalize_number(raw).trim())
        .filter(|n| !n.is_empty());
    let printing = correct_variants(
        rarity,
        Some(PrintingFlags {
            normal: true,
            ..PrintingFlags::default()
        }),
    );

    store
        .insert_card(&NewCard {
            id: card_id,
            set_id,
            local_id,
            name: &product.name,
            rarity,
            printing,
            has_poke_ball: flags.has_poke_ball,
            has_master_ball: flags.has_master_ball,
            primary_product_id: product.product_id,
            primary_image_url: &product.image_url,
            entries: &entries,
        })
        .await
}
