use chrono::TimeZone;
use serde_json::json;

use cardsync_core::ExtendedAttribute;

use super::*;

fn product(id: i64, name: &str) -> MarketplaceProduct {
    MarketplaceProduct {
        product_id: id,
        name: name.to_string(),
        image_url: format!("https://img.example/{id}.jpg"),
        extended_attributes: vec![ExtendedAttribute::new("Number", "057/191")],
    }
}

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn raw_product(id: i64, name: &str) -> serde_json::Value {
    json!({
        "productId": id,
        "name": name,
        "imageUrl": "",
        "extendedData": [{"name": "Number", "value": "057/191"}]
    })
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn single_record_serializes_flat() {
    let record = UnmappedRecord::single("sv10", "057", product(1, "Eevee"));
    let value = serde_json::to_value(&record).expect("serializable record");

    assert_eq!(value["set_id"], "sv10");
    assert_eq!(value["card_number"], "057");
    assert_eq!(value["product_id"], 1);
    assert_eq!(value["product_name"], "Eevee");
    assert_eq!(value["reason"], SINGLE_NOT_FOUND_REASON);
    assert_eq!(value["action"], "review");
    assert_eq!(value["tcg_product"]["productId"], 1);
    assert!(value.get("card_id").is_none());
}

#[test]
fn group_record_lists_every_product() {
    let record = UnmappedRecord::group(
        "sv10",
        "057",
        vec![product(1, "Eevee"), product(2, "Eevee (Poke Ball Pattern)")],
    );
    let value = serde_json::to_value(&record).expect("serializable record");

    assert_eq!(value["product_ids"], json!([1, 2]));
    assert_eq!(
        value["product_names"],
        json!(["Eevee", "Eevee (Poke Ball Pattern)"])
    );
    assert_eq!(value["reason"], GROUP_NOT_FOUND_REASON);
    assert_eq!(record.product_ids(), vec![1, 2]);
}

#[test]
fn records_read_back_in_both_shapes() {
    let single = UnmappedRecord::single("sv10", "057", product(1, "Eevee"));
    let group = UnmappedRecord::group("sv10", "058", vec![product(2, "A"), product(3, "B")]);

    for record in [single, group] {
        let json = serde_json::to_string(&record).expect("serializable record");
        let back: UnmappedRecord = serde_json::from_str(&json).expect("valid record json");
        assert_eq!(back, record);
    }
}

#[test]
fn unknown_action_reads_as_review() {
    let mut value = serde_json::to_value(UnmappedRecord::single("sv10", "1", product(1, "A")))
        .expect("serializable record");
    value["action"] = json!("maybe-later");
    let record: UnmappedRecord = serde_json::from_value(value).expect("valid record json");
    assert_eq!(record.action, InputAction::Review);
}

#[test]
fn action_strings_map_to_variants() {
    for (raw, expected) in [
        ("update", InputAction::Update),
        ("create", InputAction::Create),
        ("skip", InputAction::Skip),
        ("review", InputAction::Review),
        ("", InputAction::Review),
    ] {
        let action: InputAction = serde_json::from_value(json!(raw)).expect("valid action");
        assert_eq!(action, expected, "action string {raw:?}");
    }
    assert_eq!(InputAction::default(), InputAction::Review);
    assert_eq!(serde_json::to_value(InputAction::Review).expect("serializable"), json!("review"));
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[test]
fn report_groups_by_set() {
    let records = vec![
        UnmappedRecord::single("sv10", "1", product(1, "A")),
        UnmappedRecord::single("sv9", "2", product(2, "B")),
        UnmappedRecord::single("sv10", "3", product(3, "C")),
    ];
    let report = UnmappedReport::build(records, ts());

    assert_eq!(report.summary.total_unmapped, 3);
    assert_eq!(report.summary.sets_affected, 2);
    assert_eq!(report.summary.message, None);
    let sv10: Vec<Vec<i64>> = report.sets["sv10"]
        .products
        .iter()
        .map(UnmappedRecord::product_ids)
        .collect();
    assert_eq!(sv10, vec![vec![1], vec![3]]);
}

#[test]
fn empty_report_carries_success_message() {
    let report = UnmappedReport::build(Vec::new(), ts());
    let value = serde_json::to_value(&report).expect("serializable report");

    assert_eq!(value["summary"]["total_unmapped"], 0);
    assert_eq!(value["summary"]["sets_affected"], 0);
    assert!(value["summary"]["message"].is_string());
    assert_eq!(value["sets"], json!({}));
}

#[test]
fn report_file_is_valid_input() {
    let mut record = UnmappedRecord::single("sv10", "057", product(1, "Eevee"));
    record.action = InputAction::Create;
    let report = UnmappedReport::build(vec![record.clone()], ts());

    let value = serde_json::to_value(&report).expect("serializable report");
    let actions = InputActions::from_json(&value);

    assert_eq!(actions.for_set("sv10"), &[record]);
    assert_eq!(actions.rejected, 0);
}

// ---------------------------------------------------------------------------
// Input actions
// ---------------------------------------------------------------------------

#[test]
fn reads_structured_shape() {
    let value = json!({
        "timestamp": "2025-06-01T12:00:00",
        "sets": {
            "bwp": {"products": [{
                "set_id": "bwp",
                "card_number": "BW04",
                "product_id": 10,
                "product_name": "Reshiram",
                "action": "update",
                "card_id": "bwp-BW04",
                "tcg_product": raw_product(10, "Reshiram")
            }]}
        }
    });
    let actions = InputActions::from_json(&value);

    let records = actions.for_set("bwp");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, InputAction::Update);
    assert_eq!(records[0].card_id.as_deref(), Some("bwp-BW04"));
    assert_eq!(records[0].product_ids(), vec![10]);
}

#[test]
fn reads_legacy_shape_and_inherits_set_id() {
    let value = json!({
        "set_id": "sv08.5",
        "products": [{
            "card_number": "001",
            "product_ids": [1, 2],
            "product_names": ["A", "A (Poke Ball Pattern)"],
            "action": "create",
            "tcg_products": [raw_product(1, "A"), raw_product(2, "A (Poke Ball Pattern)")]
        }]
    });
    let actions = InputActions::from_json(&value);

    let records = actions.for_set("sv08.5");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].set_id, "sv08.5");
    assert_eq!(records[0].tcg_products().len(), 2);
}

#[test]
fn reads_flat_list_shape() {
    let value = json!([
        {"set_id": "a", "product_id": 1, "product_name": "X", "action": "skip", "tcg_product": raw_product(1, "X")},
        {"set_id": "b", "product_id": 2, "product_name": "Y", "tcg_product": raw_product(2, "Y")}
    ]);
    let actions = InputActions::from_json(&value);

    assert_eq!(actions.for_set("a")[0].action, InputAction::Skip);
    assert_eq!(actions.for_set("b")[0].action, InputAction::Review);
    assert_eq!(actions.actionable("a").count(), 1);
    assert_eq!(actions.actionable("b").count(), 0);
}

#[test]
fn malformed_records_are_counted_not_fatal() {
    let value = json!([
        {"set_id": "a", "action": "create"},
        {"product_id": 1, "product_name": "X", "tcg_product": raw_product(1, "X")},
        {"set_id": "a", "product_id": 2, "product_name": "Y", "tcg_product": raw_product(2, "Y")}
    ]);
    let actions = InputActions::from_json(&value);

    assert_eq!(actions.rejected, 2);
    assert_eq!(actions.for_set("a").len(), 1);
}

#[test]
fn record_filed_under_other_set_is_rejected() {
    let value = json!({"sets": {"a": {"products": [
        {"set_id": "b", "product_id": 1, "product_name": "X", "tcg_product": raw_product(1, "X")}
    ]}}});
    let actions = InputActions::from_json(&value);
    assert!(actions.is_empty());
    assert_eq!(actions.rejected, 1);
}

#[test]
fn unknown_shapes_yield_nothing() {
    assert!(InputActions::from_json(&json!("text")).is_empty());
    assert!(InputActions::from_json(&json!({"other": 1})).is_empty());
    assert!(InputActions::default().for_set("missing").is_empty());
}
