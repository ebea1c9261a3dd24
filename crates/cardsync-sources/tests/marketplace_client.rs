//! Integration tests for `MarketplaceClient` against a local `wiremock`
//! server.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardsync_sources::{MarketplaceClient, SourceError};

fn test_client(base: &str) -> MarketplaceClient {
    MarketplaceClient::new(base, 3, 5, "cardsync-test/0.1").expect("failed to build test client")
}

fn product_json(id: i64, name: &str, number: Option<&str>) -> serde_json::Value {
    let mut extended = vec![json!({"name": "Rarity", "value": "Common"})];
    if let Some(n) = number {
        extended.push(json!({"name": "Number", "value": n}));
    }
    json!({
        "productId": id,
        "name": name,
        "cleanName": name,
        "imageUrl": format!("https://img.example/{id}.jpg"),
        "categoryId": 3,
        "groupId": 24269,
        "extendedData": extended
    })
}

#[tokio::test]
async fn fetch_groups_reads_wrapped_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tcgplayer/3/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "results": [
                {"groupId": 24269, "name": "SV10: Destined Rivals", "abbreviation": "DRI"},
                {"groupId": 3170, "name": "Celebrations"}
            ]
        })))
        .mount(&server)
        .await;

    let groups = test_client(&server.uri())
        .fetch_groups()
        .await
        .expect("groups fetched");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group_id, 24269);
    assert_eq!(groups[0].abbreviation.as_deref(), Some("DRI"));
    assert_eq!(groups[1].name, "Celebrations");
}

#[tokio::test]
async fn fetch_products_reads_bare_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tcgplayer/3/24269/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Eevee", Some("057/191")),
            product_json(2, "Eevee (Poke Ball Pattern)", Some("057/191")),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_products(24269)
        .await
        .expect("products fetched");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].product_id, 2);
    assert_eq!(products[0].attribute("Number"), Some("057/191"));
    assert_eq!(products[0].image_url, "https://img.example/1.jpg");
}

#[tokio::test]
async fn fetch_products_tolerates_missing_extended_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tcgplayer/3/5/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"productId": 9, "name": "Booster Box"}]
        })))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_products(5)
        .await
        .expect("products fetched");

    assert!(products[0].extended_attributes.is_empty());
}

#[tokio::test]
async fn not_found_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_products(1).await;
    assert!(
        matches!(result, Err(SourceError::NotFound { ref url }) if url.ends_with("/tcgplayer/3/1/products")),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_groups().await;
    assert!(
        matches!(result, Err(SourceError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn unexpected_body_shape_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "nope"})))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_groups().await;
    assert!(
        matches!(result, Err(SourceError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}
