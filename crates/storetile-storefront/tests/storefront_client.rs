//! Integration tests for `StorefrontClient::fetch_collection_products`.
//!
//! Uses `wiremock` to stand up a local GraphQL endpoint per test so no real
//! network traffic is made. Covers the happy path, the missing-collection
//! case, and every error variant a fetch can return.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storetile_core::TileOptions;
use storetile_storefront::client::ACCESS_TOKEN_HEADER;
use storetile_storefront::{build_product_tiles, CollectionQuery, StorefrontClient, StorefrontError};

const API_PATH: &str = "/api/2024-01/graphql.json";

/// Builds a `StorefrontClient` pointed at the mock server.
fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), "2024-01", "test-token", 5, "storetile-test/0.1")
        .expect("failed to build test StorefrontClient")
}

/// One product with two colors, edges/nodes wrapped as the API returns it.
fn collection_json() -> serde_json::Value {
    json!({
        "data": {
            "collection": {
                "products": {
                    "edges": [{
                        "node": {
                            "id": "gid://shopify/Product/1",
                            "handle": "shirt",
                            "availableForSale": true,
                            "title": "Shirt",
                            "vendor": "Acme",
                            "tags": [],
                            "options": [
                                { "id": "o1", "name": "Color", "values": ["Red", "Blue"] },
                                { "id": "o2", "name": "Size", "values": ["S", "M"] }
                            ],
                            "metafields": [{ "namespace": "sales", "key": "discount", "value": "25" }],
                            "compareAtPriceRange": {
                                "minVariantPrice": { "amount": "0.0", "currencyCode": "USD" },
                                "maxVariantPrice": { "amount": "0.0", "currencyCode": "USD" }
                            },
                            "priceRange": {
                                "minVariantPrice": { "amount": "40.0", "currencyCode": "USD" },
                                "maxVariantPrice": { "amount": "40.0", "currencyCode": "USD" }
                            },
                            "variants": { "edges": [
                                { "node": {
                                    "id": "gid://shopify/ProductVariant/11",
                                    "title": "Red / S",
                                    "availableForSale": false,
                                    "image": { "url": "https://cdn.test/red.jpg", "altText": "Red shirt", "width": 800, "height": 1000 },
                                    "metafields": [
                                        { "namespace": "color_variant", "key": "color", "value": "#ff0000", "reference": null },
                                        { "namespace": "color_variant", "key": "second_image", "value": "gid://shopify/MediaImage/5",
                                          "reference": { "image": { "url": "https://cdn.test/red-back.jpg", "altText": null, "width": 800, "height": 1000 } } }
                                    ],
                                    "selectedOptions": [{ "name": "Color", "value": "Red" }, { "name": "Size", "value": "S" }],
                                    "price": { "amount": "40.0", "currencyCode": "USD" },
                                    "compareAtPrice": null
                                } },
                                { "node": {
                                    "id": "gid://shopify/ProductVariant/12",
                                    "title": "Blue / S",
                                    "availableForSale": true,
                                    "image": null,
                                    "metafields": [null, null],
                                    "selectedOptions": [{ "name": "Color", "value": "Blue" }, { "name": "Size", "value": "S" }],
                                    "price": { "amount": "40.0", "currencyCode": "USD" },
                                    "compareAtPrice": null
                                } }
                            ] },
                            "featuredImage": { "url": "https://cdn.test/featured.jpg", "altText": null, "width": 800, "height": 1000 },
                            "images": { "edges": [
                                { "node": { "url": "https://cdn.test/featured.jpg", "altText": null, "width": 800, "height": 1000 } }
                            ] }
                        }
                    }]
                }
            }
        }
    })
}

// ---------------------------------------------------------------------------
// happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_collection_products_decodes_and_builds_tiles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(header(ACCESS_TOKEN_HEADER, "test-token"))
        .and(body_partial_json(json!({ "variables": { "handle": "frontpage" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_collection_products(&CollectionQuery::new("frontpage"))
        .await
        .expect("expected products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].variants.len(), 2);
    assert_eq!(products[0].images.len(), 1);
    assert_eq!(products[0].variants[1].metafields.len(), 2);
    assert!(products[0].variants[1].set_metafields().next().is_none());

    let tiles = build_product_tiles(&products, &TileOptions::default());
    let tile = &tiles[0];
    assert_eq!(tile.price, 40.0);
    assert_eq!(tile.discount, 25.0);
    assert_eq!(tile.sizes, vec!["S".to_string(), "M".to_string()]);

    let red = tile.color("Red").expect("expected Red");
    assert_eq!(red.code, "#ff0000");
    assert!(!red.is_available);
    let secondary = red.images.secondary.as_ref().expect("expected secondary");
    assert_eq!(secondary.url, "https://cdn.test/red-back.jpg");
    assert_eq!(secondary.alt_text.as_deref(), Some("Red shirt"));

    let blue = tile.color("Blue").expect("expected Blue");
    assert_eq!(blue.code, "transparent");
    assert!(blue.is_available);
}

#[tokio::test]
async fn fetch_collection_products_sends_sort_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_partial_json(json!({
            "variables": { "handle": "frontpage", "sortKey": "CREATED", "reverse": true }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "collection": { "products": { "edges": [] } } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = CollectionQuery::new("frontpage").sorted_by("CREATED_AT", true);
    let products = client.fetch_collection_products(&query).await.unwrap();
    assert!(products.is_empty());
}

// ---------------------------------------------------------------------------
// missing collection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_collection_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "collection": null } })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_collection_products(&CollectionQuery::new("does-not-exist"))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_collection_products(&CollectionQuery::new("frontpage"))
        .await;

    assert!(
        matches!(result, Err(StorefrontError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_collection_products(&CollectionQuery::new("frontpage"))
        .await;

    assert!(matches!(
        result,
        Err(StorefrontError::UnexpectedStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn invalid_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_collection_products(&CollectionQuery::new("frontpage"))
        .await;

    assert!(
        matches!(result, Err(StorefrontError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn graphql_errors_without_data_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Field 'colection' doesn't exist on type 'QueryRoot'" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .fetch_collection_products(&CollectionQuery::new("frontpage"))
        .await;

    match result {
        Err(StorefrontError::GraphQl { messages }) => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("colection"));
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}
