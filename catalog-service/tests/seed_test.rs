mod common;

use catalog_service::services::CatalogStore;
use common::TestApp;

#[tokio::test]
async fn seeding_empty_catalog_inserts_five_products() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/seed").await;

    assert!(status.is_success());
    assert_eq!(body["message"], "Catalog seeded");
    assert_eq!(body["count"], 5);

    let store = app.store.as_ref().expect("store configured");
    assert_eq!(store.count_products().await.unwrap(), 5);
}

#[tokio::test]
async fn seeding_twice_is_a_noop() {
    let app = TestApp::spawn().await;
    app.seed().await;

    let (status, body) = app.post_json("/seed").await;

    assert!(status.is_success());
    assert_eq!(body["message"], "Catalog already seeded");
    assert_eq!(body["count"], 5);

    let (_, products) = app.get_json("/products").await;
    assert_eq!(products.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn seeding_without_store_is_500() {
    let app = TestApp::spawn_unconfigured().await;

    let (status, body) = app.post_json("/seed").await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Database not configured");
}
