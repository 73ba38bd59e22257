//! SqliteStore against an in-memory database.

use indexmap::IndexMap;
use listing_extraction::{Asin, ListingData, RewrittenListing};
use server_core::kernel::{ProductStore, SqliteStore, StoreError};

fn asin(raw: &str) -> Asin {
    Asin::parse(raw).unwrap()
}

fn listing(title: &str) -> ListingData {
    let mut details = IndexMap::new();
    details.insert("Weight".to_string(), "90 g".to_string());
    details.insert("Brand".to_string(), "Acme".to_string());
    ListingData {
        title: title.to_string(),
        bullet_points: vec!["Silent clicks".to_string(), "USB-C".to_string()],
        product_details: details,
        description: "A compact mouse.".to_string(),
    }
}

fn rewrite(title: &str) -> RewrittenListing {
    RewrittenListing {
        title: title.to_string(),
        bullet_points: vec!["One".to_string(); 5],
        description: "Better.".to_string(),
        keywords: vec!["mouse".to_string(), "silent".to_string(), "acme".to_string()],
    }
}

#[tokio::test]
async fn product_round_trip_preserves_structure() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");

    let inserted = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("Better Mouse"))
        .await
        .unwrap();
    let found = store.find_product(&mouse).await.unwrap().unwrap();

    assert_eq!(found, inserted);
    assert_eq!(found.original, listing("Mouse"));
    assert_eq!(found.optimized, rewrite("Better Mouse"));

    let keys: Vec<_> = found.original.product_details.keys().cloned().collect();
    assert_eq!(keys, vec!["Weight", "Brand"]);

    assert!(store.find_product(&asin("B0OTHERXXX")).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_asin_is_rejected() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");

    store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("A"))
        .await
        .unwrap();
    let err = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("B"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
}

#[tokio::test]
async fn partial_updates_touch_only_their_columns() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");
    let product = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("Better Mouse"))
        .await
        .unwrap();

    store
        .update_original(product.id, &listing("Mouse v2"))
        .await
        .unwrap();
    let found = store.find_product(&mouse).await.unwrap().unwrap();
    assert_eq!(found.original.title, "Mouse v2");
    assert_eq!(found.optimized.title, "Better Mouse");
    assert!(found.updated_at >= product.updated_at);

    store
        .update_optimized(product.id, &rewrite("Best Mouse"))
        .await
        .unwrap();
    let found = store.find_product(&mouse).await.unwrap().unwrap();
    assert_eq!(found.original.title, "Mouse v2");
    assert_eq!(found.optimized.title, "Best Mouse");

    let err = store.update_original(9999, &listing("x")).await.unwrap_err();
    assert!(matches!(err, StoreError::ProductNotFound(9999)));
}

#[tokio::test]
async fn history_lookup_joins_current_product() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");
    let product = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("Better Mouse"))
        .await
        .unwrap();
    let first = store
        .insert_history(product.id, &listing("Mouse"), &rewrite("Better Mouse"))
        .await
        .unwrap();
    store
        .update_original(product.id, &listing("Mouse v2"))
        .await
        .unwrap();

    let entry = store.find_history(first.id).await.unwrap().unwrap();
    assert_eq!(entry.record, first);
    assert_eq!(entry.asin, "B0TESTMOUS");
    assert_eq!(entry.product_original.title, "Mouse v2");
    assert_eq!(entry.product_original.product_details["Brand"], "Acme");

    assert!(store.find_history(first.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn history_and_index_are_newest_first() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");
    let lamp = asin("B0TESTLAMP");

    let m = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("A"))
        .await
        .unwrap();
    store
        .insert_product(&lamp, &listing("Lamp"), &rewrite("B"))
        .await
        .unwrap();

    let h1 = store
        .insert_history(m.id, &listing("Mouse"), &rewrite("first"))
        .await
        .unwrap();
    let h2 = store
        .insert_history(m.id, &listing("Mouse"), &rewrite("second"))
        .await
        .unwrap();

    let history = store.list_history(&mouse).await.unwrap();
    let ids: Vec<_> = history.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![h2.id, h1.id]);
    assert!(store.list_history(&lamp).await.unwrap().is_empty());

    let products = store.list_products().await.unwrap();
    assert_eq!(products[0].asin, "B0TESTLAMP");
    assert_eq!(products[0].optimization_count, 0);
    assert_eq!(products[1].asin, "B0TESTMOUS");
    assert_eq!(products[1].optimization_count, 2);

    // Touching the mouse moves it to the front.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store.update_optimized(m.id, &rewrite("C")).await.unwrap();
    let products = store.list_products().await.unwrap();
    assert_eq!(products[0].asin, "B0TESTMOUS");
    assert_eq!(products[1].asin, "B0TESTLAMP");
}

#[tokio::test]
async fn corrupt_structured_columns_read_as_defaults() {
    let store = SqliteStore::in_memory().await.unwrap();
    let mouse = asin("B0TESTMOUS");
    let product = store
        .insert_product(&mouse, &listing("Mouse"), &rewrite("Better Mouse"))
        .await
        .unwrap();

    sqlx::query(
        r#"UPDATE products SET
            original_bullet_points = '"[\"Legacy one\",\"Legacy two\"]"',
            product_details = 'not json at all',
            optimized_bullet_points = '{"oops": 1}',
            keywords = NULL,
            optimized_description = NULL
        WHERE id = ?"#,
    )
    .bind(product.id)
    .execute(store.pool())
    .await
    .unwrap();

    let found = store.find_product(&mouse).await.unwrap().unwrap();
    assert_eq!(found.original.bullet_points, vec!["Legacy one", "Legacy two"]);
    assert!(found.original.product_details.is_empty());
    assert!(found.optimized.bullet_points.is_empty());
    assert!(found.optimized.keywords.is_empty());
    assert_eq!(found.optimized.description, "");
    assert_eq!(found.optimized.title, "Better Mouse");
}

#[tokio::test]
async fn ping_and_name() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.ping().await.unwrap();
    assert_eq!(store.name(), "sqlite");
}
