mod common;

use orderbulk::application::engine::OrderBulkCreator;
use orderbulk::domain::errors::ErrorPolicy;
use orderbulk::domain::ports::{CatalogStoreBox, OrderStore, OrderStoreBox};
use orderbulk::infrastructure::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};

#[tokio::test]
async fn test_stores_as_trait_objects() {
    let catalog: CatalogStoreBox = Box::new(InMemoryCatalogStore::from_fixture(common::catalog()));
    let order_store = InMemoryOrderStore::new();
    let shared: OrderStoreBox = Box::new(order_store.clone());

    // Verify Send + Sync by running the bulk create in a task
    let handle = tokio::spawn(async move {
        let creator = OrderBulkCreator::new(catalog, shared);
        let orders = vec![common::input(common::order(1, "5", "5"))];
        creator
            .bulk_create(orders, ErrorPolicy::RejectEverything)
            .await
            .unwrap()
    });

    let response = handle.await.unwrap();
    assert_eq!(response.count, 1);

    // The clone shares the same underlying map
    assert_eq!(order_store.last_number().await.unwrap(), Some(1));
    assert_eq!(order_store.all_orders().await.unwrap().len(), 1);
}
