mod common;

use orderbulk::application::engine::OrderBulkCreator;
use orderbulk::domain::errors::ErrorPolicy;
use orderbulk::domain::ports::{OrderStoreBox, OrderStoreFactory};
use orderbulk::infrastructure::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};

fn creator(factory: &OrderStoreFactory) -> OrderBulkCreator {
    OrderBulkCreator::new(
        Box::new(InMemoryCatalogStore::from_fixture(common::catalog())),
        factory(),
    )
}

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: OrderStoreFactory =
        Box::new(|| Box::new(InMemoryOrderStore::new()) as OrderStoreBox);

    let store = factory();
    assert_eq!(store.last_number().await.unwrap(), None);
    assert!(store.all_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_gives_independent_stores() {
    let factory: OrderStoreFactory =
        Box::new(|| Box::new(InMemoryOrderStore::new()) as OrderStoreBox);

    for _ in 0..2 {
        let response = creator(&factory)
            .bulk_create(
                vec![common::input(common::order(1, "5", "5"))],
                ErrorPolicy::RejectEverything,
            )
            .await
            .unwrap();
        assert_eq!(response.results[0].order.as_ref().unwrap().number.as_deref(), Some("1"));
    }
}

#[tokio::test]
async fn test_factory_in_task() {
    let factory: OrderStoreFactory =
        Box::new(|| Box::new(InMemoryOrderStore::new()) as OrderStoreBox);

    let handle = tokio::spawn(async move {
        let creator = creator(&factory);
        let orders = vec![common::input(common::order(2, "12", "10"))];
        creator
            .bulk_create(orders, ErrorPolicy::RejectEverything)
            .await
            .unwrap();
        creator.into_orders().await.unwrap()
    });

    let stored = handle.await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].lines[0].quantity, 2);
}
