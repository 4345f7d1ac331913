mod common;

use orderbulk::application::engine::OrderBulkCreator;
use orderbulk::domain::errors::{ErrorPolicy, OrderBulkCreateErrorCode};
use orderbulk::infrastructure::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

#[test]
fn test_generated_orders_are_reproducible() {
    assert_eq!(common::generate_orders(7, 50), common::generate_orders(7, 50));
    assert_ne!(common::generate_orders(7, 50), common::generate_orders(8, 50));
}

#[tokio::test]
async fn test_generated_batch() {
    let generated = common::generate_orders(42, 300);
    let unknown = generated
        .iter()
        .filter(|o| o["lines"][0]["variantSku"] == "UNKNOWN")
        .count();

    let creator = OrderBulkCreator::new(
        Box::new(InMemoryCatalogStore::from_fixture(common::catalog())),
        Box::new(InMemoryOrderStore::new()),
    );
    let inputs = generated.into_iter().map(common::input).collect();
    let response = creator
        .bulk_create(inputs, ErrorPolicy::IgnoreFailed)
        .await
        .unwrap();

    assert_eq!(response.count, 300 - unknown);
    let mut numbers = HashSet::new();
    for result in &response.results {
        match &result.order {
            Some(order) => {
                assert!(result.errors.is_empty());
                assert!(numbers.insert(order.number.clone().unwrap()));
                let lines: Decimal = order.lines.iter().map(|l| l.total_price.gross.amount).sum();
                assert_eq!(order.total.gross.amount, lines + dec!(10));
            }
            None => {
                assert_eq!(result.errors.len(), 1);
                assert_eq!(result.errors[0].code, OrderBulkCreateErrorCode::NotFound);
            }
        }
    }

    let stored = creator.into_orders().await.unwrap();
    assert_eq!(stored.len(), 300 - unknown);
    assert_eq!(stored.last().unwrap().number, Some(stored.len() as u64));
}
