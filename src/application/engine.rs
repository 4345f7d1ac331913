use super::order_builder::{OrderBuilder, RowOutcome};
use super::resolver::InstanceResolver;
use super::response::{OrderBulkCreateResponse, OrderBulkCreateResult, OrderView};
use crate::domain::errors::{ErrorPolicy, OrderBulkCreateError, OrderBulkCreateErrorCode as Code};
use crate::domain::input::OrderBulkCreateInput;
use crate::domain::order::{Order, OrderEvent, OrderEventKind};
use crate::domain::ports::{CatalogStoreBox, OrderStoreBox};
use crate::error::Result;
use chrono::Utc;
use std::collections::HashMap;

/// Creates many orders in one request.
///
/// Owns the catalog it resolves references against and the store orders are
/// saved to. Rows are built and validated first; nothing is saved until the
/// error policy has been applied to the whole request.
pub struct OrderBulkCreator {
    catalog: CatalogStoreBox,
    order_store: OrderStoreBox,
}

impl OrderBulkCreator {
    /// Creates a new `OrderBulkCreator`.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Reference data the inputs point at.
    /// * `order_store` - Where created orders are saved.
    pub fn new(catalog: CatalogStoreBox, order_store: OrderStoreBox) -> Self {
        Self {
            catalog,
            order_store,
        }
    }

    pub async fn bulk_create(
        &self,
        orders: Vec<OrderBulkCreateInput>,
        policy: ErrorPolicy,
    ) -> Result<OrderBulkCreateResponse> {
        self.bulk_create_rows(orders.into_iter().map(Ok).collect(), policy)
            .await
    }

    /// Like [`Self::bulk_create`], but accepts rows that could not be read.
    ///
    /// Unreadable rows get a `GRAPHQL_ERROR` and count as failed rows.
    pub async fn bulk_create_rows(
        &self,
        rows: Vec<Result<OrderBulkCreateInput>>,
        policy: ErrorPolicy,
    ) -> Result<OrderBulkCreateResponse> {
        tracing::info!(rows = rows.len(), ?policy, "bulk order create started");

        let mut numbers: HashMap<u64, usize> = HashMap::new();
        let mut references: HashMap<&str, usize> = HashMap::new();
        for input in rows.iter().flatten() {
            if let Some(number) = input.number {
                *numbers.entry(number).or_default() += 1;
            }
            if let Some(reference) = input.external_reference.as_deref() {
                *references.entry(reference).or_default() += 1;
            }
        }

        let mut resolver = InstanceResolver::new(self.catalog.as_ref());
        let mut outcomes = Vec::with_capacity(rows.len());
        for row in &rows {
            let input = match row {
                Ok(input) => input,
                Err(err) => {
                    outcomes.push(RowOutcome::rejected(vec![OrderBulkCreateError::new(
                        None,
                        err.to_string(),
                        Code::GraphqlError,
                    )]));
                    continue;
                }
            };

            let mut uniqueness = Vec::new();
            if let Some(number) = input.number {
                if numbers.get(&number).copied().unwrap_or_default() > 1 {
                    uniqueness.push(OrderBulkCreateError::at(
                        "number",
                        format!("Duplicated order number: {number}."),
                        Code::DuplicatedInputItem,
                    ));
                } else if self.order_store.exists_number(number).await? {
                    uniqueness.push(OrderBulkCreateError::at(
                        "number",
                        format!("Order with number {number} already exists."),
                        Code::Unique,
                    ));
                }
            }
            if let Some(reference) = input.external_reference.as_deref() {
                if references.get(reference).copied().unwrap_or_default() > 1 {
                    uniqueness.push(OrderBulkCreateError::at(
                        "externalReference",
                        format!("Duplicated external reference: {reference}."),
                        Code::DuplicatedInputItem,
                    ));
                } else if self.order_store.exists_external_reference(reference).await? {
                    uniqueness.push(OrderBulkCreateError::at(
                        "externalReference",
                        format!("Order with external reference {reference} already exists."),
                        Code::Unique,
                    ));
                }
            }

            let mut outcome = OrderBuilder::new(&mut resolver).build(input).await?;
            if !uniqueness.is_empty() {
                uniqueness.append(&mut outcome.errors);
                outcome = RowOutcome::rejected(uniqueness);
            }
            outcomes.push(outcome);
        }

        let max_requested = rows
            .iter()
            .flatten()
            .filter_map(|input| input.number)
            .max();
        let mut next_number = self
            .order_store
            .last_number()
            .await?
            .max(max_requested)
            .unwrap_or(0)
            .checked_add(1);
        for outcome in &mut outcomes {
            let needs_number = outcome.order.as_ref().is_some_and(|o| o.number.is_none());
            let dropped = policy == ErrorPolicy::RejectFailedRows && !outcome.errors.is_empty();
            if !needs_number || dropped {
                continue;
            }
            match next_number {
                Some(number) => {
                    if let Some(order) = outcome.order.as_mut() {
                        order.number = Some(number);
                    }
                    next_number = number.checked_add(1);
                }
                None => {
                    outcome.errors.push(OrderBulkCreateError::at(
                        "number",
                        "No order number left to assign.",
                        Code::Invalid,
                    ));
                    outcome.order = None;
                }
            }
        }

        let any_errors = outcomes.iter().any(|o| !o.errors.is_empty());
        match policy {
            ErrorPolicy::RejectEverything if any_errors => {
                tracing::warn!("bulk order create rejected, at least one order has errors");
                let results = outcomes
                    .into_iter()
                    .map(|o| OrderBulkCreateResult {
                        order: None,
                        errors: o.errors,
                    })
                    .collect();
                return Ok(OrderBulkCreateResponse { count: 0, results });
            }
            ErrorPolicy::RejectFailedRows => {
                for outcome in outcomes.iter_mut().filter(|o| !o.errors.is_empty()) {
                    outcome.order = None;
                }
            }
            _ => {}
        }

        let mut count = 0;
        let mut results = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let RowOutcome { order, errors } = outcome;
            let Some(mut order) = order else {
                tracing::debug!(index, errors = errors.len(), "order rejected");
                results.push(OrderBulkCreateResult {
                    order: None,
                    errors,
                });
                continue;
            };

            order
                .events
                .push(OrderEvent::new(Utc::now(), OrderEventKind::Placed));

            let view = OrderView::from(&order);
            self.save(order).await?;
            count += 1;
            results.push(OrderBulkCreateResult {
                order: Some(view),
                errors,
            });
        }

        tracing::info!(count, "bulk order create finished");
        Ok(OrderBulkCreateResponse { count, results })
    }

    async fn save(&self, order: Order) -> Result<()> {
        tracing::debug!(order_id = %order.id, number = ?order.number, "saving order");
        self.order_store.store(order).await
    }

    /// Consumes the creator and returns every order saved so far.
    pub async fn into_orders(self) -> Result<Vec<Order>> {
        self.order_store.all_orders().await
    }
}
