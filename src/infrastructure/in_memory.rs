use crate::domain::catalog::{
    App, CatalogFixture, Channel, LookupKey, ProductVariant, ShippingMethod, TaxClass, User,
    Warehouse,
};
use crate::domain::order::Order;
use crate::domain::ports::{CatalogStore, OrderStore};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A read-only catalog held in memory.
///
/// Built once from a [`CatalogFixture`]; cloning shares the same snapshot.
#[derive(Default, Clone)]
pub struct InMemoryCatalogStore {
    catalog: Arc<CatalogFixture>,
}

impl InMemoryCatalogStore {
    pub fn from_fixture(fixture: CatalogFixture) -> Self {
        Self {
            catalog: Arc::new(fixture),
        }
    }
}

fn matches_optional(column: &Option<String>, value: &str) -> bool {
    column.as_deref() == Some(value)
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn channel(&self, slug: &str) -> Result<Option<Channel>> {
        Ok(self.catalog.channels.iter().find(|c| c.slug == slug).cloned())
    }

    async fn user(&self, key: &LookupKey) -> Result<Option<User>> {
        Ok(self
            .catalog
            .users
            .iter()
            .find(|u| match key {
                LookupKey::Id(id) => u.id == *id,
                LookupKey::Email(email) => u.email.eq_ignore_ascii_case(email),
                LookupKey::ExternalReference(r) => matches_optional(&u.external_reference, r),
                _ => false,
            })
            .cloned())
    }

    async fn app(&self, key: &LookupKey) -> Result<Option<App>> {
        Ok(self
            .catalog
            .apps
            .iter()
            .find(|a| match key {
                LookupKey::Id(id) => a.id == *id,
                LookupKey::Name(name) => a.name == *name,
                _ => false,
            })
            .cloned())
    }

    async fn variant(&self, key: &LookupKey) -> Result<Option<ProductVariant>> {
        Ok(self
            .catalog
            .variants
            .iter()
            .find(|v| match key {
                LookupKey::Id(id) => v.id == *id,
                LookupKey::Sku(sku) => matches_optional(&v.sku, sku),
                LookupKey::ExternalReference(r) => matches_optional(&v.external_reference, r),
                LookupKey::Name(name) => v.name == *name,
                LookupKey::Email(_) => false,
            })
            .cloned())
    }

    async fn warehouse(&self, key: &LookupKey) -> Result<Option<Warehouse>> {
        Ok(self
            .catalog
            .warehouses
            .iter()
            .find(|w| match key {
                LookupKey::Id(id) => w.id == *id,
                LookupKey::Name(name) => w.name == *name,
                _ => false,
            })
            .cloned())
    }

    async fn shipping_method(&self, key: &LookupKey) -> Result<Option<ShippingMethod>> {
        Ok(self
            .catalog
            .shipping_methods
            .iter()
            .find(|m| match key {
                LookupKey::Id(id) => m.id == *id,
                LookupKey::Name(name) => m.name == *name,
                _ => false,
            })
            .cloned())
    }

    async fn tax_class(&self, key: &LookupKey) -> Result<Option<TaxClass>> {
        Ok(self
            .catalog
            .tax_classes
            .iter()
            .find(|t| match key {
                LookupKey::Id(id) => t.id == *id,
                LookupKey::Name(name) => t.name == *name,
                _ => false,
            })
            .cloned())
    }

    async fn shipping_price(
        &self,
        shipping_method_id: Uuid,
        channel_id: Uuid,
    ) -> Result<Option<Decimal>> {
        Ok(self
            .catalog
            .shipping_listings
            .iter()
            .find(|l| l.shipping_method_id == shipping_method_id && l.channel_id == channel_id)
            .map(|l| l.price))
    }
}

/// A thread-safe in-memory store for created orders.
///
/// Uses `Arc<RwLock<HashMap<Uuid, Order>>>` to allow shared concurrent access.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn store(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn exists_number(&self, number: u64) -> Result<bool> {
        let orders = self.orders.read().await;
        Ok(orders.values().any(|o| o.number == Some(number)))
    }

    async fn exists_external_reference(&self, reference: &str) -> Result<bool> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .any(|o| o.external_reference.as_deref() == Some(reference)))
    }

    async fn last_number(&self) -> Result<Option<u64>> {
        let orders = self.orders.read().await;
        Ok(orders.values().filter_map(|o| o.number).max())
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(|o| o.number);
        Ok(all)
    }
}
