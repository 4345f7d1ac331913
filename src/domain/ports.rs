use super::catalog::{
    App, Channel, LookupKey, ProductVariant, ShippingMethod, TaxClass, User, Warehouse,
};
use super::order::Order;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Read access to the reference data orders point at.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn channel(&self, slug: &str) -> Result<Option<Channel>>;
    async fn user(&self, key: &LookupKey) -> Result<Option<User>>;
    async fn app(&self, key: &LookupKey) -> Result<Option<App>>;
    async fn variant(&self, key: &LookupKey) -> Result<Option<ProductVariant>>;
    async fn warehouse(&self, key: &LookupKey) -> Result<Option<Warehouse>>;
    async fn shipping_method(&self, key: &LookupKey) -> Result<Option<ShippingMethod>>;
    async fn tax_class(&self, key: &LookupKey) -> Result<Option<TaxClass>>;
    /// Price of a shipping method in a channel, if it is listed there.
    async fn shipping_price(&self, shipping_method_id: Uuid, channel_id: Uuid)
    -> Result<Option<Decimal>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn store(&self, order: Order) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Order>>;
    async fn exists_number(&self, number: u64) -> Result<bool>;
    async fn exists_external_reference(&self, reference: &str) -> Result<bool>;
    /// Highest order number saved so far.
    async fn last_number(&self) -> Result<Option<u64>>;
    async fn all_orders(&self) -> Result<Vec<Order>>;
}

pub type CatalogStoreBox = Box<dyn CatalogStore>;
pub type OrderStoreBox = Box<dyn OrderStore>;
pub type OrderStoreFactory = Box<dyn Fn() -> OrderStoreBox + Send + Sync>;
