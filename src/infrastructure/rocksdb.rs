use crate::domain::order::Order;
use crate::domain::ports::OrderStore;
use crate::error::{BulkError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing orders, keyed by order id.
pub const CF_ORDERS: &str = "orders";
/// Column Family for the unique references of orders (numbers and external references).
pub const CF_ORDER_REFS: &str = "order_refs";

const LAST_NUMBER_KEY: &[u8] = b"last_number";

fn number_key(number: u64) -> String {
    format!("number:{number}")
}

fn reference_key(reference: &str) -> String {
    format!("ext:{reference}")
}

fn internal(message: String) -> BulkError {
    BulkError::InternalError(Box::new(std::io::Error::other(message)))
}

/// A persistent order store implementation using RocksDB.
///
/// Orders are kept as JSON in the `orders` column family. The `order_refs`
/// column family indexes them by number and external reference and tracks
/// the highest number handed out, so uniqueness checks never scan orders.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBOrderStore {
    db: Arc<DB>,
}

impl RocksDBOrderStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("orders" and "order_refs") exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_refs = ColumnFamilyDescriptor::new(CF_ORDER_REFS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_refs])?;
        tracing::info!("order database opened");

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| internal(format!("{name} column family not found")))
    }

    fn ref_exists(&self, key: &str) -> Result<bool> {
        let refs = self.cf(CF_ORDER_REFS)?;
        Ok(self.db.get_pinned_cf(refs, key)?.is_some())
    }
}

#[async_trait]
impl OrderStore for RocksDBOrderStore {
    async fn store(&self, order: Order) -> Result<()> {
        let last_number = self.last_number().await?;
        let orders = self.cf(CF_ORDERS)?;
        let refs = self.cf(CF_ORDER_REFS)?;

        let value = serde_json::to_vec(&order)?;
        let mut batch = WriteBatch::default();
        batch.put_cf(orders, order.id.as_bytes(), value);

        if let Some(number) = order.number {
            batch.put_cf(refs, number_key(number), order.id.as_bytes());
            if last_number.is_none_or(|last| number > last) {
                batch.put_cf(refs, LAST_NUMBER_KEY, number.to_be_bytes());
            }
        }
        if let Some(reference) = order.external_reference.as_deref() {
            batch.put_cf(refs, reference_key(reference), order.id.as_bytes());
        }

        self.db.write(batch)?;
        tracing::debug!(order_id = %order.id, "order persisted");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>> {
        let orders = self.cf(CF_ORDERS)?;
        match self.db.get_pinned_cf(orders, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn exists_number(&self, number: u64) -> Result<bool> {
        self.ref_exists(&number_key(number))
    }

    async fn exists_external_reference(&self, reference: &str) -> Result<bool> {
        self.ref_exists(&reference_key(reference))
    }

    async fn last_number(&self) -> Result<Option<u64>> {
        let refs = self.cf(CF_ORDER_REFS)?;
        let Some(bytes) = self.db.get_pinned_cf(refs, LAST_NUMBER_KEY)? else {
            return Ok(None);
        };
        let bytes: [u8; 8] = bytes
            .as_ref()
            .try_into()
            .map_err(|_| internal("corrupted last order number".to_string()))?;
        Ok(Some(u64::from_be_bytes(bytes)))
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let orders = self.cf(CF_ORDERS)?;

        let mut all = Vec::new();
        for item in self.db.iterator_cf(orders, IteratorMode::Start) {
            let (_key, value) = item?;
            let order: Order = serde_json::from_slice(&value)?;
            all.push(order);
        }
        all.sort_by_key(|o| o.number);

        Ok(all)
    }
}
