use crate::domain::catalog::{
    App, LookupField, LookupKey, Named, ProductVariant, ShippingMethod, TaxClass, User, Warehouse,
};
use crate::domain::errors::{OrderBulkCreateError, OrderBulkCreateErrorCode};
use crate::domain::global_id::from_global_id;
use crate::domain::ports::CatalogStore;
use crate::error::Result;
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of resolving one reference: the record, or a problem to report on the row.
pub type Resolved<T> = std::result::Result<T, OrderBulkCreateError>;

/// A catalog record an order input can point at.
#[async_trait]
pub trait Resolvable: Named + Send + Sync + Sized + 'static {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>>;
}

#[async_trait]
impl Resolvable for User {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.user(key).await
    }
}

#[async_trait]
impl Resolvable for App {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.app(key).await
    }
}

#[async_trait]
impl Resolvable for ProductVariant {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.variant(key).await
    }
}

#[async_trait]
impl Resolvable for Warehouse {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.warehouse(key).await
    }
}

#[async_trait]
impl Resolvable for ShippingMethod {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.shipping_method(key).await
    }
}

#[async_trait]
impl Resolvable for TaxClass {
    async fn fetch(catalog: &dyn CatalogStore, key: &LookupKey) -> Result<Option<Self>> {
        catalog.tax_class(key).await
    }
}

/// One way an input may identify a record: the input field it comes from, the
/// catalog column it maps to and the submitted value, trimmed.
#[derive(Debug, Clone, Copy)]
pub struct KeyCandidate<'a> {
    pub input_field: &'static str,
    pub lookup: LookupField,
    pub value: Option<&'a str>,
}

impl<'a> KeyCandidate<'a> {
    pub fn new(input_field: &'static str, lookup: LookupField, value: Option<&'a str>) -> Self {
        Self {
            input_field,
            lookup,
            value: value.map(str::trim).filter(|v| !v.is_empty()),
        }
    }
}

/// Resolves input references to catalog records.
///
/// Lives for the duration of one bulk request; records found once are served
/// from its cache afterwards, keyed by `Type_column_value`.
pub struct InstanceResolver<'a> {
    catalog: &'a dyn CatalogStore,
    cache: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl<'a> InstanceResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogStore) -> Self {
        Self {
            catalog,
            cache: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &'a dyn CatalogStore {
        self.catalog
    }

    /// Resolves a record that must be identified by exactly one of `candidates`.
    pub async fn resolve<T: Resolvable>(
        &mut self,
        candidates: &[KeyCandidate<'_>],
    ) -> Result<Resolved<Arc<T>>> {
        match self.resolve_optional::<T>(candidates).await? {
            Ok(Some(instance)) => Ok(Ok(instance)),
            Ok(None) => Ok(Err(OrderBulkCreateError::new(
                None,
                format!(
                    "One of [{}] arguments must be provided to resolve {} instance.",
                    field_list(candidates),
                    T::TYPE_NAME
                ),
                OrderBulkCreateErrorCode::Required,
            ))),
            Err(err) => Ok(Err(err)),
        }
    }

    /// Like [`Self::resolve`], but no candidate at all is not a problem.
    pub async fn resolve_optional<T: Resolvable>(
        &mut self,
        candidates: &[KeyCandidate<'_>],
    ) -> Result<Resolved<Option<Arc<T>>>> {
        let present: Vec<&KeyCandidate<'_>> =
            candidates.iter().filter(|c| c.value.is_some()).collect();

        let candidate = match present.as_slice() {
            [] => return Ok(Ok(None)),
            [candidate] => *candidate,
            _ => {
                return Ok(Err(OrderBulkCreateError::new(
                    None,
                    format!(
                        "Only one of [{}] arguments can be provided to resolve {} instance.",
                        field_list(candidates),
                        T::TYPE_NAME
                    ),
                    OrderBulkCreateErrorCode::Invalid,
                )));
            }
        };
        let Some(raw_value) = candidate.value else {
            return Ok(Ok(None));
        };

        let key = match candidate.lookup {
            LookupField::Id => match from_global_id(T::TYPE_NAME, raw_value) {
                Ok(id) => LookupKey::Id(id),
                Err(err) => {
                    return Ok(Err(OrderBulkCreateError::at(
                        candidate.input_field,
                        err.to_string(),
                        OrderBulkCreateErrorCode::Invalid,
                    )));
                }
            },
            LookupField::Email => LookupKey::Email(raw_value.to_lowercase()),
            LookupField::ExternalReference => LookupKey::ExternalReference(raw_value.to_string()),
            LookupField::Sku => LookupKey::Sku(raw_value.to_string()),
            LookupField::Name => LookupKey::Name(raw_value.to_string()),
        };

        let cache_key = format!("{}_{}_{}", T::TYPE_NAME, key.field(), key.value());
        if let Some(hit) = self.cache.get(&cache_key)
            && let Ok(instance) = Arc::clone(hit).downcast::<T>()
        {
            return Ok(Ok(Some(instance)));
        }

        match T::fetch(self.catalog, &key).await? {
            Some(instance) => {
                let instance = Arc::new(instance);
                self.cache.insert(cache_key, instance.clone());
                Ok(Ok(Some(instance)))
            }
            None => Ok(Err(OrderBulkCreateError::at(
                candidate.input_field,
                format!(
                    "{} instance with {}={} doesn't exist.",
                    T::TYPE_NAME,
                    key.field(),
                    raw_value
                ),
                OrderBulkCreateErrorCode::NotFound,
            ))),
        }
    }
}

fn field_list(candidates: &[KeyCandidate<'_>]) -> String {
    candidates
        .iter()
        .map(|c| c.input_field)
        .collect::<Vec<_>>()
        .join(", ")
}
