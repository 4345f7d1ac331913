//! Reference data order inputs point at.
//!
//! These records are owned by other parts of the platform; the bulk create only
//! reads them, so every type here is a plain snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Column an input may use to point at a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Id,
    Email,
    ExternalReference,
    Sku,
    Name,
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupField::Id => "id",
            LookupField::Email => "email",
            LookupField::ExternalReference => "external_reference",
            LookupField::Sku => "sku",
            LookupField::Name => "name",
        };
        f.write_str(name)
    }
}

/// A decoded reference to a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Id(Uuid),
    Email(String),
    ExternalReference(String),
    Sku(String),
    Name(String),
}

impl LookupKey {
    pub fn field(&self) -> LookupField {
        match self {
            LookupKey::Id(_) => LookupField::Id,
            LookupKey::Email(_) => LookupField::Email,
            LookupKey::ExternalReference(_) => LookupField::ExternalReference,
            LookupKey::Sku(_) => LookupField::Sku,
            LookupKey::Name(_) => LookupField::Name,
        }
    }

    pub fn value(&self) -> String {
        match self {
            LookupKey::Id(id) => id.to_string(),
            LookupKey::Email(v)
            | LookupKey::ExternalReference(v)
            | LookupKey::Sku(v)
            | LookupKey::Name(v) => v.clone(),
        }
    }
}

/// Implemented by records that can be looked up by an input.
pub trait Named {
    /// Type name used in global ids and error messages.
    const TYPE_NAME: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub currency_code: String,
}

impl Named for Channel {
    const TYPE_NAME: &'static str = "Channel";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Named for User {
    const TYPE_NAME: &'static str = "User";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: Uuid,
    pub name: String,
}

impl Named for App {
    const TYPE_NAME: &'static str = "App";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: Uuid,
    pub sku: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    pub name: String,
    pub product_name: String,
}

impl Named for ProductVariant {
    const TYPE_NAME: &'static str = "ProductVariant";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
}

impl Named for Warehouse {
    const TYPE_NAME: &'static str = "Warehouse";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: Uuid,
    pub name: String,
}

impl Named for ShippingMethod {
    const TYPE_NAME: &'static str = "ShippingMethod";
}

/// Price of a shipping method in a given channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethodChannelListing {
    pub shipping_method_id: Uuid,
    pub channel_id: Uuid,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClass {
    pub id: Uuid,
    pub name: String,
}

impl Named for TaxClass {
    const TYPE_NAME: &'static str = "TaxClass";
}

/// A whole catalog snapshot, as loaded from a fixture document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFixture {
    pub channels: Vec<Channel>,
    pub users: Vec<User>,
    pub apps: Vec<App>,
    pub variants: Vec<ProductVariant>,
    pub warehouses: Vec<Warehouse>,
    pub shipping_methods: Vec<ShippingMethod>,
    pub shipping_listings: Vec<ShippingMethodChannelListing>,
    pub tax_classes: Vec<TaxClass>,
}
