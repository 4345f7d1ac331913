//! Shapes of the data submitted to the bulk create, one `OrderBulkCreateInput`
//! per order. Field names follow the camelCase convention of the API.

use super::order::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxedMoneyInput {
    pub gross: Decimal,
    pub net: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreateUserInput {
    pub id: Option<String>,
    pub email: Option<String>,
    pub external_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub street_address_1: Option<String>,
    pub street_address_2: Option<String>,
    pub city: Option<String>,
    pub city_area: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub country_area: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataInput {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreateDeliveryMethodInput {
    pub warehouse_id: Option<String>,
    pub warehouse_name: Option<String>,
    pub shipping_method_id: Option<String>,
    pub shipping_method_name: Option<String>,
    pub shipping_price: Option<TaxedMoneyInput>,
    #[serde(default)]
    pub shipping_tax_rate: Decimal,
    pub shipping_tax_class_id: Option<String>,
    pub shipping_tax_class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreateNoteInput {
    pub message: String,
    pub date: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreateOrderLineInput {
    pub variant_id: Option<String>,
    pub variant_sku: Option<String>,
    pub variant_external_reference: Option<String>,
    pub variant_name: Option<String>,
    pub product_name: Option<String>,
    pub translated_variant_name: Option<String>,
    pub translated_product_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_shipping_required: bool,
    pub is_gift_card: bool,
    pub quantity: i64,
    pub quantity_fulfilled: i64,
    pub total_price: TaxedMoneyInput,
    pub undiscounted_total_price: TaxedMoneyInput,
    pub tax_rate: Decimal,
    pub tax_class_id: Option<String>,
    pub tax_class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreatePaymentInput {
    pub gateway: String,
    pub psp_reference: Option<String>,
    pub currency: String,
    pub total: Decimal,
    #[serde(default)]
    pub captured: Decimal,
    #[serde(default)]
    pub refunded: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBulkCreateInput {
    pub number: Option<u64>,
    pub external_reference: Option<String>,
    pub channel: String,
    pub created_at: DateTime<Utc>,
    pub status: Option<OrderStatus>,
    pub user: OrderBulkCreateUserInput,
    pub tracking_client_id: Option<String>,
    pub billing_address: AddressInput,
    pub shipping_address: Option<AddressInput>,
    #[serde(default)]
    pub metadata: Vec<MetadataInput>,
    #[serde(default)]
    pub private_metadata: Vec<MetadataInput>,
    pub customer_note: Option<String>,
    #[serde(default)]
    pub notes: Vec<OrderBulkCreateNoteInput>,
    pub language_code: String,
    pub display_gross_prices: Option<bool>,
    pub weight: Option<Decimal>,
    pub redirect_url: Option<String>,
    pub lines: Vec<OrderBulkCreateOrderLineInput>,
    pub delivery_method: OrderBulkCreateDeliveryMethodInput,
    #[serde(default)]
    pub payments: Vec<OrderBulkCreatePaymentInput>,
}
