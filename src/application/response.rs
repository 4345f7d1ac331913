use crate::domain::errors::OrderBulkCreateError;
use crate::domain::global_id::to_global_id;
use crate::domain::money::{Money, TaxedMoneyView};
use crate::domain::order::{Address, MetadataItem, Order, OrderChargeStatus, OrderLine, OrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// The answer to a bulk create: one result per submitted order, in order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBulkCreateResponse {
    /// How many orders were saved.
    pub count: usize,
    pub results: Vec<OrderBulkCreateResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderBulkCreateResult {
    pub order: Option<OrderView>,
    pub errors: Vec<OrderBulkCreateError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub id: String,
    pub product_name: String,
    pub variant_name: String,
    pub product_sku: Option<String>,
    pub quantity: u32,
    pub quantity_fulfilled: u32,
    pub unit_price: TaxedMoneyView,
    pub total_price: TaxedMoneyView,
    pub undiscounted_total_price: TaxedMoneyView,
    pub tax_rate: Decimal,
    pub tax_class_name: Option<String>,
}

impl OrderLineView {
    fn new(line: &OrderLine, currency: &str) -> Self {
        Self {
            id: to_global_id("OrderLine", line.id),
            product_name: line.product_name.clone(),
            variant_name: line.variant_name.clone(),
            product_sku: line.product_sku.clone(),
            quantity: line.quantity,
            quantity_fulfilled: line.quantity_fulfilled,
            unit_price: line.unit_price.with_currency(currency),
            total_price: line.total_price.with_currency(currency),
            undiscounted_total_price: line.undiscounted_total_price.with_currency(currency),
            tax_rate: line.tax_rate,
            tax_class_name: line.tax_class_name.clone(),
        }
    }
}

/// What API clients see of a created order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub number: Option<String>,
    pub external_reference: Option<String>,
    pub channel: String,
    pub status: OrderStatus,
    pub user_email: String,
    pub language_code: String,
    pub created: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
    pub shipping_method_name: Option<String>,
    pub collection_point_name: Option<String>,
    pub shipping_price: TaxedMoneyView,
    pub total: TaxedMoneyView,
    pub undiscounted_total: TaxedMoneyView,
    pub total_charged: Money,
    pub charge_status: OrderChargeStatus,
    pub customer_note: String,
    pub redirect_url: Option<String>,
    pub weight: Decimal,
    pub metadata: Vec<MetadataItem>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let currency = order.currency.as_str();
        Self {
            id: to_global_id("Order", order.id),
            number: order.number.map(|n| n.to_string()),
            external_reference: order.external_reference.clone(),
            channel: order.channel_slug.clone(),
            status: order.status,
            user_email: order.user_email.clone(),
            language_code: order.language_code.clone(),
            created: order.created_at,
            lines: order
                .lines
                .iter()
                .map(|line| OrderLineView::new(line, currency))
                .collect(),
            billing_address: order.billing_address.clone(),
            shipping_address: order.shipping_address.clone(),
            shipping_method_name: order.shipping_method_name().map(str::to_string),
            collection_point_name: order.collection_point_name().map(str::to_string),
            shipping_price: order.shipping_price.with_currency(currency),
            total: order.total.with_currency(currency),
            undiscounted_total: order.undiscounted_total.with_currency(currency),
            total_charged: Money::new(order.total_charged, currency),
            charge_status: order.charge_status,
            customer_note: order.customer_note.clone(),
            redirect_url: order.redirect_url.clone(),
            weight: order.weight,
            metadata: order.metadata.clone(),
        }
    }
}
