use super::money::{AmountOverflow, TaxedMoney};
use super::payment::Payment;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    Unconfirmed,
    #[default]
    Unfulfilled,
    PartiallyFulfilled,
    PartiallyReturned,
    Returned,
    Fulfilled,
    Canceled,
    Expired,
}

/// How much of the order's gross total has been charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderChargeStatus {
    #[default]
    None,
    Partial,
    Full,
    Overcharged,
}

impl OrderChargeStatus {
    pub fn from_amounts(charged: Decimal, total: Decimal) -> Self {
        if charged <= Decimal::ZERO {
            Self::None
        } else if charged < total {
            Self::Partial
        } else if charged == total {
            Self::Full
        } else {
            Self::Overcharged
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub street_address_1: String,
    pub street_address_2: String,
    pub city: String,
    pub city_area: String,
    pub postal_code: String,
    pub country: String,
    pub country_area: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub product_name: String,
    pub variant_name: String,
    pub translated_product_name: String,
    pub translated_variant_name: String,
    pub product_sku: Option<String>,
    pub is_shipping_required: bool,
    pub is_gift_card: bool,
    pub quantity: u32,
    pub quantity_fulfilled: u32,
    pub unit_price: TaxedMoney,
    pub total_price: TaxedMoney,
    pub undiscounted_total_price: TaxedMoney,
    pub tax_rate: Decimal,
    pub tax_class_id: Option<Uuid>,
    pub tax_class_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// How the order reaches the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeliveryMethod {
    Shipping {
        shipping_method_id: Uuid,
        shipping_method_name: String,
    },
    CollectionPoint {
        warehouse_id: Uuid,
        warehouse_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEventKind {
    Placed,
    NoteAdded { message: String },
    PaymentCaptured { payment_id: Uuid, amount: Decimal },
    PaymentRefunded { payment_id: Uuid, amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub date: DateTime<Utc>,
    pub kind: OrderEventKind,
    pub user_id: Option<Uuid>,
    pub app_id: Option<Uuid>,
}

impl OrderEvent {
    pub fn new(date: DateTime<Utc>, kind: OrderEventKind) -> Self {
        Self {
            date,
            kind,
            user_id: None,
            app_id: None,
        }
    }
}

/// An order as created by the bulk create.
///
/// All amounts are expressed in `currency`, the currency of the order's channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Assigned when the order is saved if the input did not carry one.
    pub number: Option<u64>,
    pub external_reference: Option<String>,
    pub channel_id: Uuid,
    pub channel_slug: String,
    pub currency: String,
    pub status: OrderStatus,
    pub user_id: Option<Uuid>,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub language_code: String,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
    pub delivery_method: DeliveryMethod,
    pub shipping_price: TaxedMoney,
    pub shipping_tax_rate: Decimal,
    pub shipping_tax_class_id: Option<Uuid>,
    pub shipping_tax_class_name: Option<String>,
    pub lines: Vec<OrderLine>,
    pub total: TaxedMoney,
    pub undiscounted_total: TaxedMoney,
    pub total_charged: Decimal,
    pub charge_status: OrderChargeStatus,
    pub payments: Vec<Payment>,
    pub metadata: Vec<MetadataItem>,
    pub private_metadata: Vec<MetadataItem>,
    pub customer_note: String,
    pub tracking_client_id: String,
    pub redirect_url: Option<String>,
    pub display_gross_prices: bool,
    pub weight: Decimal,
    pub events: Vec<OrderEvent>,
}

impl Order {
    /// Recomputes order totals from its lines and shipping price.
    ///
    /// Totals are left untouched when a sum overflows.
    pub fn update_totals(&mut self) -> Result<(), AmountOverflow> {
        let total = TaxedMoney::checked_sum(self.lines.iter().map(|l| l.total_price))?
            .checked_add(self.shipping_price)?;
        let undiscounted =
            TaxedMoney::checked_sum(self.lines.iter().map(|l| l.undiscounted_total_price))?
                .checked_add(self.shipping_price)?;
        self.total = total;
        self.undiscounted_total = undiscounted;
        Ok(())
    }

    pub fn update_charge_status(&mut self) {
        self.charge_status = OrderChargeStatus::from_amounts(self.total_charged, self.total.gross);
    }

    pub fn shipping_method_name(&self) -> Option<&str> {
        match &self.delivery_method {
            DeliveryMethod::Shipping {
                shipping_method_name,
                ..
            } => Some(shipping_method_name),
            DeliveryMethod::CollectionPoint { .. } => None,
        }
    }

    pub fn collection_point_name(&self) -> Option<&str> {
        match &self.delivery_method {
            DeliveryMethod::CollectionPoint { warehouse_name, .. } => Some(warehouse_name),
            DeliveryMethod::Shipping { .. } => None,
        }
    }
}
