#![allow(dead_code)]

use orderbulk::domain::catalog::CatalogFixture;
use orderbulk::domain::input::OrderBulkCreateInput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

pub const CATALOG: &str = "tests/fixtures/catalog.json";
pub const ORDERS: &str = "tests/fixtures/orders.json";

pub fn catalog() -> CatalogFixture {
    let data = std::fs::read_to_string(CATALOG).expect("Failed to read catalog fixture");
    serde_json::from_str(&data).expect("Failed to parse catalog fixture")
}

/// A valid order for `channel-pln`: one `SKU-1` line shipped with DHL.
pub fn order(quantity: u32, gross: &str, net: &str) -> Value {
    json!({
        "channel": "channel-pln",
        "createdAt": "2024-01-01T10:00:00Z",
        "user": {"email": "customer@example.com"},
        "billingAddress": {
            "streetAddress1": "Tęczowa 7",
            "city": "Wrocław",
            "postalCode": "53-601",
            "country": "PL"
        },
        "languageCode": "PL",
        "lines": [{
            "variantSku": "SKU-1",
            "createdAt": "2024-01-01T10:00:00Z",
            "isShippingRequired": true,
            "isGiftCard": false,
            "quantity": quantity,
            "quantityFulfilled": 0,
            "totalPrice": {"gross": gross, "net": net, "currency": "PLN"},
            "undiscountedTotalPrice": {"gross": gross, "net": net, "currency": "PLN"},
            "taxRate": "0.23"
        }],
        "deliveryMethod": {"shippingMethodName": "DHL"}
    })
}

pub fn input(value: Value) -> OrderBulkCreateInput {
    serde_json::from_value(value).expect("Failed to build order input")
}

pub fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{value}").expect("Failed to write temp file");
    file
}

/// Random but reproducible orders. Roughly one in ten points at an unknown SKU.
pub fn generate_orders(seed: u64, count: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let quantity: u32 = rng.gen_range(1..=20);
            let cents: u32 = rng.gen_range(100..=100_000);
            let gross = format!("{}.{:02}", cents / 100, cents % 100);
            let mut order = order(quantity, &gross, &gross);
            if rng.gen_ratio(1, 10) {
                order["lines"][0]["variantSku"] = json!("UNKNOWN");
            }
            order
        })
        .collect()
}
