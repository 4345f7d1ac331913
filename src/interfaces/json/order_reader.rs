use crate::domain::input::OrderBulkCreateInput;
use crate::error::{BulkError, Result};
use serde_json::Value;
use std::io::Read;

/// Reads order inputs from a JSON array.
///
/// The array itself must be well formed. Its elements are deserialized one by
/// one, so a malformed order surfaces as an `Err` item while the rest of the
/// request is still read.
pub struct OrderReader<R: Read> {
    source: R,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn orders(self) -> Result<impl Iterator<Item = Result<OrderBulkCreateInput>>> {
        let elements: Vec<Value> = serde_json::from_reader(self.source)?;
        tracing::debug!(orders = elements.len(), "order input read");
        Ok(elements
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(BulkError::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = r#"{
        "channel": "channel-pln",
        "createdAt": "2024-01-01T10:00:00Z",
        "user": {"email": "customer@example.com"},
        "billingAddress": {},
        "languageCode": "PL",
        "lines": [],
        "deliveryMethod": {"shippingMethodName": "DHL"}
    }"#;

    #[test]
    fn test_reader_valid_array() {
        let data = format!("[{ORDER}, {ORDER}]");
        let reader = OrderReader::new(data.as_bytes());
        let orders: Vec<Result<OrderBulkCreateInput>> = reader.orders().unwrap().collect();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].as_ref().unwrap().channel, "channel-pln");
    }

    #[test]
    fn test_reader_malformed_element() {
        let data = format!(r#"[{{"channel": 1}}, {ORDER}]"#);
        let reader = OrderReader::new(data.as_bytes());
        let orders: Vec<Result<OrderBulkCreateInput>> = reader.orders().unwrap().collect();

        assert!(matches!(orders[0], Err(BulkError::JsonError(_))));
        assert!(orders[1].is_ok());
    }

    #[test]
    fn test_reader_not_an_array() {
        let reader = OrderReader::new(ORDER.as_bytes());
        assert!(reader.orders().is_err());
    }
}
