use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderBulkCreateErrorCode {
    GraphqlError,
    Required,
    Invalid,
    NotFound,
    Unique,
    DuplicatedInputItem,
    IncorrectCurrency,
    InvalidQuantity,
    PriceError,
}

impl fmt::Display for OrderBulkCreateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::GraphqlError => "GRAPHQL_ERROR",
            Self::Required => "REQUIRED",
            Self::Invalid => "INVALID",
            Self::NotFound => "NOT_FOUND",
            Self::Unique => "UNIQUE",
            Self::DuplicatedInputItem => "DUPLICATED_INPUT_ITEM",
            Self::IncorrectCurrency => "INCORRECT_CURRENCY",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::PriceError => "PRICE_ERROR",
        };
        f.write_str(code)
    }
}

/// A problem with one submitted order.
///
/// `field` is a dotted camelCase path into the order input, e.g. `lines.0.quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBulkCreateError {
    pub field: Option<String>,
    pub message: String,
    pub code: OrderBulkCreateErrorCode,
}

impl OrderBulkCreateError {
    pub fn new(
        field: impl Into<Option<String>>,
        message: impl Into<String>,
        code: OrderBulkCreateErrorCode,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    pub fn at(field: &str, message: impl Into<String>, code: OrderBulkCreateErrorCode) -> Self {
        Self::new(field.to_string(), message, code)
    }

    /// Prefixes the field path, e.g. `quantity` under `lines.0`.
    pub fn nested(mut self, prefix: &str) -> Self {
        self.field = Some(match self.field {
            Some(field) => format!("{prefix}.{field}"),
            None => prefix.to_string(),
        });
        self
    }
}

impl fmt::Display for OrderBulkCreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} ({})", field, self.message, self.code),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

/// What to do with the request when some orders have errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorPolicy {
    /// Save nothing if any order has an error.
    #[default]
    RejectEverything,
    /// Save only the orders without errors.
    RejectFailedRows,
    /// Save every order that can be built, skipping the invalid parts of it.
    IgnoreFailed,
}
