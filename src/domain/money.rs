use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places prices are stored with.
pub const DECIMAL_PLACES: u32 = 3;

/// A sum went past the largest representable amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Amount exceeds the largest supported value.")]
pub struct AmountOverflow;

/// A net/gross pair of amounts sharing the currency of the order they belong to.
///
/// The currency itself lives on the order, so sums never have to reconcile
/// mismatched currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxedMoney {
    pub net: Decimal,
    pub gross: Decimal,
}

impl TaxedMoney {
    pub const ZERO: Self = Self {
        net: Decimal::ZERO,
        gross: Decimal::ZERO,
    };

    pub fn new(net: Decimal, gross: Decimal) -> Self {
        Self { net, gross }
    }

    /// Splits a line total into the price of a single unit.
    ///
    /// `quantity` must be positive; callers validate it before pricing a line.
    pub fn per_unit(&self, quantity: u32) -> Self {
        let quantity = Decimal::from(quantity);
        Self {
            net: (self.net / quantity).round_dp(DECIMAL_PLACES),
            gross: (self.gross / quantity).round_dp(DECIMAL_PLACES),
        }
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, AmountOverflow> {
        Ok(Self {
            net: self.net.checked_add(rhs.net).ok_or(AmountOverflow)?,
            gross: self.gross.checked_add(rhs.gross).ok_or(AmountOverflow)?,
        })
    }

    pub fn checked_sum<I: IntoIterator<Item = Self>>(items: I) -> Result<Self, AmountOverflow> {
        items
            .into_iter()
            .try_fold(Self::ZERO, |total, item| total.checked_add(item))
    }

    pub fn with_currency(&self, currency: &str) -> TaxedMoneyView {
        TaxedMoneyView {
            net: Money::new(self.net, currency),
            gross: Money::new(self.gross, currency),
        }
    }
}

/// An amount tagged with its currency, used in output projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxedMoneyView {
    pub net: Money,
    pub gross: Money,
}
