use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A payment recorded against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub gateway: String,
    pub psp_reference: Option<String>,
    pub currency: String,
    pub total: Decimal,
    pub captured_amount: Decimal,
}

impl Payment {
    pub fn new(gateway: &str, currency: &str, total: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            gateway: gateway.to_string(),
            psp_reference: None,
            currency: currency.to_string(),
            total,
            captured_amount: Decimal::ZERO,
        }
    }
}

/// Data about a payment-related event, handed from the code that observed it
/// to the code that reacts to it.
///
/// The payment is borrowed: whoever builds the action keeps owning the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAction<'a> {
    payment: &'a Payment,
    amount: Decimal,
}

impl<'a> PaymentAction<'a> {
    pub fn new(payment: &'a Payment, amount: Decimal) -> Self {
        Self { payment, amount }
    }

    pub fn payment(&self) -> &'a Payment {
        self.payment
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_reads_back_inputs() {
        let payment = Payment::new("mirumee.payments.dummy", "PLN", dec!(100));
        let action = PaymentAction::new(&payment, dec!(12.3450));

        assert!(std::ptr::eq(action.payment(), &payment));
        assert_eq!(action.amount(), dec!(12.345));
        // scale is kept as given
        assert_eq!(action.amount().scale(), 4);
        assert_eq!(action.amount().to_string(), "12.3450");
    }

    #[test]
    fn test_action_accepts_any_amount() {
        let payment = Payment::new("gw", "USD", dec!(1));
        assert_eq!(PaymentAction::new(&payment, dec!(-5)).amount(), dec!(-5));
        assert_eq!(PaymentAction::new(&payment, Decimal::ZERO).amount(), dec!(0));
    }

    #[test]
    fn test_action_value_equality() {
        let payment = Payment::new("gw", "USD", dec!(50));
        let same_payment = payment.clone();
        let other = Payment::new("gw", "USD", dec!(50));

        assert_eq!(
            PaymentAction::new(&payment, dec!(10)),
            PaymentAction::new(&same_payment, dec!(10.0))
        );
        assert_ne!(
            PaymentAction::new(&payment, dec!(10)),
            PaymentAction::new(&payment, dec!(11))
        );
        // different ids
        assert_ne!(
            PaymentAction::new(&payment, dec!(10)),
            PaymentAction::new(&other, dec!(10))
        );
    }

    #[test]
    fn test_action_is_shareable_across_threads() {
        let payment = Payment::new("gw", "EUR", dec!(20));
        let action = PaymentAction::new(&payment, dec!(20));

        std::thread::scope(|s| {
            let handle = s.spawn(move || action.amount());
            assert_eq!(handle.join().unwrap(), dec!(20));
        });
        assert_eq!(action.payment().currency, "EUR");
    }
}
