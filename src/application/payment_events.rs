//! Reactions of an order to payment events.

use crate::domain::money::AmountOverflow;
use crate::domain::order::{Order, OrderEvent, OrderEventKind};
use crate::domain::payment::PaymentAction;
use chrono::{DateTime, Utc};

/// Records that `action.amount()` was captured from `action.payment()`.
///
/// The order is left untouched when the charged amount would overflow.
pub fn order_captured(
    order: &mut Order,
    action: PaymentAction<'_>,
    date: DateTime<Utc>,
) -> Result<(), AmountOverflow> {
    order.total_charged = order
        .total_charged
        .checked_add(action.amount())
        .ok_or(AmountOverflow)?;
    order.events.push(OrderEvent::new(
        date,
        OrderEventKind::PaymentCaptured {
            payment_id: action.payment().id,
            amount: action.amount(),
        },
    ));
    order.update_charge_status();
    tracing::debug!(
        order_id = %order.id,
        payment_id = %action.payment().id,
        amount = %action.amount(),
        "payment captured"
    );
    Ok(())
}

/// Records that `action.amount()` was refunded back through `action.payment()`.
pub fn order_refunded(
    order: &mut Order,
    action: PaymentAction<'_>,
    date: DateTime<Utc>,
) -> Result<(), AmountOverflow> {
    order.total_charged = order
        .total_charged
        .checked_sub(action.amount())
        .ok_or(AmountOverflow)?;
    order.events.push(OrderEvent::new(
        date,
        OrderEventKind::PaymentRefunded {
            payment_id: action.payment().id,
            amount: action.amount(),
        },
    ));
    order.update_charge_status();
    tracing::debug!(
        order_id = %order.id,
        payment_id = %action.payment().id,
        amount = %action.amount(),
        "payment refunded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::TaxedMoney;
    use crate::domain::order::OrderChargeStatus;
    use crate::domain::order::tests::{sample_line, sample_order};
    use crate::domain::payment::Payment;
    use rust_decimal_macros::dec;

    fn order_worth(gross: rust_decimal::Decimal) -> Order {
        sample_order(
            vec![sample_line(TaxedMoney::new(gross, gross), 1)],
            TaxedMoney::ZERO,
        )
    }

    #[test]
    fn test_capture_updates_charge_status() {
        let mut order = order_worth(dec!(100));
        let payment = Payment::new("gw", "PLN", dec!(100));

        order_captured(&mut order, PaymentAction::new(&payment, dec!(40)), Utc::now()).unwrap();
        assert_eq!(order.total_charged, dec!(40));
        assert_eq!(order.charge_status, OrderChargeStatus::Partial);

        order_captured(&mut order, PaymentAction::new(&payment, dec!(60)), Utc::now()).unwrap();
        assert_eq!(order.total_charged, dec!(100));
        assert_eq!(order.charge_status, OrderChargeStatus::Full);

        assert_eq!(order.events.len(), 2);
        assert_eq!(
            order.events[1].kind,
            OrderEventKind::PaymentCaptured {
                payment_id: payment.id,
                amount: dec!(60)
            }
        );
    }

    #[test]
    fn test_refund_reduces_charged_amount() {
        let mut order = order_worth(dec!(50));
        let payment = Payment::new("gw", "PLN", dec!(60));

        order_captured(&mut order, PaymentAction::new(&payment, dec!(60)), Utc::now()).unwrap();
        assert_eq!(order.charge_status, OrderChargeStatus::Overcharged);

        order_refunded(&mut order, PaymentAction::new(&payment, dec!(10)), Utc::now()).unwrap();
        assert_eq!(order.total_charged, dec!(50));
        assert_eq!(order.charge_status, OrderChargeStatus::Full);

        order_refunded(&mut order, PaymentAction::new(&payment, dec!(50)), Utc::now()).unwrap();
        assert_eq!(order.charge_status, OrderChargeStatus::None);
        assert!(matches!(
            order.events.last().map(|e| &e.kind),
            Some(OrderEventKind::PaymentRefunded { .. })
        ));
    }

    #[test]
    fn test_capture_overflow_leaves_order_untouched() {
        let mut order = order_worth(dec!(10));
        let payment = Payment::new("gw", "PLN", rust_decimal::Decimal::MAX);

        order_captured(&mut order, PaymentAction::new(&payment, dec!(1)), Utc::now()).unwrap();
        let action = PaymentAction::new(&payment, rust_decimal::Decimal::MAX);
        assert_eq!(order_captured(&mut order, action, Utc::now()), Err(AmountOverflow));

        assert_eq!(order.total_charged, dec!(1));
        assert_eq!(order.events.len(), 1);
    }
}
