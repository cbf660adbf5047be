//! Property-based tests for the pricing and margin math.
//!
//! These tests verify invariants hold under random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wobble_ledger::*;

// Strategies for generating test data
fn index_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|x| Decimal::new(x, 2)) // 0.01 to 10,000
}

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|x| Decimal::new(x, 3)) // 0.001 to 100
}

fn ticker_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("ZW9-M3"), Just("GLX-SWAP"), Just("KV47-CVX"), Just("ZW9-PERP")]
}

fn side_strategy() -> impl Strategy<Value = i8> {
    prop_oneof![Just(1i8), Just(-1i8)]
}

proptest! {
    /// Mark price only depends on index and ticker
    #[test]
    fn mark_is_deterministic(index in index_strategy(), ticker in ticker_strategy()) {
        let mut a = DerivativesLedger::default();
        let mut b = DerivativesLedger::default();
        a.update_reference_index(index);
        b.update_reference_index(index);

        prop_assert_eq!(a.get_mark_price(ticker).unwrap(), a.get_mark_price(ticker).unwrap());
        prop_assert_eq!(a.get_mark_price(ticker).unwrap(), b.get_mark_price(ticker).unwrap());
    }

    /// With a negative wobble and non-negative decay the mark never exceeds the index
    #[test]
    fn mark_at_or_below_index(index in index_strategy(), ticker in ticker_strategy()) {
        let mut ledger = DerivativesLedger::default();
        ledger.update_reference_index(index);
        let mark = ledger.get_mark_price(ticker).unwrap();
        prop_assert!(mark <= index);
        prop_assert!(mark > Decimal::ZERO);
    }

    /// Posting the full notional always opens: it covers any leverage and the ratio floor
    #[test]
    fn full_notional_margin_always_opens(
        index in index_strategy(),
        ticker in ticker_strategy(),
        side in side_strategy(),
        quantity in quantity_strategy(),
    ) {
        let mut ledger = DerivativesLedger::default();
        ledger.update_reference_index(index);
        let mark = ledger.get_mark_price(ticker).unwrap();

        let pos = ledger.open_position(ticker, side, quantity, Quote::new(quantity * mark), Timestamp::from_millis(0));
        prop_assert!(pos.is_ok());
    }

    /// Margin below notional / 1.15 is always rejected
    #[test]
    fn margin_below_floor_rejected(
        ticker in ticker_strategy(),
        quantity in quantity_strategy(),
        shortfall_pct in 1u32..100u32,
    ) {
        let mut ledger = DerivativesLedger::default();
        let mark = ledger.get_mark_price(ticker).unwrap();
        let floor = quantity * mark / dec!(1.15);
        let margin = floor * Decimal::from(100 - shortfall_pct) / dec!(100);

        let result = ledger.open_position(ticker, 1, quantity, Quote::new(margin), Timestamp::from_millis(0));
        let rejected = matches!(
            result,
            Err(LedgerError::MarginRatioTooLow { .. }) | Err(LedgerError::InsufficientMargin { .. })
        );
        prop_assert!(rejected);
        prop_assert_eq!(ledger.open_position_count(), 0);
    }

    /// Fee is 22 bps of executed notional on both legs
    #[test]
    fn fee_is_22_bps(
        index in index_strategy(),
        ticker in ticker_strategy(),
        quantity in quantity_strategy(),
    ) {
        let mut ledger = DerivativesLedger::default();
        ledger.update_reference_index(index);
        let mark = ledger.get_mark_price(ticker).unwrap();
        let pos = ledger
            .open_position(ticker, 1, quantity, Quote::new(quantity * mark), Timestamp::from_millis(0))
            .unwrap();
        let close = ledger.close_position(&pos.id, Timestamp::from_millis(1)).unwrap().unwrap();

        for trade in ledger.trade_log().iter() {
            prop_assert_eq!(trade.fee.value(), trade.quantity * trade.price * dec!(0.0022));
        }
        prop_assert_eq!(close.fee, ledger.trade_log().entries()[0].fee);
    }

    /// Long and short of equal size have opposite PnL at any mark
    #[test]
    fn pnl_is_antisymmetric(
        quantity in quantity_strategy(),
        mark in index_strategy(),
    ) {
        let mut ledger = DerivativesLedger::default();
        let entry = ledger.get_mark_price("GLX-SWAP").unwrap();
        let margin = Quote::new(quantity * entry);

        let long = ledger.open_position("GLX-SWAP", 1, quantity, margin, Timestamp::from_millis(0)).unwrap();
        let short = ledger.open_position("GLX-SWAP", -1, quantity, margin, Timestamp::from_millis(0)).unwrap();

        let long_pnl = ledger.pnl(&long.id, Some(mark)).unwrap();
        let short_pnl = ledger.pnl(&short.id, Some(mark)).unwrap();
        prop_assert_eq!(long_pnl.value() + short_pnl.value(), Decimal::ZERO);
        prop_assert_eq!(long_pnl.value(), quantity * (mark - entry));
    }

    /// Sides other than +1 / -1 never open anything
    #[test]
    fn bad_side_rejected(side in any::<i8>().prop_filter("not a valid side", |s| *s != 1 && *s != -1)) {
        let mut ledger = DerivativesLedger::default();
        let result = ledger.open_position("GLX-SWAP", side, dec!(1), Quote::new(dec!(5000)), Timestamp::from_millis(0));
        prop_assert_eq!(result, Err(LedgerError::InvalidSide(side)));
        prop_assert_eq!(ledger.id_counter(), 0);
    }
}
