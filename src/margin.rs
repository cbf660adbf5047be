//! Margin and fee calculation for position opens.
//!
//! Required margin is notional divided by the instrument's leverage cap.
//! On top of that, posted margin must cover a fixed minimum fraction of
//! notional: `margin / notional >= 1 / min_margin_ratio`. Both checks run
//! once, at open. There is no maintenance margin afterwards.

use crate::instrument::InstrumentSpec;
use crate::ledger::LedgerError;
use crate::types::{Bps, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_MIN_MARGIN_RATIO: Decimal = dec!(1.15);
pub const DEFAULT_FEE_BPS: i32 = 22;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginRequirement {
    pub notional: Quote,
    pub required: Quote,
}

pub fn notional_value(quantity: Decimal, mark: Decimal) -> Result<Quote, LedgerError> {
    quantity
        .checked_mul(mark)
        .map(Quote::new)
        .ok_or(LedgerError::ArithmeticOverflow("notional"))
}

pub fn calculate_margin_requirement(
    spec: &InstrumentSpec,
    quantity: Decimal,
    mark: Decimal,
) -> Result<MarginRequirement, LedgerError> {
    let notional = notional_value(quantity, mark)?;
    // leverage >= 1, so this division can only shrink the value
    let required = Quote::new(notional.value() / spec.max_leverage_decimal());
    Ok(MarginRequirement { notional, required })
}

// leverage check first, then the ratio floor. a zero or negative notional
// (index at or below zero) has no valid ratio and is always rejected.
// for positive notional the ratio test is margin * ratio < notional, which
// avoids an inexact division
pub fn check_margin(
    requirement: &MarginRequirement,
    posted: Quote,
    min_margin_ratio: Decimal,
) -> Result<(), LedgerError> {
    if posted < requirement.required {
        return Err(LedgerError::InsufficientMargin {
            posted,
            required: requirement.required,
        });
    }

    let notional = requirement.notional.value();
    // overflow only happens when posted * ratio exceeds Decimal::MAX, i.e. it clears any notional
    let below_floor = notional <= Decimal::ZERO
        || posted
            .value()
            .checked_mul(min_margin_ratio)
            .map_or(false, |scaled| scaled < notional);

    if below_floor {
        return Err(LedgerError::MarginRatioTooLow {
            posted,
            notional: requirement.notional,
            min_ratio: min_margin_ratio,
        });
    }

    Ok(())
}

/// fee = quantity * price * bps / 10_000. same formula for open and close.
pub fn trade_fee(quantity: Decimal, price: Decimal, fee_bps: Bps) -> Result<Quote, LedgerError> {
    quantity
        .checked_mul(price)
        .and_then(|notional| notional.checked_mul(fee_bps.as_fraction()))
        .map(Quote::new)
        .ok_or(LedgerError::ArithmeticOverflow("fee"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::InstrumentSpec;
    use rust_decimal_macros::dec;

    #[test]
    fn requirement_divides_by_leverage() {
        let spec = InstrumentSpec::zw9_m3(); // 5x
        let req = calculate_margin_requirement(&spec, dec!(10), dec!(100)).unwrap();
        assert_eq!(req.notional.value(), dec!(1000));
        assert_eq!(req.required.value(), dec!(200));
    }

    #[test]
    fn insufficient_margin_reported_first() {
        let spec = InstrumentSpec::glx_swap(); // 1x
        let req = calculate_margin_requirement(&spec, dec!(1), dec!(100)).unwrap();
        let err = check_margin(&req, Quote::new(dec!(99)), DEFAULT_MIN_MARGIN_RATIO).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientMargin { .. }));
    }

    #[test]
    fn ratio_floor_applies_even_when_leverage_allows() {
        let spec = InstrumentSpec::zw9_perp(); // 20x
        let req = calculate_margin_requirement(&spec, dec!(1), dec!(100)).unwrap();
        // 5 covers 20x but 5 * 1.15 < 100
        let err = check_margin(&req, Quote::new(dec!(5)), DEFAULT_MIN_MARGIN_RATIO).unwrap_err();
        assert!(matches!(err, LedgerError::MarginRatioTooLow { .. }));
    }

    #[test]
    fn ratio_floor_boundary() {
        let spec = InstrumentSpec::zw9_perp();
        let req = calculate_margin_requirement(&spec, dec!(1), dec!(115)).unwrap();
        // 100 * 1.15 == 115, exactly on the floor
        assert!(check_margin(&req, Quote::new(dec!(100)), DEFAULT_MIN_MARGIN_RATIO).is_ok());
        assert!(check_margin(&req, Quote::new(dec!(99.99)), DEFAULT_MIN_MARGIN_RATIO).is_err());
    }

    #[test]
    fn fee_is_22_bps_of_notional() {
        let fee = trade_fee(dec!(10), dec!(1000), Bps::new(DEFAULT_FEE_BPS)).unwrap();
        assert_eq!(fee.value(), dec!(22));
    }

    #[test]
    fn non_positive_notional_fails_ratio_floor() {
        let spec = InstrumentSpec::glx_swap();
        for mark in [dec!(-100), Decimal::ZERO] {
            let req = calculate_margin_requirement(&spec, dec!(1), mark).unwrap();
            for posted in [Decimal::ZERO, dec!(10)] {
                let err = check_margin(&req, Quote::new(posted), DEFAULT_MIN_MARGIN_RATIO).unwrap_err();
                assert!(matches!(err, LedgerError::MarginRatioTooLow { .. }));
            }
        }
    }

    #[test]
    fn huge_margin_clears_floor() {
        let spec = InstrumentSpec::glx_swap();
        let req = calculate_margin_requirement(&spec, dec!(1), dec!(100)).unwrap();
        assert!(check_margin(&req, Quote::new(Decimal::MAX), DEFAULT_MIN_MARGIN_RATIO).is_ok());
    }

    #[test]
    fn overflowing_notional_and_fee_are_errors() {
        let spec = InstrumentSpec::glx_swap();
        let err = calculate_margin_requirement(&spec, Decimal::MAX, dec!(2)).unwrap_err();
        assert_eq!(err, LedgerError::ArithmeticOverflow("notional"));

        let err = trade_fee(Decimal::MAX, dec!(2), Bps::new(DEFAULT_FEE_BPS)).unwrap_err();
        assert_eq!(err, LedgerError::ArithmeticOverflow("fee"));
    }
}
