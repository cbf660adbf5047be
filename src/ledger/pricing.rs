//! Reference index and mark price operations.

use super::core::DerivativesLedger;
use super::results::LedgerError;
use crate::instrument::InstrumentSpec;
use crate::mark_price::mark_for;
use rust_decimal::Decimal;
use tracing::debug;

impl DerivativesLedger {
    /// Mark price for `ticker` at the current reference index.
    pub fn get_mark_price(&self, ticker: &str) -> Result<Decimal, LedgerError> {
        let spec = self.instrument_or_err(ticker)?;
        self.mark_of(spec)
    }

    /// Overwrite the reference index. Not validated; the price feed is trusted.
    pub fn update_reference_index(&mut self, value: Decimal) {
        let previous = self.reference_index;
        self.reference_index = value;
        debug!(%previous, index = %value, "reference index updated");
    }

    pub(super) fn instrument_or_err(&self, ticker: &str) -> Result<&InstrumentSpec, LedgerError> {
        self.catalog
            .get(ticker)
            .ok_or_else(|| LedgerError::UnknownInstrument(ticker.to_string()))
    }

    pub(super) fn mark_of(&self, spec: &InstrumentSpec) -> Result<Decimal, LedgerError> {
        mark_for(spec, self.reference_index, self.config.wobble_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use rust_decimal_macros::dec;

    #[test]
    fn mark_is_deterministic() {
        let ledger = DerivativesLedger::default();
        for spec in ledger.list_instruments() {
            let a = ledger.get_mark_price(&spec.ticker).unwrap();
            let b = ledger.get_mark_price(&spec.ticker).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unknown_ticker() {
        let ledger = DerivativesLedger::default();
        assert_eq!(
            ledger.get_mark_price("XX-1"),
            Err(LedgerError::UnknownInstrument("XX-1".to_string()))
        );
    }

    #[test]
    fn index_update_moves_mark() {
        let mut ledger = DerivativesLedger::default();
        assert_eq!(ledger.get_mark_price("GLX-SWAP").unwrap(), dec!(1847.3291));

        ledger.update_reference_index(dec!(2000));
        assert_eq!(ledger.get_mark_price("GLX-SWAP").unwrap(), dec!(2000));
        // 2000 - 2000 * 0.47 * 0.25
        assert_eq!(ledger.get_mark_price("ZW9-PERP").unwrap(), dec!(1765));
    }

    #[test]
    fn any_index_value_accepted() {
        let mut ledger = DerivativesLedger::default();
        ledger.update_reference_index(dec!(-5));
        assert_eq!(ledger.reference_index(), dec!(-5));
        ledger.update_reference_index(Decimal::ZERO);
        assert_eq!(ledger.get_mark_price("KV47-CVX").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overflowing_index_surfaces_as_error() {
        let config = LedgerConfig {
            wobble_multiplier: dec!(1),
            ..LedgerConfig::default()
        };
        let mut ledger = DerivativesLedger::new(config).unwrap();
        ledger.update_reference_index(Decimal::MAX);

        // zero decay never leaves the index
        assert_eq!(ledger.get_mark_price("GLX-SWAP"), Ok(Decimal::MAX));
        // MAX + MAX * 0.85 does not fit
        assert_eq!(
            ledger.get_mark_price("ZW9-M3"),
            Err(LedgerError::ArithmeticOverflow("mark price"))
        );
    }
}
