//! Instrument catalog.
//!
//! An instrument is a static contract definition: ticker, category, unit
//! notional, leverage cap and the decay coefficient that shifts its mark away
//! from the reference index. The catalog is built once and never mutated.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Derivative category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivativeKind {
    /// Dated wobble future
    WobbleFuture,
    /// Gelatin-index swap, tracks the index one to one
    GelatinSwap,
    /// Convexity-decay note
    ConvexityNote,
    /// Perpetual with slow decay
    DecayPerpetual,
}

impl fmt::Display for DerivativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DerivativeKind::WobbleFuture => "wobble-future",
            DerivativeKind::GelatinSwap => "gelatin-swap",
            DerivativeKind::ConvexityNote => "convexity-note",
            DerivativeKind::DecayPerpetual => "decay-perpetual",
        };
        f.pad(name)
    }
}

/// Static instrument definition (immutable after construction)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Unique key (e.g., "ZW9-M3")
    pub ticker: String,
    pub kind: DerivativeKind,
    /// Notional value of one contract unit
    pub notional_per_unit: Decimal,
    /// Leverage cap. required margin = notional / max_leverage
    pub max_leverage: u32,
    /// Scales the wobble multiplier in the mark price
    pub decay_coefficient: Decimal,
}

impl InstrumentSpec {
    pub fn new(
        ticker: impl Into<String>,
        kind: DerivativeKind,
        notional_per_unit: Decimal,
        max_leverage: u32,
        decay_coefficient: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
            notional_per_unit,
            max_leverage,
            decay_coefficient,
        }
    }

    /// Front-month wobble future.
    pub fn zw9_m3() -> Self {
        Self::new("ZW9-M3", DerivativeKind::WobbleFuture, dec!(1000), 5, dec!(0.85))
    }

    /// Unlevered gelatin-index swap.
    pub fn glx_swap() -> Self {
        Self::new("GLX-SWAP", DerivativeKind::GelatinSwap, dec!(100), 1, dec!(0))
    }

    pub fn kv47_cvx() -> Self {
        Self::new("KV47-CVX", DerivativeKind::ConvexityNote, dec!(250), 10, dec!(0.4))
    }

    pub fn zw9_perp() -> Self {
        Self::new("ZW9-PERP", DerivativeKind::DecayPerpetual, dec!(500), 20, dec!(0.25))
    }

    pub fn max_leverage_decimal(&self) -> Decimal {
        Decimal::from(self.max_leverage)
    }
}

/// The four standard instruments, one per category, in catalog order.
pub fn standard_instruments() -> Vec<InstrumentSpec> {
    vec![
        InstrumentSpec::zw9_m3(),
        InstrumentSpec::glx_swap(),
        InstrumentSpec::kv47_cvx(),
        InstrumentSpec::zw9_perp(),
    ]
}

/// Ordered, keyed instrument set. Order is insertion order.
#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    specs: Vec<InstrumentSpec>,
    by_ticker: HashMap<String, usize>,
}

impl InstrumentCatalog {
    // duplicates are rejected by LedgerConfig::validate before we get here;
    // if one slips through the first entry wins
    pub fn new(specs: Vec<InstrumentSpec>) -> Self {
        let mut by_ticker = HashMap::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            by_ticker.entry(spec.ticker.clone()).or_insert(idx);
        }
        Self { specs, by_ticker }
    }

    pub fn get(&self, ticker: &str) -> Option<&InstrumentSpec> {
        self.by_ticker.get(ticker).map(|&idx| &self.specs[idx])
    }

    /// Restartable: the iterator is `Clone` and every call starts from the top.
    pub fn iter(&self) -> std::slice::Iter<'_, InstrumentSpec> {
        self.specs.iter()
    }
}
