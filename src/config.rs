// 7.0 config.rs: everything the ledger needs at construction. catalog, index
// baseline, pricing and margin constants, id domain.
// 7.1 validate() runs before any ledger is built from an untrusted config.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::id::DEFAULT_ID_DOMAIN;
use crate::instrument::{standard_instruments, InstrumentSpec};
use crate::margin::{DEFAULT_FEE_BPS, DEFAULT_MIN_MARGIN_RATIO};
use crate::mark_price::DEFAULT_WOBBLE_MULTIPLIER;
use crate::types::Bps;

pub const DEFAULT_BASELINE_INDEX: Decimal = dec!(1847.3291);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Instrument catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate ticker {0}")]
    DuplicateTicker(String),

    #[error("Instrument {ticker} has non-positive notional per unit {value}")]
    InvalidNotional { ticker: String, value: Decimal },

    #[error("Instrument {0} has zero max leverage")]
    ZeroLeverage(String),

    #[error("Instrument {ticker} has negative decay coefficient {value}")]
    NegativeDecay { ticker: String, value: Decimal },

    #[error("Minimum margin ratio must be positive, got {0}")]
    InvalidMinMarginRatio(Decimal),

    #[error("Fee must be non-negative, got {0} bps")]
    NegativeFee(i32),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    // Catalog, in listing order
    pub instruments: Vec<InstrumentSpec>,
    // Reference index at construction
    pub baseline_index: Decimal,
    // mark = index + index * wobble_multiplier * decay
    pub wobble_multiplier: Decimal,
    // Charged on open and on close
    pub fee_bps: Bps,
    // margin / notional must be at least 1 / min_margin_ratio
    pub min_margin_ratio: Decimal,
    // Domain separation tag for identifier hashing
    pub id_domain: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            instruments: standard_instruments(),
            baseline_index: DEFAULT_BASELINE_INDEX,
            wobble_multiplier: DEFAULT_WOBBLE_MULTIPLIER,
            fee_bps: Bps::new(DEFAULT_FEE_BPS), // 0.22%
            min_margin_ratio: DEFAULT_MIN_MARGIN_RATIO,
            id_domain: DEFAULT_ID_DOMAIN.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn with_instruments(instruments: Vec<InstrumentSpec>) -> Self {
        Self {
            instruments,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for spec in &self.instruments {
            if !seen.insert(spec.ticker.as_str()) {
                return Err(ConfigError::DuplicateTicker(spec.ticker.clone()));
            }
            if spec.notional_per_unit <= Decimal::ZERO {
                return Err(ConfigError::InvalidNotional {
                    ticker: spec.ticker.clone(),
                    value: spec.notional_per_unit,
                });
            }
            if spec.max_leverage == 0 {
                return Err(ConfigError::ZeroLeverage(spec.ticker.clone()));
            }
            if spec.decay_coefficient < Decimal::ZERO {
                return Err(ConfigError::NegativeDecay {
                    ticker: spec.ticker.clone(),
                    value: spec.decay_coefficient,
                });
            }
        }

        if self.min_margin_ratio <= Decimal::ZERO {
            return Err(ConfigError::InvalidMinMarginRatio(self.min_margin_ratio));
        }

        if self.fee_bps.value() < 0 {
            return Err(ConfigError::NegativeFee(self.fee_bps.value()));
        }

        Ok(())
    }
}
