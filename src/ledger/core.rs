// 8.0 ledger/core.rs: main ledger struct. construction and read-only queries.

use crate::config::{ConfigError, LedgerConfig};
use crate::events::TradeLog;
use crate::id::IdMinter;
use crate::instrument::{InstrumentCatalog, InstrumentSpec};
use crate::position::Position;
use crate::types::PositionId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/** 8.1: main ledger struct. all state lives here */
#[derive(Debug, Clone)]
pub struct DerivativesLedger {
    pub(super) config: LedgerConfig,
    pub(super) catalog: InstrumentCatalog,
    pub(super) positions: HashMap<PositionId, Position>,
    pub(super) trades: TradeLog,
    pub(super) ids: IdMinter,
    pub(super) reference_index: Decimal,
}

impl DerivativesLedger {
    pub fn new(config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: LedgerConfig) -> Self {
        Self {
            catalog: InstrumentCatalog::new(config.instruments.clone()),
            positions: HashMap::new(),
            trades: TradeLog::new(),
            ids: IdMinter::new(config.id_domain.clone()),
            reference_index: config.baseline_index,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Catalog in insertion order. Call again to restart.
    pub fn list_instruments(&self) -> impl Iterator<Item = &InstrumentSpec> + Clone + '_ {
        self.catalog.iter()
    }

    pub fn instrument(&self, ticker: &str) -> Option<&InstrumentSpec> {
        self.catalog.get(ticker)
    }

    pub fn get_position(&self, position_id: &PositionId) -> Option<&Position> {
        self.positions.get(position_id)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> + '_ {
        self.positions.values()
    }

    pub fn open_position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn trade_log(&self) -> &TradeLog {
        &self.trades
    }

    pub fn reference_index(&self) -> Decimal {
        self.reference_index
    }

    pub fn id_counter(&self) -> u64 {
        self.ids.counter()
    }
}

impl Default for DerivativesLedger {
    fn default() -> Self {
        Self::from_valid_config(LedgerConfig::default())
    }
}
