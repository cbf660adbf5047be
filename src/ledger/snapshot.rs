//! Serializable ledger state for hosts that need durability.
//!
//! The ledger itself never touches disk. A host takes a snapshot, stores it
//! however it likes, and later restores against the same catalog.

use super::core::DerivativesLedger;
use super::results::LedgerError;
use crate::events::{TradeAction, TradeEvent, TradeLog};
use crate::id::IdMinter;
use crate::position::Position;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub reference_index: Decimal,
    pub id_counter: u64,
    // sorted by id so equal ledgers give equal snapshots
    pub positions: Vec<Position>,
    pub trades: Vec<TradeEvent>,
}

impl DerivativesLedger {
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut positions: Vec<Position> = self.positions.values().cloned().collect();
        positions.sort_by(|a, b| a.id.cmp(&b.id));

        LedgerSnapshot {
            reference_index: self.reference_index,
            id_counter: self.ids.counter(),
            positions,
            trades: self.trades.entries().to_vec(),
        }
    }

    /// Replace this ledger's state with `snapshot`. Every position must
    /// reference an instrument in this ledger's catalog, appear once, and
    /// have an Open trade in the log. The id counter must cover every id the
    /// log implies (two per open, one per close). On error nothing is
    /// changed. The id sequence continues where it stopped.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for position in &snapshot.positions {
            self.instrument_or_err(&position.ticker)?;
            if !seen.insert(position.id) {
                return Err(LedgerError::InvalidSnapshot(format!("duplicate position {}", position.id)));
            }
        }

        let opened: HashSet<_> = snapshot
            .trades
            .iter()
            .filter(|t| t.action == TradeAction::Open)
            .map(|t| t.position_id)
            .collect();
        if let Some(orphan) = snapshot.positions.iter().find(|p| !opened.contains(&p.id)) {
            return Err(LedgerError::InvalidSnapshot(format!("position {} has no open trade", orphan.id)));
        }

        let minted = (snapshot.trades.len() as u64).saturating_add(
            snapshot.trades.iter().filter(|t| t.action == TradeAction::Open).count() as u64,
        );
        if snapshot.id_counter < minted {
            return Err(LedgerError::InvalidSnapshot(format!(
                "id counter {} behind the {} ids already issued",
                snapshot.id_counter, minted
            )));
        }

        self.reference_index = snapshot.reference_index;
        self.ids = IdMinter::resume(self.config.id_domain.clone(), snapshot.id_counter);
        self.positions = snapshot.positions.into_iter().map(|p| (p.id, p)).collect();
        self.trades = TradeLog::from_entries(snapshot.trades);
        debug!(counter = self.ids.counter(), positions = self.positions.len(), "ledger restored");
        Ok(())
    }
}
