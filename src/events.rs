// 11.0: every open and close appends a TradeEvent. the log is append-only and
// never rewritten, so it is the audit trail for every position ever held.

use crate::types::{PositionId, Quote, Side, Timestamp, TradeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub id: TradeId,
    pub position_id: PositionId,
    pub ticker: String,
    pub action: TradeAction,
    // the side traded: the position's side on open, its opposite on close
    pub side: Side,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fee: Quote,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeLog {
    entries: Vec<TradeEvent>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<TradeEvent>) -> Self {
        Self { entries }
    }

    pub(crate) fn append(&mut self, event: TradeEvent) {
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[TradeEvent] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TradeEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeEvent> {
        self.entries.iter()
    }

    pub fn for_position<'a>(&'a self, position_id: &'a PositionId) -> impl Iterator<Item = &'a TradeEvent> + 'a {
        self.entries.iter().filter(move |e| &e.position_id == position_id)
    }

    pub fn total_fees(&self) -> Quote {
        self.entries.iter().map(|e| e.fee).sum()
    }
}
