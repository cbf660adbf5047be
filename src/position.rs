// 4.0: open position tracking. pnl = sign * quantity * (mark - entry).
// positions are all-or-nothing: opened once, closed in full, never resized.

use crate::ledger::LedgerError;
use crate::types::{PositionId, Quote, Side, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub ticker: String,
    pub side: Side,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    pub margin: Quote,
    pub opened_at: Timestamp,
}

impl Position {
    pub fn new(
        id: PositionId,
        ticker: impl Into<String>,
        side: Side,
        quantity: Decimal,
        entry_price: Decimal,
        margin: Quote,
        opened_at: Timestamp,
    ) -> Self {
        Self {
            id,
            ticker: ticker.into(),
            side,
            quantity,
            entry_price,
            margin,
            opened_at,
        }
    }

    // 4.1: paper gains/losses against a mark
    pub fn unrealized_pnl(&self, mark: Decimal) -> Result<Quote, LedgerError> {
        calculate_unrealized_pnl(self.side, self.quantity, self.entry_price, mark)
    }
}

// 4.2: the pnl formula. marks are caller supplied, so every step is checked
pub fn calculate_unrealized_pnl(
    side: Side,
    quantity: Decimal,
    entry_price: Decimal,
    mark: Decimal,
) -> Result<Quote, LedgerError> {
    mark.checked_sub(entry_price)
        .and_then(|delta| quantity.checked_mul(delta))
        .and_then(|pnl| pnl.checked_mul(side.sign()))
        .map(Quote::new)
        .ok_or(LedgerError::ArithmeticOverflow("pnl"))
}
