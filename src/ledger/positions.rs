//! Position lifecycle: open, close, pnl.

use super::core::DerivativesLedger;
use super::results::LedgerError;
use crate::events::{TradeAction, TradeEvent};
use crate::margin::{calculate_margin_requirement, check_margin, trade_fee};
use crate::position::Position;
use crate::types::{PositionId, Quote, Side, Timestamp};
use rust_decimal::Decimal;
use tracing::debug;

impl DerivativesLedger {
    /// Open a position at the current mark.
    ///
    /// Checks run in order: ticker, side, quantity, leverage margin, margin
    /// ratio floor. On success one position id and one trade id are minted,
    /// in that order, and an Open trade is appended to the log.
    pub fn open_position(
        &mut self,
        ticker: &str,
        side: i8,
        quantity: Decimal,
        margin: Quote,
        timestamp: Timestamp,
    ) -> Result<Position, LedgerError> {
        let spec = self.instrument_or_err(ticker)?;
        let side = Side::try_from(side)?;
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let mark = self.mark_of(spec)?;
        let requirement = calculate_margin_requirement(spec, quantity, mark)?;
        check_margin(&requirement, margin, self.config.min_margin_ratio)?;
        // last fallible step; nothing is minted or stored before this
        let fee = trade_fee(quantity, mark, self.config.fee_bps)?;
        let ticker = spec.ticker.clone();

        let position_id = self.ids.next_position_id();
        let position = Position::new(position_id, ticker.clone(), side, quantity, mark, margin, timestamp);
        self.positions.insert(position_id, position.clone());

        let trade_id = self.ids.next_trade_id();
        self.trades.append(TradeEvent {
            id: trade_id,
            position_id,
            ticker,
            action: TradeAction::Open,
            side,
            quantity,
            price: mark,
            fee,
            timestamp,
        });

        debug!(
            position = %position_id,
            ticker = %position.ticker,
            %side,
            %quantity,
            price = %mark,
            %margin,
            %fee,
            "position opened"
        );

        Ok(position)
    }

    /// Close a position in full at the current mark.
    ///
    /// `Ok(None)` means there was nothing to close; state is untouched.
    /// Posted margin is not released here.
    pub fn close_position(
        &mut self,
        position_id: &PositionId,
        timestamp: Timestamp,
    ) -> Result<Option<TradeEvent>, LedgerError> {
        let Some(position) = self.positions.get(position_id) else {
            return Ok(None);
        };

        let spec = self.instrument_or_err(&position.ticker)?;
        let mark = self.mark_of(spec)?;
        let fee = trade_fee(position.quantity, mark, self.config.fee_bps)?;
        let ticker = position.ticker.clone();
        let side = position.side.opposite();
        let quantity = position.quantity;

        let trade_id = self.ids.next_trade_id();
        let event = TradeEvent {
            id: trade_id,
            position_id: *position_id,
            ticker,
            action: TradeAction::Close,
            side,
            quantity,
            price: mark,
            fee,
            timestamp,
        };
        self.trades.append(event.clone());
        self.positions.remove(position_id);

        debug!(
            position = %position_id,
            ticker = %event.ticker,
            %side,
            %quantity,
            price = %mark,
            %fee,
            "position closed"
        );

        Ok(Some(event))
    }

    /// Unrealized pnl. Zero when the position does not exist.
    ///
    /// `current_mark` overrides the computed mark, including `Some(0)`.
    pub fn pnl(&self, position_id: &PositionId, current_mark: Option<Decimal>) -> Result<Quote, LedgerError> {
        let Some(position) = self.positions.get(position_id) else {
            return Ok(Quote::zero());
        };

        let mark = match current_mark {
            Some(mark) => mark,
            None => self.get_mark_price(&position.ticker)?,
        };

        position.unrealized_pnl(mark)
    }

    /// Sum of `pnl` across every open position at current marks.
    pub fn unrealized_pnl_total(&self) -> Result<Quote, LedgerError> {
        self.positions.values().try_fold(Quote::zero(), |total, p| {
            let pnl = p.unrealized_pnl(self.get_mark_price(&p.ticker)?)?;
            total
                .value()
                .checked_add(pnl.value())
                .map(Quote::new)
                .ok_or(LedgerError::ArithmeticOverflow("total pnl"))
        })
    }
}
