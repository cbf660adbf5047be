// 8.0.2: ledger errors. "nothing to close" is not here, that is Ok(None).

use crate::types::Quote;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Unknown instrument {0}")]
    UnknownInstrument(String),

    #[error("Invalid side {0}, expected +1 or -1")]
    InvalidSide(i8),

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    #[error("Insufficient margin: posted {posted}, required {required}")]
    InsufficientMargin { posted: Quote, required: Quote },

    #[error("Margin ratio too low: posted {posted} against notional {notional} (min ratio {min_ratio})")]
    MarginRatioTooLow {
        posted: Quote,
        notional: Quote,
        min_ratio: Decimal,
    },

    #[error("Arithmetic overflow computing {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
