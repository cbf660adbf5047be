// 13.0: mark price derivation. one formula, no time, no volatility, no feed:
//   mark = index + index * wobble_multiplier * decay_coefficient
// a negative multiplier pulls the mark below the index as decay grows.
// the index is unvalidated, so every step is checked.

use crate::instrument::InstrumentSpec;
use crate::ledger::LedgerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_WOBBLE_MULTIPLIER: Decimal = dec!(-0.47);

pub fn wobble_mark(
    index: Decimal,
    wobble_multiplier: Decimal,
    decay_coefficient: Decimal,
) -> Result<Decimal, LedgerError> {
    index
        .checked_mul(wobble_multiplier)
        .and_then(|shift| shift.checked_mul(decay_coefficient))
        .and_then(|shift| index.checked_add(shift))
        .ok_or(LedgerError::ArithmeticOverflow("mark price"))
}

pub fn mark_for(spec: &InstrumentSpec, index: Decimal, wobble_multiplier: Decimal) -> Result<Decimal, LedgerError> {
    wobble_mark(index, wobble_multiplier, spec.decay_coefficient)
}
