// 8.0: the derivatives ledger. owns the catalog, open positions, trade log,
// id counter and the reference index. synchronous, single owner, no I/O.

mod core;
mod positions;
mod pricing;
mod results;
mod snapshot;

pub use core::DerivativesLedger;
pub use results::LedgerError;
pub use snapshot::LedgerSnapshot;
