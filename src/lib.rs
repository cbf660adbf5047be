// wobble-ledger: synthetic derivatives bookkeeping.
// margin-first: every open is checked against leverage and a ratio floor.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Side, Quote, Bps, Timestamp, PositionId, TradeId
//   2.x  id.rs: sha256 identifier minting
//   3.x  margin.rs: required margin, ratio floor, fees
//   4.x  position.rs: position struct, PnL
//   7.x  config.rs: catalog, constants, json loading
//   8.x  ledger/: the ledger: pricing, positions, snapshots
//   11.x events.rs: trade events and the append-only log
//   12.x instrument.rs: instrument specs + catalog
//   13.x mark_price.rs: wobble mark derivation

pub mod config;
pub mod events;
pub mod id;
pub mod instrument;
pub mod ledger;
pub mod margin;
pub mod mark_price;
pub mod position;
pub mod types;

// re exports for convenience
pub use config::*;
pub use events::*;
pub use id::*;
pub use instrument::*;
pub use ledger::*;
pub use margin::*;
pub use mark_price::*;
pub use position::*;
pub use types::*;
