//! Synthetic derivatives ledger simulation.
//!
//! Walks the ledger through a trading session: catalog listing, opens that
//! pass and fail margin checks, index moves, PnL and closes.

use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use wobble_ledger::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Synthetic Derivatives Ledger Simulation");
    println!("Single Reference Index, Isolated Positions\n");

    scenario_1_catalog();
    scenario_2_margin_checks();
    scenario_3_position_lifecycle();
    scenario_4_snapshot();

    println!("\nAll simulations completed successfully.");
}

/// Catalog and marks at the baseline index.
fn scenario_1_catalog() {
    println!("Scenario 1: Instrument Catalog\n");

    let ledger = DerivativesLedger::default();
    println!("  Reference index: {}", ledger.reference_index());

    for spec in ledger.list_instruments() {
        match ledger.get_mark_price(&spec.ticker) {
            Ok(mark) => println!(
                "  {:<9} {:<16} {:>3}x  decay {:<5} mark {}",
                spec.ticker, spec.kind, spec.max_leverage, spec.decay_coefficient, mark
            ),
            Err(e) => println!("  {}: {}", spec.ticker, e),
        }
    }
    println!();
}

/// Opens rejected for each reason, then one that passes.
fn scenario_2_margin_checks() {
    println!("Scenario 2: Margin Checks\n");

    let mut ledger = DerivativesLedger::default();
    let now = Timestamp::now();

    let attempts = [
        ("XX-0", 1, dec!(1), dec!(1000)),
        ("ZW9-M3", 0, dec!(1), dec!(1000)),
        ("ZW9-M3", 1, dec!(10), dec!(100)),
        ("ZW9-M3", 1, dec!(10), dec!(5000)),
        ("ZW9-M3", 1, dec!(10), dec!(10000)),
    ];

    for (ticker, side, quantity, margin) in attempts {
        match ledger.open_position(ticker, side, quantity, Quote::new(margin), now) {
            Ok(pos) => println!("  {} {} x{} margin {}: opened @ {}", ticker, side, quantity, margin, pos.entry_price),
            Err(e) => println!("  {} {} x{} margin {}: {}", ticker, side, quantity, margin, e),
        }
    }
    println!();
}

/// Open, move the index, check PnL, close.
fn scenario_3_position_lifecycle() {
    println!("Scenario 3: Position Lifecycle\n");

    let mut ledger = DerivativesLedger::default();

    let long = match ledger.open_position("ZW9-M3", 1, dec!(10), Quote::new(dec!(10000)), Timestamp::from_millis(1000)) {
        Ok(pos) => pos,
        Err(e) => {
            println!("  open failed: {}", e);
            return;
        }
    };
    println!("  Opened long {} x{} @ {}", long.ticker, long.quantity, long.entry_price);

    for index in [dec!(1900), dec!(1800), dec!(2050)] {
        ledger.update_reference_index(index);
        let pnl = ledger.pnl(&long.id, None).unwrap_or_else(|_| Quote::zero());
        println!("  Index {} -> PnL {}", index, pnl);
    }

    match ledger.close_position(&long.id, Timestamp::from_millis(2000)) {
        Ok(Some(trade)) => println!("  Closed: {} {} @ {} fee {}", trade.side, trade.quantity, trade.price, trade.fee),
        Ok(None) => println!("  Nothing to close"),
        Err(e) => println!("  close failed: {}", e),
    }

    if let Ok(None) = ledger.close_position(&long.id, Timestamp::from_millis(2001)) {
        println!("  Second close: nothing to close");
    }

    println!(
        "  Trades logged: {}, total fees: {}\n",
        ledger.trade_log().len(),
        ledger.trade_log().total_fees()
    );
}

/// Snapshot a ledger and restore it into a fresh one.
fn scenario_4_snapshot() {
    println!("Scenario 4: Snapshot and Restore\n");

    let mut ledger = DerivativesLedger::default();
    ledger.update_reference_index(dec!(500));
    for (i, side) in [1i8, -1, 1].into_iter().enumerate() {
        let _ = ledger.open_position("GLX-SWAP", side, dec!(2), Quote::new(dec!(1000)), Timestamp::from_millis(i as i64));
    }

    let snapshot = ledger.snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("  Snapshot: {} positions, {} trades, {} bytes", snapshot.positions.len(), snapshot.trades.len(), json.len()),
        Err(e) => println!("  serialize failed: {}", e),
    }

    let mut restored = DerivativesLedger::default();
    match restored.restore(snapshot) {
        Ok(()) => println!("  Restored ledger holds {} positions, id counter {}", restored.open_position_count(), restored.id_counter()),
        Err(e) => println!("  restore failed: {}", e),
    }
}
