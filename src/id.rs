// 2.0: identifier minting. sha256 over "{prefix}:{counter}:{domain}".
// the counter bumps on every mint, so a replayed call sequence replays the ids.

use crate::types::{PositionId, TradeId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const DEFAULT_ID_DOMAIN: &str = "zephyr-9/ledger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdPurpose {
    Position,
    Trade,
}

impl IdPurpose {
    pub fn prefix(&self) -> &'static str {
        match self {
            IdPurpose::Position => "pos",
            IdPurpose::Trade => "trd",
        }
    }
}

pub fn derive_id(purpose: IdPurpose, counter: u64, domain: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:{}", purpose.prefix(), counter, domain).as_bytes());
    hasher.finalize().into()
}

#[derive(Debug, Clone)]
pub struct IdMinter {
    counter: u64,
    domain: String,
}

impl IdMinter {
    pub fn new(domain: impl Into<String>) -> Self {
        Self::resume(domain, 0)
    }

    // continue an existing sequence, e.g. after restoring a snapshot
    pub fn resume(domain: impl Into<String>, counter: u64) -> Self {
        Self {
            counter,
            domain: domain.into(),
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn next_position_id(&mut self) -> PositionId {
        PositionId(self.mint(IdPurpose::Position))
    }

    pub fn next_trade_id(&mut self) -> TradeId {
        TradeId(self.mint(IdPurpose::Trade))
    }

    fn mint(&mut self, purpose: IdPurpose) -> [u8; 32] {
        self.counter += 1;
        derive_id(purpose, self.counter, &self.domain)
    }
}
