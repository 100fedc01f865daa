//! Pool State Types
//!
//! Read-side snapshots of a pool and swap quotes.

use serde::{Deserialize, Serialize};

use farmland_core::{decimal, Address, Amount, Rate, SwapDirection};

/// Pool snapshot, including figures read from the paired ledgers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub address: Address,
    pub owner: Address,
    pub fls: Address,
    pub reserve: Address,
    #[serde(with = "decimal")]
    pub rate: Rate,
    #[serde(with = "decimal")]
    pub rate_scale: Rate,
    /// Reserve held by the pool
    #[serde(with = "decimal")]
    pub custody: Amount,
    /// Whether the pool holds `MINTER` on the FLS token
    pub authorized: bool,
}

/// Result of pricing a swap without executing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    #[serde(with = "decimal")]
    pub input: Amount,
    #[serde(with = "decimal")]
    pub output: Amount,
    #[serde(with = "decimal")]
    pub rate: Rate,
    #[serde(with = "decimal")]
    pub rate_scale: Rate,
}

impl SwapQuote {
    /// (reserve, fls) legs of the swap
    pub fn legs(&self) -> (Amount, Amount) {
        match self.direction {
            SwapDirection::ReserveToFls => (self.input, self.output),
            SwapDirection::FlsToReserve => (self.output, self.input),
        }
    }
}
