//! Liquidity Pool Protocol Implementation
//!
//! This crate implements the fixed-rate pool that exchanges the reserve
//! asset for FLS. Swaps into FLS mint, swaps out burn, and the reserve side
//! is held in the pool's custody.

pub mod calculator;
pub mod constants;
pub mod pool;
pub mod state;

// Re-exports
pub use calculator::{fls_for_reserve, reserve_for_fls, round_trip};
pub use constants::{MICRO_RATE_SCALE, UNSCALED_RATE};
pub use pool::LiquidityPool;
pub use state::{PoolState, SwapQuote};
