//! Pool Constants
//!
//! Rate scales. The exchange rate is stored as an integer and read against
//! the pool's fixed scale: `rate / rate_scale` reserve units per FLS unit.

use farmland_core::constants::UNIT;
use farmland_core::Rate;

/// Rate is a plain integer multiplier (rate 4 = 4 reserve per FLS)
pub const UNSCALED_RATE: Rate = 1;

/// Rate expressed in millionths (rate 1_000_000 = parity)
pub const MICRO_RATE_SCALE: Rate = UNIT;
