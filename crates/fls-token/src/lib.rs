//! FLS Token Implementation
//!
//! This crate implements the two fungible ledgers the pool trades between.
//!
//! # Ledgers
//!
//! - [`FlsToken`]: the FLS accounting unit. Role-gated mint/burn, pausable.
//! - [`ReserveToken`]: the reserve asset ("USDC"). Plain ledger with an
//!   issuer-only faucet.
//!
//! Both are built on [`TokenLedger`], the standard balance/allowance
//! capability, and both implement [`Fungible`] so the pool can treat the
//! reserve asset as a ledger it does not own.
//!
//! # Atomicity
//!
//! Every mutating method validates completely before touching state. The
//! `ensure_*` methods expose that validation on its own so composite
//! operations can check all legs before applying any.

pub mod fls;
pub mod ledger;
pub mod reserve;

pub use fls::FlsToken;
pub use ledger::{Fungible, TokenLedger, TokenMetadata};
pub use reserve::ReserveToken;
