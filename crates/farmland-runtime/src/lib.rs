//! Farmland runtime
//!
//! Hosts the FLS token, the reserve token and the liquidity pool behind a
//! single transaction entry point, [`Chain::submit`], and keeps the event
//! log external observers read from.
//!
//! # Transactions
//!
//! A [`Call`] is applied to a copy of the contract [`State`]. On success the
//! copy replaces the live state, the height advances and the emitted events
//! are appended to the [`EventLog`]. On failure nothing changes.

pub mod call;
pub mod chain;
pub mod event_log;
pub mod receipt;
pub mod state;
pub mod summary;

pub use call::{Call, FlsCall, PoolCall, ReserveCall};
pub use chain::{contract_address, Chain};
pub use event_log::{swap_legs, EventFilter, EventLog, EventRecord};
pub use receipt::Receipt;
pub use state::State;
pub use summary::{LedgerSummary, TokenSummary};
