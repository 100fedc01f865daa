//! Farmland-api: HTTP API layer for the Farmland ledger
//!
//! Exposes contract reads, swap quotes, transaction submission and the
//! event log over JSON.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, StateError};
