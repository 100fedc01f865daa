//! Ledger summary
//!
//! The observable ledger state in one comparable value. Built either from
//! live contract state or by replaying the event log; both must agree.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use farmland_core::{Address, Amount, Rate, Role};
use fls_token::TokenLedger;

use crate::state::State;

/// Supply and non-zero balances of one token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub address: Address,
    pub total_supply: Amount,
    pub balances: BTreeMap<Address, Amount>,
}

impl TokenSummary {
    fn from_ledger(ledger: &TokenLedger) -> Self {
        use fls_token::Fungible;

        Self {
            address: ledger.address(),
            total_supply: ledger.total_supply(),
            balances: ledger
                .balances()
                .filter(|(_, amount)| **amount > 0)
                .map(|(account, amount)| (*account, *amount))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub fls: TokenSummary,
    pub reserve: TokenSummary,
    pub paused: bool,
    pub pool: Address,
    pub pool_owner: Address,
    pub rate: Rate,
    pub rate_scale: Rate,
    /// FLS role memberships, empty roles omitted
    pub roles: BTreeMap<Role, BTreeSet<Address>>,
}

impl LedgerSummary {
    pub fn from_state(state: &State) -> Self {
        Self {
            fls: TokenSummary::from_ledger(state.fls.ledger()),
            reserve: TokenSummary::from_ledger(state.reserve.ledger()),
            paused: state.fls.paused(),
            pool: state.pool.address(),
            pool_owner: state.pool.owner(),
            rate: state.pool.get_exchange_rate(),
            rate_scale: state.pool.rate_scale(),
            roles: state
                .fls
                .roles()
                .role_members()
                .map(|(role, members)| (role.clone(), members.clone()))
                .collect(),
        }
    }
}
