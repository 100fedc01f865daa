//! Reserve asset ledger
//!
//! Stands in for the external reserve asset ("USDC") so the pool can run
//! in-process. Standard transfer/approve semantics plus an issuer-only
//! faucet mint for funding accounts.

use serde::{Deserialize, Serialize};

use farmland_core::{Address, Amount, Authority, Event, LedgerError, LedgerResult};

use crate::ledger::{Fungible, TokenLedger, TokenMetadata};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveToken {
    ledger: TokenLedger,
    issuer: Address,
}

impl ReserveToken {
    pub fn deploy(
        address: Address,
        issuer: Address,
        metadata: TokenMetadata,
        events: &mut Vec<Event>,
    ) -> Self {
        events.push(Event::TokenDeployed {
            token: address,
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            decimals: metadata.decimals,
        });

        Self {
            ledger: TokenLedger::new(address, metadata),
            issuer,
        }
    }

    pub fn issuer(&self) -> Address {
        self.issuer
    }

    pub fn metadata(&self) -> &TokenMetadata {
        self.ledger.metadata()
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Faucet: issue new reserve units. Issuer only.
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        if caller != self.issuer {
            return Err(LedgerError::Unauthorized {
                account: caller,
                required: Authority::Owner(self.issuer),
            });
        }
        self.ledger.mint(caller, to, amount, events)
    }

    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ledger.approve(caller, spender, amount, events)
    }
}

impl Fungible for ReserveToken {
    fn address(&self) -> Address {
        self.ledger.address()
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    fn ensure_transfer(&self, from: &Address, to: &Address, amount: Amount) -> LedgerResult<()> {
        self.ledger.ensure_transfer(from, to, amount)
    }

    fn ensure_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.ledger.ensure_transfer_from(spender, from, to, amount)
    }

    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ledger.transfer(caller, to, amount, events)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ledger.transfer_from(caller, from, to, amount, events)
    }
}
