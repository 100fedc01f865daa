//! FLS token
//!
//! The accounting unit minted and burned by operators holding `MINTER`.
//! Balance-mutating paths (transfer, transfer_from, mint, burn) are blocked
//! while the token is paused.
//!
//! # Role bootstrap
//!
//! The deployer receives `DEFAULT_ADMIN` and `OWNER`. `OWNER` administers
//! itself, `MINTER` and `PAUSER`. Nobody holds `MINTER` or `PAUSER` until
//! granted.
//!
//! # Redundant pause/unpause
//!
//! Pausing a paused token (or unpausing an unpaused one) succeeds without
//! emitting an event, matching the silent no-op policy of role grants.

use serde::{Deserialize, Serialize};

use access_control::AccessControl;
use farmland_core::{Address, Amount, Event, LedgerError, LedgerResult, Role};

use crate::ledger::{Fungible, TokenLedger, TokenMetadata};

/// The FLS ledger with role-gated supply and a pause switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlsToken {
    ledger: TokenLedger,
    roles: AccessControl,
    paused: bool,
}

impl FlsToken {
    /// Deploy a new token at `address`, bootstrapping roles for `deployer`
    pub fn deploy(
        address: Address,
        deployer: Address,
        metadata: TokenMetadata,
        events: &mut Vec<Event>,
    ) -> Self {
        events.push(Event::TokenDeployed {
            token: address,
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            decimals: metadata.decimals,
        });

        let mut roles = AccessControl::new(address);
        roles.setup_role(&Role::DEFAULT_ADMIN, deployer, deployer, events);
        roles.setup_role(&Role::OWNER, deployer, deployer, events);
        roles.set_role_admin(&Role::OWNER, Role::OWNER, events);
        roles.set_role_admin(&Role::MINTER, Role::OWNER, events);
        roles.set_role_admin(&Role::PAUSER, Role::OWNER, events);

        Self {
            ledger: TokenLedger::new(address, metadata),
            roles,
            paused: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.ledger.metadata().name
    }

    pub fn symbol(&self) -> &str {
        &self.ledger.metadata().symbol
    }

    pub fn decimals(&self) -> u8 {
        self.ledger.metadata().decimals
    }

    pub fn metadata(&self) -> &TokenMetadata {
        self.ledger.metadata()
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    // Access control

    pub fn has_role(&self, role: &Role, account: &Address) -> bool {
        self.roles.has_role(role, account)
    }

    pub fn get_role_admin(&self, role: &Role) -> Role {
        self.roles.get_role_admin(role)
    }

    pub fn grant_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        self.roles.grant_role(caller, role, account, events)
    }

    pub fn revoke_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        self.roles.revoke_role(caller, role, account, events)
    }

    pub fn renounce_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        self.roles.renounce_role(caller, role, account, events)
    }

    // Supply

    fn ensure_not_paused(&self) -> LedgerResult<()> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    /// Every check `mint` performs, without mutating
    pub fn ensure_can_mint(&self, operator: &Address, to: &Address, amount: Amount) -> LedgerResult<()> {
        self.roles.check_role(&Role::MINTER, operator)?;
        self.ensure_not_paused()?;
        self.ledger.ensure_mint(to, amount)
    }

    /// Every check `burn` performs, without mutating
    pub fn ensure_can_burn(&self, operator: &Address, from: &Address, amount: Amount) -> LedgerResult<()> {
        self.roles.check_role(&Role::MINTER, operator)?;
        self.ensure_not_paused()?;
        self.ledger.ensure_burn(from, amount)
    }

    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_can_mint(&caller, &to, amount)?;
        self.ledger.mint(caller, to, amount, events)
    }

    /// Burn from any holder. An operator power: no allowance is consulted.
    pub fn burn(
        &mut self,
        caller: Address,
        from: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_can_burn(&caller, &from, amount)?;
        self.ledger.burn(caller, from, amount, events)
    }

    // Pause

    pub fn pause(&mut self, caller: Address, events: &mut Vec<Event>) -> LedgerResult<()> {
        self.roles.check_role(&Role::PAUSER, &caller)?;
        if !self.paused {
            self.paused = true;
            events.push(Event::Paused {
                token: self.ledger.address(),
                account: caller,
            });
        }
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address, events: &mut Vec<Event>) -> LedgerResult<()> {
        self.roles.check_role(&Role::PAUSER, &caller)?;
        if self.paused {
            self.paused = false;
            events.push(Event::Unpaused {
                token: self.ledger.address(),
                account: caller,
            });
        }
        Ok(())
    }

    // Allowances

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

impl Fungible for FlsToken {
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
        self.ensure_not_paused()?;
        self.ledger.ensure_transfer(from, to, amount)
    }

    fn ensure_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ledger.ensure_transfer_from(spender, from, to, amount)
    }

    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
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
        self.ensure_not_paused()?;
        self.ledger.transfer_from(caller, from, to, amount, events)
    }
}
