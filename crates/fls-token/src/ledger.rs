//! Standard fungible ledger
//!
//! Balances, allowances and total supply with approve/transferFrom
//! semantics. Minting and burning here are unchecked primitives; the token
//! types wrap them with their own authorization.
//!
//! # Invariant
//!
//! `sum(balances) == total_supply` after every successful call. Since the
//! sum is bounded by the supply, crediting a balance cannot overflow once
//! the supply check has passed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use farmland_core::constants::DECIMALS;
use farmland_core::{Address, Amount, Event, LedgerError, LedgerResult};

/// Allowance value treated as unlimited (never decremented)
pub const UNLIMITED_ALLOWANCE: Amount = Amount::MAX;

/// Immutable token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: DECIMALS,
        }
    }
}

/// Read/transfer surface shared by every ledger the pool touches
pub trait Fungible {
    fn address(&self) -> Address;

    fn balance_of(&self, account: &Address) -> Amount;

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    fn total_supply(&self) -> Amount;

    /// Validate `transfer` from `from` without mutating
    fn ensure_transfer(&self, from: &Address, to: &Address, amount: Amount) -> LedgerResult<()>;

    /// Validate `transfer_from` by `spender` without mutating
    fn ensure_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()>;

    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()>;

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()>;
}

/// Balance and allowance book for one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    address: Address,
    metadata: TokenMetadata,
    balances: BTreeMap<Address, Amount>,
    /// owner -> spender -> remaining allowance
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
    total_supply: Amount,
}

impl TokenLedger {
    pub fn new(address: Address, metadata: TokenMetadata) -> Self {
        Self {
            address,
            metadata,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            total_supply: 0,
        }
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Every account that has ever held a balance (including zero balances)
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    pub fn ensure_mint(&self, to: &Address, amount: Amount) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    pub fn ensure_burn(&self, from: &Address, amount: Amount) -> LedgerResult<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *from,
                available,
                required: amount,
            });
        }
        Ok(())
    }

    /// Create `amount` new units for `to`
    pub fn mint(
        &mut self,
        operator: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_mint(&to, amount)?;

        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.credit(to, amount)?;

        events.push(Event::Minted {
            token: self.address,
            to,
            amount,
            operator,
        });
        Ok(())
    }

    /// Destroy `amount` units held by `from`
    pub fn burn(
        &mut self,
        operator: Address,
        from: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_burn(&from, amount)?;

        self.debit(from, amount)?;
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        events.push(Event::Burned {
            token: self.address,
            from,
            amount,
            operator,
        });
        Ok(())
    }

    /// Set the allowance `spender` may draw from `owner`
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);

        events.push(Event::Approval {
            token: self.address,
            owner,
            spender,
            amount,
        });
        Ok(())
    }

    fn credit(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn debit(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        let available = self.balance_of(&account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account,
                available,
                required: amount,
            })?;
        self.balances.insert(account, remaining);
        Ok(())
    }

    fn spend_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if let Some(allowance) = self
            .allowances
            .get_mut(&owner)
            .and_then(|spenders| spenders.get_mut(&spender))
        {
            if *allowance != UNLIMITED_ALLOWANCE {
                *allowance = allowance.saturating_sub(amount);
            }
        }
    }

    fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)?;

        events.push(Event::Transfer {
            token: self.address,
            from,
            to,
            amount,
        });
        Ok(())
    }
}

impl Fungible for TokenLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn ensure_transfer(&self, from: &Address, to: &Address, amount: Amount) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *from,
                available,
                required: amount,
            });
        }
        Ok(())
    }

    fn ensure_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        let available = self.allowance(from, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                available,
                required: amount,
            });
        }
        self.ensure_transfer(from, to, amount)
    }

    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_transfer(&caller, &to, amount)?;
        self.move_balance(caller, to, amount, events)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_transfer_from(&caller, &from, &to, amount)?;
        self.spend_allowance(from, caller, amount);
        self.move_balance(from, to, amount, events)
    }
}
