//! Liquidity Pool
//!
//! Exchanges the reserve asset for FLS at an operator-set rate. Reserve paid
//! in stays in the pool's custody; FLS is minted on the way in and burned on
//! the way out, so the pool must hold `MINTER` on the FLS token.
//!
//! The pool owns no ledger. Each operation borrows the two ledgers it works
//! on and checks their addresses against its configured pair.

use serde::{Deserialize, Serialize};
use tracing::debug;

use farmland_core::{
    Address, Amount, Authority, Event, LedgerError, LedgerResult, Rate, Role, SwapDirection,
};
use fls_token::{FlsToken, Fungible};

use crate::calculator::{fls_for_reserve, reserve_for_fls};
use crate::state::{PoolState, SwapQuote};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPool {
    address: Address,
    owner: Address,
    fls: Address,
    reserve: Address,
    rate: Rate,
    rate_scale: Rate,
}

impl LiquidityPool {
    /// Deploy a pool trading `reserve` for `fls` at `rate / rate_scale`
    pub fn deploy(
        address: Address,
        owner: Address,
        reserve: Address,
        fls: Address,
        rate: Rate,
        rate_scale: Rate,
        events: &mut Vec<Event>,
    ) -> LedgerResult<Self> {
        if rate == 0 || rate_scale == 0 {
            return Err(LedgerError::ZeroRate);
        }
        if address.is_zero() || owner.is_zero() || reserve.is_zero() || fls.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if reserve == fls {
            return Err(LedgerError::AssetMismatch {
                expected: reserve,
                found: fls,
            });
        }

        events.push(Event::PoolDeployed {
            pool: address,
            fls,
            reserve,
            owner,
            rate,
            rate_scale,
        });

        Ok(Self {
            address,
            owner,
            fls,
            reserve,
            rate,
            rate_scale,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn get_exchange_rate(&self) -> Rate {
        self.rate
    }

    pub fn rate_scale(&self) -> Rate {
        self.rate_scale
    }

    /// (reserve, fls) token addresses
    pub fn get_pool_pair_addresses(&self) -> (Address, Address) {
        (self.reserve, self.fls)
    }

    /// Reserve currently held by the pool
    pub fn custody(&self, reserve: &impl Fungible) -> Amount {
        reserve.balance_of(&self.address)
    }

    /// Whether the pool may mint and burn FLS
    pub fn is_authorized(&self, fls: &FlsToken) -> bool {
        fls.has_role(&Role::MINTER, &self.address)
    }

    pub fn snapshot(&self, fls: &FlsToken, reserve: &impl Fungible) -> PoolState {
        PoolState {
            address: self.address,
            owner: self.owner,
            fls: self.fls,
            reserve: self.reserve,
            rate: self.rate,
            rate_scale: self.rate_scale,
            custody: self.custody(reserve),
            authorized: self.is_authorized(fls),
        }
    }

    /// Price a swap at the current rate without executing it
    pub fn quote(&self, direction: SwapDirection, amount: Amount) -> LedgerResult<SwapQuote> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let output = match direction {
            SwapDirection::ReserveToFls => fls_for_reserve(amount, self.rate, self.rate_scale)?,
            SwapDirection::FlsToReserve => reserve_for_fls(amount, self.rate, self.rate_scale)?,
        };
        if output == 0 {
            return Err(LedgerError::ZeroOutput { input: amount });
        }
        Ok(SwapQuote {
            direction,
            input: amount,
            output,
            rate: self.rate,
            rate_scale: self.rate_scale,
        })
    }

    // Swaps

    /// Pull `amount` reserve from the caller and mint FLS in return.
    ///
    /// The caller must have approved the pool for at least `amount`.
    pub fn swap_reserve_for_fls<R: Fungible>(
        &self,
        caller: Address,
        amount: Amount,
        fls: &mut FlsToken,
        reserve: &mut R,
        events: &mut Vec<Event>,
    ) -> LedgerResult<SwapQuote> {
        self.ensure_not_self(&caller)?;
        self.check_pair(fls, &*reserve)?;
        let quote = self.quote(SwapDirection::ReserveToFls, amount)?;

        reserve.ensure_transfer_from(&self.address, &caller, &self.address, amount)?;
        fls.ensure_can_mint(&self.address, &caller, quote.output)?;

        reserve.transfer_from(self.address, caller, self.address, amount, events)?;
        fls.mint(self.address, caller, quote.output, events)?;

        debug!(
            pool = %self.address,
            account = %caller,
            reserve_in = amount,
            fls_out = quote.output,
            "Swapped reserve for FLS"
        );
        events.push(Event::SwapExecuted {
            pool: self.address,
            account: caller,
            reserve_amount: amount,
            fls_amount: quote.output,
            direction: SwapDirection::ReserveToFls,
        });
        Ok(quote)
    }

    /// Burn `amount` of the caller's FLS and pay reserve out of custody
    pub fn swap_fls_for_reserve<R: Fungible>(
        &self,
        caller: Address,
        amount: Amount,
        fls: &mut FlsToken,
        reserve: &mut R,
        events: &mut Vec<Event>,
    ) -> LedgerResult<SwapQuote> {
        self.ensure_not_self(&caller)?;
        self.check_pair(fls, &*reserve)?;
        let quote = self.quote(SwapDirection::FlsToReserve, amount)?;

        self.ensure_custody(&*reserve, quote.output)?;
        fls.ensure_can_burn(&self.address, &caller, amount)?;
        reserve.ensure_transfer(&self.address, &caller, quote.output)?;

        fls.burn(self.address, caller, amount, events)?;
        reserve.transfer(self.address, caller, quote.output, events)?;

        debug!(
            pool = %self.address,
            account = %caller,
            fls_in = amount,
            reserve_out = quote.output,
            "Swapped FLS for reserve"
        );
        events.push(Event::SwapExecuted {
            pool: self.address,
            account: caller,
            reserve_amount: quote.output,
            fls_amount: amount,
            direction: SwapDirection::FlsToReserve,
        });
        Ok(quote)
    }

    // Owner operations

    pub fn update_exchange_rate(
        &mut self,
        caller: Address,
        new_rate: Rate,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        if new_rate == 0 {
            return Err(LedgerError::ZeroRate);
        }

        let previous = self.rate;
        self.rate = new_rate;
        events.push(Event::ExchangeRateUpdated {
            pool: self.address,
            previous,
            rate: new_rate,
            operator: caller,
        });
        Ok(())
    }

    /// Move `amount` reserve from the owner into custody (allowance required)
    pub fn deposit_reserve<R: Fungible>(
        &self,
        caller: Address,
        amount: Amount,
        reserve: &mut R,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        self.check_reserve(&*reserve)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        reserve.transfer_from(self.address, caller, self.address, amount, events)?;
        events.push(Event::ReserveDeposited {
            pool: self.address,
            operator: caller,
            amount,
        });
        Ok(())
    }

    /// Pay `amount` reserve out of custody to the owner
    pub fn withdraw_reserve<R: Fungible>(
        &self,
        caller: Address,
        amount: Amount,
        reserve: &mut R,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        self.check_reserve(&*reserve)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.ensure_custody(&*reserve, amount)?;

        reserve.transfer(self.address, self.owner, amount, events)?;
        events.push(Event::ReserveWithdrawn {
            pool: self.address,
            operator: caller,
            amount,
        });
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let previous_owner = self.owner;
        self.owner = new_owner;
        events.push(Event::OwnershipTransferred {
            pool: self.address,
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    // Checks

    /// The pool never trades with itself
    fn ensure_not_self(&self, caller: &Address) -> LedgerResult<()> {
        if *caller == self.address {
            return Err(LedgerError::ContractCaller {
                account: self.address,
            });
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: &Address) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized {
                account: *caller,
                required: Authority::Owner(self.owner),
            });
        }
        Ok(())
    }

    fn ensure_custody(&self, reserve: &impl Fungible, required: Amount) -> LedgerResult<()> {
        let available = self.custody(reserve);
        if available < required {
            return Err(LedgerError::InsufficientCustody {
                pool: self.address,
                available,
                required,
            });
        }
        Ok(())
    }

    fn check_reserve(&self, reserve: &impl Fungible) -> LedgerResult<()> {
        if reserve.address() != self.reserve {
            return Err(LedgerError::AssetMismatch {
                expected: self.reserve,
                found: reserve.address(),
            });
        }
        Ok(())
    }

    fn check_pair(&self, fls: &FlsToken, reserve: &impl Fungible) -> LedgerResult<()> {
        if fls.address() != self.fls {
            return Err(LedgerError::AssetMismatch {
                expected: self.fls,
                found: fls.address(),
            });
        }
        self.check_reserve(reserve)
    }
}
