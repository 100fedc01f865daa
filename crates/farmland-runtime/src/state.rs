//! Contract state and call dispatch

use serde::{Deserialize, Serialize};

use farmland_core::{Address, Event, LedgerResult};
use fls_token::{FlsToken, Fungible, ReserveToken};
use liquidity_pool::{LiquidityPool, SwapQuote};

use crate::call::{Call, FlsCall, PoolCall, ReserveCall};

/// Every contract the runtime hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub fls: FlsToken,
    pub reserve: ReserveToken,
    pub pool: LiquidityPool,
}

impl State {
    /// Route `call` to its contract. Swaps return the executed quote.
    pub fn apply(
        &mut self,
        caller: Address,
        call: &Call,
        events: &mut Vec<Event>,
    ) -> LedgerResult<Option<SwapQuote>> {
        match call {
            Call::Fls(call) => self.apply_fls(caller, call, events).map(|_| None),
            Call::Reserve(call) => self.apply_reserve(caller, call, events).map(|_| None),
            Call::Pool(call) => self.apply_pool(caller, call, events),
        }
    }

    fn apply_fls(&mut self, caller: Address, call: &FlsCall, events: &mut Vec<Event>) -> LedgerResult<()> {
        let fls = &mut self.fls;
        match call {
            FlsCall::GrantRole { role, account } => {
                fls.grant_role(caller, role, *account, events).map(|_| ())
            }
            FlsCall::RevokeRole { role, account } => {
                fls.revoke_role(caller, role, *account, events).map(|_| ())
            }
            FlsCall::RenounceRole { role, account } => {
                fls.renounce_role(caller, role, *account, events).map(|_| ())
            }
            FlsCall::Mint { to, amount } => fls.mint(caller, *to, *amount, events),
            FlsCall::Burn { from, amount } => fls.burn(caller, *from, *amount, events),
            FlsCall::Pause => fls.pause(caller, events),
            FlsCall::Unpause => fls.unpause(caller, events),
            FlsCall::Transfer { to, amount } => fls.transfer(caller, *to, *amount, events),
            FlsCall::TransferFrom { from, to, amount } => {
                fls.transfer_from(caller, *from, *to, *amount, events)
            }
            FlsCall::Approve { spender, amount } => fls.approve(caller, *spender, *amount, events),
        }
    }

    fn apply_reserve(
        &mut self,
        caller: Address,
        call: &ReserveCall,
        events: &mut Vec<Event>,
    ) -> LedgerResult<()> {
        let reserve = &mut self.reserve;
        match call {
            ReserveCall::Mint { to, amount } => reserve.mint(caller, *to, *amount, events),
            ReserveCall::Transfer { to, amount } => reserve.transfer(caller, *to, *amount, events),
            ReserveCall::TransferFrom { from, to, amount } => {
                reserve.transfer_from(caller, *from, *to, *amount, events)
            }
            ReserveCall::Approve { spender, amount } => {
                reserve.approve(caller, *spender, *amount, events)
            }
        }
    }

    fn apply_pool(
        &mut self,
        caller: Address,
        call: &PoolCall,
        events: &mut Vec<Event>,
    ) -> LedgerResult<Option<SwapQuote>> {
        let Self { fls, reserve, pool } = self;
        match call {
            PoolCall::SwapReserveForFls { amount } => pool
                .swap_reserve_for_fls(caller, *amount, fls, reserve, events)
                .map(Some),
            PoolCall::SwapFlsForReserve { amount } => pool
                .swap_fls_for_reserve(caller, *amount, fls, reserve, events)
                .map(Some),
            PoolCall::UpdateExchangeRate { rate } => {
                pool.update_exchange_rate(caller, *rate, events).map(|_| None)
            }
            PoolCall::DepositReserve { amount } => pool
                .deposit_reserve(caller, *amount, reserve, events)
                .map(|_| None),
            PoolCall::WithdrawReserve { amount } => pool
                .withdraw_reserve(caller, *amount, reserve, events)
                .map(|_| None),
            PoolCall::TransferOwnership { new_owner } => pool
                .transfer_ownership(caller, *new_owner, events)
                .map(|_| None),
        }
    }
}
