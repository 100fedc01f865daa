//! Transaction payloads
//!
//! One variant per state-transition operation, grouped by target contract.
//! The caller is not part of the payload; the runtime supplies it.

use serde::{Deserialize, Serialize};

use farmland_core::{decimal, Address, Amount, Rate, Role};

/// Operation submitted to the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contract", content = "call", rename_all = "snake_case")]
pub enum Call {
    Fls(FlsCall),
    Reserve(ReserveCall),
    Pool(PoolCall),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FlsCall {
    GrantRole {
        role: Role,
        account: Address,
    },
    RevokeRole {
        role: Role,
        account: Address,
    },
    RenounceRole {
        role: Role,
        account: Address,
    },
    Mint {
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    Burn {
        from: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    Pause,
    Unpause,
    Transfer {
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    Approve {
        spender: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ReserveCall {
    /// Issuer-only faucet
    Mint {
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    Transfer {
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
    Approve {
        spender: Address,
        #[serde(with = "decimal")]
        amount: Amount,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PoolCall {
    SwapReserveForFls {
        #[serde(with = "decimal")]
        amount: Amount,
    },
    SwapFlsForReserve {
        #[serde(with = "decimal")]
        amount: Amount,
    },
    UpdateExchangeRate {
        #[serde(with = "decimal")]
        rate: Rate,
    },
    DepositReserve {
        #[serde(with = "decimal")]
        amount: Amount,
    },
    WithdrawReserve {
        #[serde(with = "decimal")]
        amount: Amount,
    },
    TransferOwnership {
        new_owner: Address,
    },
}

impl Call {
    /// Short name for logs, e.g. `pool.swap_reserve_for_fls`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fls(call) => match call {
                FlsCall::GrantRole { .. } => "fls.grant_role",
                FlsCall::RevokeRole { .. } => "fls.revoke_role",
                FlsCall::RenounceRole { .. } => "fls.renounce_role",
                FlsCall::Mint { .. } => "fls.mint",
                FlsCall::Burn { .. } => "fls.burn",
                FlsCall::Pause => "fls.pause",
                FlsCall::Unpause => "fls.unpause",
                FlsCall::Transfer { .. } => "fls.transfer",
                FlsCall::TransferFrom { .. } => "fls.transfer_from",
                FlsCall::Approve { .. } => "fls.approve",
            },
            Self::Reserve(call) => match call {
                ReserveCall::Mint { .. } => "reserve.mint",
                ReserveCall::Transfer { .. } => "reserve.transfer",
                ReserveCall::TransferFrom { .. } => "reserve.transfer_from",
                ReserveCall::Approve { .. } => "reserve.approve",
            },
            Self::Pool(call) => match call {
                PoolCall::SwapReserveForFls { .. } => "pool.swap_reserve_for_fls",
                PoolCall::SwapFlsForReserve { .. } => "pool.swap_fls_for_reserve",
                PoolCall::UpdateExchangeRate { .. } => "pool.update_exchange_rate",
                PoolCall::DepositReserve { .. } => "pool.deposit_reserve",
                PoolCall::WithdrawReserve { .. } => "pool.withdraw_reserve",
                PoolCall::TransferOwnership { .. } => "pool.transfer_ownership",
            },
        }
    }
}
