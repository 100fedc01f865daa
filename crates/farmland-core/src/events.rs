//! Ledger events
//!
//! Every committed state transition emits zero or more [`Event`]s. Together
//! they form the audit log external observers replay into ledger state, so
//! each event carries the emitting contract, the actor and the amounts.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, Rate, Role};

/// Direction of a pool swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Caller pays reserve asset, receives freshly minted FLS
    ReserveToFls,
    /// Caller's FLS is burned, caller receives reserve asset from custody
    FlsToReserve,
}

/// Event emitted by a contract during a state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    TokenDeployed {
        token: Address,
        name: String,
        symbol: String,
        decimals: u8,
    },
    PoolDeployed {
        pool: Address,
        fls: Address,
        reserve: Address,
        owner: Address,
        #[serde(with = "crate::types::decimal")]
        rate: Rate,
        #[serde(with = "crate::types::decimal")]
        rate_scale: Rate,
    },
    RoleAdminChanged {
        contract: Address,
        role: Role,
        previous_admin: Role,
        new_admin: Role,
    },
    RoleGranted {
        contract: Address,
        role: Role,
        account: Address,
        sender: Address,
    },
    RoleRevoked {
        contract: Address,
        role: Role,
        account: Address,
        sender: Address,
    },
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
    },
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
    },
    Minted {
        token: Address,
        to: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
        operator: Address,
    },
    Burned {
        token: Address,
        from: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
        operator: Address,
    },
    Paused {
        token: Address,
        account: Address,
    },
    Unpaused {
        token: Address,
        account: Address,
    },
    ExchangeRateUpdated {
        pool: Address,
        #[serde(with = "crate::types::decimal")]
        previous: Rate,
        #[serde(with = "crate::types::decimal")]
        rate: Rate,
        operator: Address,
    },
    SwapExecuted {
        pool: Address,
        account: Address,
        #[serde(with = "crate::types::decimal")]
        reserve_amount: Amount,
        #[serde(with = "crate::types::decimal")]
        fls_amount: Amount,
        direction: SwapDirection,
    },
    ReserveDeposited {
        pool: Address,
        operator: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
    },
    ReserveWithdrawn {
        pool: Address,
        operator: Address,
        #[serde(with = "crate::types::decimal")]
        amount: Amount,
    },
    OwnershipTransferred {
        pool: Address,
        previous_owner: Address,
        new_owner: Address,
    },
}

/// Discriminant of [`Event`], used for log filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TokenDeployed,
    PoolDeployed,
    RoleAdminChanged,
    RoleGranted,
    RoleRevoked,
    Transfer,
    Approval,
    Minted,
    Burned,
    Paused,
    Unpaused,
    ExchangeRateUpdated,
    SwapExecuted,
    ReserveDeposited,
    ReserveWithdrawn,
    OwnershipTransferred,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TokenDeployed { .. } => EventKind::TokenDeployed,
            Self::PoolDeployed { .. } => EventKind::PoolDeployed,
            Self::RoleAdminChanged { .. } => EventKind::RoleAdminChanged,
            Self::RoleGranted { .. } => EventKind::RoleGranted,
            Self::RoleRevoked { .. } => EventKind::RoleRevoked,
            Self::Transfer { .. } => EventKind::Transfer,
            Self::Approval { .. } => EventKind::Approval,
            Self::Minted { .. } => EventKind::Minted,
            Self::Burned { .. } => EventKind::Burned,
            Self::Paused { .. } => EventKind::Paused,
            Self::Unpaused { .. } => EventKind::Unpaused,
            Self::ExchangeRateUpdated { .. } => EventKind::ExchangeRateUpdated,
            Self::SwapExecuted { .. } => EventKind::SwapExecuted,
            Self::ReserveDeposited { .. } => EventKind::ReserveDeposited,
            Self::ReserveWithdrawn { .. } => EventKind::ReserveWithdrawn,
            Self::OwnershipTransferred { .. } => EventKind::OwnershipTransferred,
        }
    }

    /// Address of the contract that emitted the event
    pub fn emitter(&self) -> Address {
        match self {
            Self::TokenDeployed { token, .. }
            | Self::Transfer { token, .. }
            | Self::Approval { token, .. }
            | Self::Minted { token, .. }
            | Self::Burned { token, .. }
            | Self::Paused { token, .. }
            | Self::Unpaused { token, .. } => *token,
            Self::RoleAdminChanged { contract, .. }
            | Self::RoleGranted { contract, .. }
            | Self::RoleRevoked { contract, .. } => *contract,
            Self::PoolDeployed { pool, .. }
            | Self::ExchangeRateUpdated { pool, .. }
            | Self::SwapExecuted { pool, .. }
            | Self::ReserveDeposited { pool, .. }
            | Self::ReserveWithdrawn { pool, .. }
            | Self::OwnershipTransferred { pool, .. } => *pool,
        }
    }

    /// Whether `account` appears as a party (actor, sender, recipient or owner)
    pub fn involves(&self, account: &Address) -> bool {
        match self {
            Self::TokenDeployed { .. } | Self::RoleAdminChanged { .. } => false,
            Self::PoolDeployed { owner, .. } => owner == account,
            Self::RoleGranted {
                account: member,
                sender,
                ..
            }
            | Self::RoleRevoked {
                account: member,
                sender,
                ..
            } => member == account || sender == account,
            Self::Transfer { from, to, .. } => from == account || to == account,
            Self::Approval { owner, spender, .. } => owner == account || spender == account,
            Self::Minted { to, operator, .. } => to == account || operator == account,
            Self::Burned { from, operator, .. } => from == account || operator == account,
            Self::Paused {
                account: actor, ..
            }
            | Self::Unpaused {
                account: actor, ..
            } => actor == account,
            Self::ExchangeRateUpdated { operator, .. }
            | Self::ReserveDeposited { operator, .. }
            | Self::ReserveWithdrawn { operator, .. } => operator == account,
            Self::SwapExecuted {
                account: trader, ..
            } => trader == account,
            Self::OwnershipTransferred {
                previous_owner,
                new_owner,
                ..
            } => previous_owner == account || new_owner == account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_tag() {
        let event = Event::SwapExecuted {
            pool: Address::from_low_u64(3),
            account: Address::from_low_u64(4),
            reserve_amount: 300,
            fls_amount: 300,
            direction: SwapDirection::ReserveToFls,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "swap_executed");
        assert_eq!(json["direction"], "reserve_to_fls");
        assert_eq!(event.kind(), EventKind::SwapExecuted);
        assert_eq!(event.emitter(), Address::from_low_u64(3));
    }

    #[test]
    fn test_large_amounts_round_trip_as_strings() {
        let event = Event::Approval {
            token: Address::from_low_u64(10),
            owner: Address::from_low_u64(1),
            spender: Address::from_low_u64(2),
            amount: Amount::MAX,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(&format!("\"amount\":\"{}\"", Amount::MAX)));
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_involves() {
        let alice = Address::from_low_u64(1);
        let bob = Address::from_low_u64(2);
        let carol = Address::from_low_u64(3);
        let event = Event::Transfer {
            token: Address::from_low_u64(10),
            from: alice,
            to: bob,
            amount: 5,
        };
        assert!(event.involves(&alice));
        assert!(event.involves(&bob));
        assert!(!event.involves(&carol));
    }
}
