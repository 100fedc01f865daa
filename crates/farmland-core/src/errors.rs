//! Error types for the Farmland ledger

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{Address, Amount, Role};

/// Core errors that can occur outside a single state transition
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an unauthorized caller was missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Authority {
    /// Membership in a role
    Role(Role),
    /// Being the pool owner
    Owner(Address),
    /// Being this exact account (self-service operations)
    Account(Address),
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => write!(f, "role {}", role),
            Self::Owner(owner) => write!(f, "ownership (owner is {})", owner),
            Self::Account(account) => write!(f, "to be {}", account),
        }
    }
}

/// Errors that abort a state transition. No variant leaves partial effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Unauthorized: {account} requires {required}")]
    Unauthorized {
        account: Address,
        required: Authority,
    },

    #[error("Contract {account} cannot originate a transaction")]
    ContractCaller { account: Address },

    #[error("Token is paused")]
    Paused,

    #[error("Insufficient balance for {account}: need {required}, have {available}")]
    InsufficientBalance {
        account: Address,
        available: Amount,
        required: Amount,
    },

    #[error("Insufficient allowance from {owner} to {spender}: need {required}, have {available}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        available: Amount,
        required: Amount,
    },

    #[error("Insufficient custody in pool {pool}: need {required}, have {available}")]
    InsufficientCustody {
        pool: Address,
        available: Amount,
        required: Amount,
    },

    #[error("Amount must be non-zero")]
    ZeroAmount,

    #[error("Exchange rate must be non-zero")]
    ZeroRate,

    #[error("Swapping {input} rounds down to zero output")]
    ZeroOutput { input: Amount },

    #[error("The zero address is not a valid target")]
    ZeroAddress,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Asset mismatch: expected {expected}, found {found}")]
    AssetMismatch { expected: Address, found: Address },
}

impl LedgerError {
    /// Shorthand for a missing role
    pub fn missing_role(account: Address, role: Role) -> Self {
        Self::Unauthorized {
            account,
            required: Authority::Role(role),
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::ContractCaller { .. } => "contract_caller",
            Self::Paused => "paused",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientAllowance { .. } => "insufficient_allowance",
            Self::InsufficientCustody { .. } => "insufficient_custody",
            Self::ZeroAmount => "zero_amount",
            Self::ZeroRate => "zero_rate",
            Self::ZeroOutput { .. } => "zero_output",
            Self::ZeroAddress => "zero_address",
            Self::Overflow => "overflow",
            Self::AssetMismatch { .. } => "asset_mismatch",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } | Self::ContractCaller { .. } => 403,
            Self::Paused => 409,
            Self::InsufficientBalance { .. }
            | Self::InsufficientAllowance { .. }
            | Self::InsufficientCustody { .. } => 422,
            Self::ZeroAmount | Self::ZeroRate | Self::ZeroOutput { .. } | Self::ZeroAddress => 400,
            Self::Overflow => 422,
            Self::AssetMismatch { .. } => 500,
        }
    }
}

/// Result type alias for state transitions
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Result type alias for Farmland operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_codes() {
        let err = LedgerError::ZeroRate;
        assert_eq!(err.error_code(), "zero_rate");
        assert_eq!(err.status_code(), 400);

        let err = LedgerError::InsufficientCustody {
            pool: Address::from_low_u64(3),
            available: 10,
            required: 20,
        };
        assert_eq!(err.error_code(), "insufficient_custody");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_unauthorized_message_names_role() {
        let err = LedgerError::missing_role(Address::from_low_u64(9), Role::MINTER);
        assert_eq!(err.status_code(), 403);
        let message = err.to_string();
        assert!(message.contains("role MINTER"));
        assert!(message.contains("0x0000000000000000000000000000000000000009"));
    }

    #[test]
    fn test_contract_caller_is_forbidden() {
        let err = LedgerError::ContractCaller {
            account: Address::from_low_u64(3),
        };
        assert_eq!(err.error_code(), "contract_caller");
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_error_wraps_ledger_error() {
        let err: Error = LedgerError::Paused.into();
        assert!(matches!(err, Error::Ledger(LedgerError::Paused)));
        assert_eq!(err.to_string(), "Ledger error: Token is paused");
    }
}
