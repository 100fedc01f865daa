//! Data Transfer Objects for API requests and responses
//!
//! Amounts and rates travel as decimal strings.

use std::collections::{BTreeMap, BTreeSet};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use farmland_core::{decimal, Address, Amount, BlockHeight, LedgerError, Rate, Role, SwapDirection};
use farmland_runtime::{Call, EventRecord, LedgerSummary, TokenSummary};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub height: BlockHeight,
}

impl HealthResponse {
    pub fn at_height(height: BlockHeight) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            height,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Error half of every handler result
pub type ErrorResponse = (StatusCode, Json<ApiError>);

/// Map a rejected transition to its status and stable code
pub fn ledger_error(e: LedgerError) -> ErrorResponse {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError::new(e.error_code(), e.to_string())))
}

pub fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(message)))
}

/// Parse an address path segment
pub fn parse_address(raw: &str) -> Result<Address, ErrorResponse> {
    raw.parse()
        .map_err(|e| bad_request(format!("Invalid address {:?}: {}", raw, e)))
}

/// Token metadata and supply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfoResponse {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(with = "decimal")]
    pub total_supply: Amount,
    /// FLS only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Reserve token only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub token: Address,
    pub account: Address,
    #[serde(with = "decimal")]
    pub balance: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceResponse {
    pub token: Address,
    pub owner: Address,
    pub spender: Address,
    #[serde(with = "decimal")]
    pub allowance: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMembersResponse {
    pub role: Role,
    pub admin: Role,
    pub members: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasRoleResponse {
    pub role: Role,
    pub account: Address,
    pub has_role: bool,
}

/// Swap quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub direction: SwapDirection,
    #[serde(with = "decimal")]
    pub amount: Amount,
}

/// Transaction submission request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRequest {
    pub caller: Address,
    pub call: Call,
}

/// Query string for `GET /events`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsQuery {
    pub account: Option<String>,
    /// Comma-separated event kinds, e.g. `transfer,minted`
    pub kind: Option<String>,
    pub from_height: Option<BlockHeight>,
    pub to_height: Option<BlockHeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
    pub count: usize,
}

impl EventsResponse {
    pub fn from_records(records: Vec<&EventRecord>) -> Self {
        let events: Vec<EventRecord> = records.into_iter().cloned().collect();
        let count = events.len();
        Self { events, count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSummaryDto {
    pub address: Address,
    pub total_supply: String,
    pub balances: BTreeMap<Address, String>,
}

impl From<TokenSummary> for TokenSummaryDto {
    fn from(token: TokenSummary) -> Self {
        Self {
            address: token.address,
            total_supply: token.total_supply.to_string(),
            balances: token
                .balances
                .into_iter()
                .map(|(account, amount)| (account, amount.to_string()))
                .collect(),
        }
    }
}

/// Ledger summary rebuilt from the event log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub height: BlockHeight,
    pub fls: TokenSummaryDto,
    pub reserve: TokenSummaryDto,
    pub paused: bool,
    pub pool: Address,
    pub pool_owner: Address,
    #[serde(with = "decimal")]
    pub rate: Rate,
    #[serde(with = "decimal")]
    pub rate_scale: Rate,
    pub roles: BTreeMap<Role, BTreeSet<Address>>,
    /// Whether the replay agrees with the live contract state
    pub consistent: bool,
}

impl SummaryResponse {
    pub fn new(height: BlockHeight, replayed: LedgerSummary, consistent: bool) -> Self {
        Self {
            height,
            fls: replayed.fls.into(),
            reserve: replayed.reserve.into(),
            paused: replayed.paused,
            pool: replayed.pool,
            pool_owner: replayed.pool_owner,
            rate: replayed.rate,
            rate_scale: replayed.rate_scale,
            roles: replayed.roles,
            consistent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_mapping() {
        let (status, Json(body)) = ledger_error(LedgerError::Paused);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "paused");

        let (status, Json(body)) = ledger_error(LedgerError::missing_role(
            Address::from_low_u64(2),
            Role::MINTER,
        ));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code, "unauthorized");
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0x0000000000000000000000000000000000000002").is_ok());
        let (status, Json(body)) = parse_address("nope").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "bad_request");
    }

    #[test]
    fn test_quote_request_amount_as_string() {
        let request: QuoteRequest =
            serde_json::from_str(r#"{"direction":"fls_to_reserve","amount":"600000000"}"#).unwrap();
        assert_eq!(request.direction, SwapDirection::FlsToReserve);
        assert_eq!(request.amount, 600_000_000);
    }
}
