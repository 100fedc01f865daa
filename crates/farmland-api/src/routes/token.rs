//! FLS Token Routes

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use farmland_core::Role;
use fls_token::Fungible;

use crate::dto::{
    parse_address, AllowanceResponse, BalanceResponse, ErrorResponse, HasRoleResponse,
    RoleMembersResponse, TokenInfoResponse,
};
use crate::AppState;

/// Create FLS token routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_token))
        .route("/balances/:address", get(get_balance))
        .route("/allowances/:owner/:spender", get(get_allowance))
        .route("/roles/:role", get(get_role_members))
        .route("/roles/:role/:address", get(has_role))
}

/// GET /token - Metadata, supply and pause flag
async fn get_token(State(state): State<AppState>) -> Json<TokenInfoResponse> {
    let chain = state.chain().await;
    let fls = chain.fls();
    Json(TokenInfoResponse {
        address: fls.address(),
        name: fls.name().to_string(),
        symbol: fls.symbol().to_string(),
        decimals: fls.decimals(),
        total_supply: fls.total_supply(),
        paused: Some(fls.paused()),
        issuer: None,
    })
}

/// GET /token/balances/:address
async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let account = parse_address(&address)?;
    let chain = state.chain().await;
    Ok(Json(BalanceResponse {
        token: chain.fls().address(),
        account,
        balance: chain.fls().balance_of(&account),
    }))
}

/// GET /token/allowances/:owner/:spender
async fn get_allowance(
    State(state): State<AppState>,
    Path((owner, spender)): Path<(String, String)>,
) -> Result<Json<AllowanceResponse>, ErrorResponse> {
    let owner = parse_address(&owner)?;
    let spender = parse_address(&spender)?;
    let chain = state.chain().await;
    Ok(Json(AllowanceResponse {
        token: chain.fls().address(),
        owner,
        spender,
        allowance: chain.fls().allowance(&owner, &spender),
    }))
}

/// GET /token/roles/:role - Members and admin role
async fn get_role_members(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Json<RoleMembersResponse> {
    let role = Role::new(role);
    let chain = state.chain().await;
    Json(RoleMembersResponse {
        admin: chain.fls().get_role_admin(&role),
        members: chain.fls().roles().members(&role),
        role,
    })
}

/// GET /token/roles/:role/:address
async fn has_role(
    State(state): State<AppState>,
    Path((role, address)): Path<(String, String)>,
) -> Result<Json<HasRoleResponse>, ErrorResponse> {
    let role = Role::new(role);
    let account = parse_address(&address)?;
    let chain = state.chain().await;
    Ok(Json(HasRoleResponse {
        has_role: chain.fls().has_role(&role, &account),
        role,
        account,
    }))
}
