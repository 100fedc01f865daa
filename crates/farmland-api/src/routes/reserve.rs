//! Reserve Token Routes

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use fls_token::Fungible;

use crate::dto::{parse_address, BalanceResponse, ErrorResponse, TokenInfoResponse};
use crate::AppState;

/// Create reserve token routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_reserve))
        .route("/balances/:address", get(get_balance))
}

/// GET /reserve - Metadata, supply and issuer
async fn get_reserve(State(state): State<AppState>) -> Json<TokenInfoResponse> {
    let chain = state.chain().await;
    let reserve = chain.reserve();
    let metadata = reserve.metadata();
    Json(TokenInfoResponse {
        address: reserve.address(),
        name: metadata.name.clone(),
        symbol: metadata.symbol.clone(),
        decimals: metadata.decimals,
        total_supply: reserve.total_supply(),
        paused: None,
        issuer: Some(reserve.issuer()),
    })
}

/// GET /reserve/balances/:address
async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let account = parse_address(&address)?;
    let chain = state.chain().await;
    Ok(Json(BalanceResponse {
        token: chain.reserve().address(),
        account,
        balance: chain.reserve().balance_of(&account),
    }))
}
