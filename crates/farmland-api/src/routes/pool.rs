//! Liquidity Pool Routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use liquidity_pool::{PoolState, SwapQuote};

use crate::dto::{ledger_error, ErrorResponse, QuoteRequest};
use crate::AppState;

/// Create pool routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_pool))
        .route("/quote", post(get_quote))
}

/// GET /pool - Rate, pair, owner, custody and MINTER status
async fn get_pool(State(state): State<AppState>) -> Json<PoolState> {
    Json(state.chain().await.pool_state())
}

/// POST /pool/quote - Price a swap at the current rate
async fn get_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<SwapQuote>, ErrorResponse> {
    state
        .chain()
        .await
        .quote(request.direction, request.amount)
        .map(Json)
        .map_err(ledger_error)
}
