//! Transaction Submission Routes

use axum::{extract::State, routing::post, Json, Router};

use farmland_runtime::Receipt;

use crate::dto::{ledger_error, ErrorResponse, TxRequest};
use crate::AppState;

/// Create transaction routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_tx))
}

/// POST /tx - Apply a call atomically and return its receipt
async fn submit_tx(
    State(state): State<AppState>,
    Json(request): Json<TxRequest>,
) -> Result<Json<Receipt>, ErrorResponse> {
    state
        .submit(request.caller, request.call)
        .await
        .map(Json)
        .map_err(ledger_error)
}
