//! Event Log Routes

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use farmland_core::EventKind;
use farmland_runtime::EventFilter;

use crate::dto::{bad_request, parse_address, ErrorResponse, EventsQuery, EventsResponse};
use crate::AppState;

/// Create event log routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_events))
        .route("/swaps/:address", get(get_swaps))
}

fn parse_kinds(raw: &str) -> Result<Vec<EventKind>, ErrorResponse> {
    raw.split(',')
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .map(|kind| {
            serde_json::from_value(serde_json::Value::String(kind.to_string()))
                .map_err(|_| bad_request(format!("Unknown event kind: {}", kind)))
        })
        .collect()
}

/// GET /events?account=&kind=&from_height=&to_height=
async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, ErrorResponse> {
    let filter = EventFilter {
        account: query.account.as_deref().map(parse_address).transpose()?,
        kinds: match query.kind.as_deref() {
            Some(raw) => parse_kinds(raw)?,
            None => Vec::new(),
        },
        from_height: query.from_height,
        to_height: query.to_height,
    };

    let chain = state.chain().await;
    Ok(Json(EventsResponse::from_records(chain.events().query(&filter))))
}

/// GET /events/swaps/:address - Swap history for one account
async fn get_swaps(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<EventsResponse>, ErrorResponse> {
    let account = parse_address(&address)?;
    let chain = state.chain().await;
    Ok(Json(EventsResponse::from_records(
        chain.events().swap_history(&account, None),
    )))
}
