use axum::extract::{Path, State};
use axum::Json;
use matching_engine::BookSnapshot;
use types::ids::MarketId;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_book(
    State(state): State<AppState>,
    Path(market): Path<String>,
) -> Result<Json<BookSnapshot>, ApiError> {
    let snapshot = state.exchange.book_snapshot(&MarketId::new(market))?;
    Ok(Json(snapshot))
}
