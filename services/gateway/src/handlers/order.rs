use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};

use crate::error::ApiError;
use crate::models::{MatchedOrder, OrderKind, PlaceOrderRequest, PlaceOrderResponse};
use crate::state::AppState;

pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let market = MarketId::new(payload.market);
    let user_id = UserId::new(payload.user_id);
    let size =
        Quantity::try_new(payload.size).map_err(|err| ApiError::BadRequest(err.to_string()))?;

    match payload.kind {
        OrderKind::Limit => {
            let raw_price = payload
                .price
                .ok_or_else(|| ApiError::BadRequest("price is required for LIMIT orders".into()))?;
            let price =
                Price::try_new(raw_price).map_err(|err| ApiError::BadRequest(err.to_string()))?;

            let order_id =
                state
                    .exchange
                    .place_limit_order(&market, payload.side, price, size, user_id)?;

            Ok(Json(PlaceOrderResponse::Limit { order_id }))
        }
        OrderKind::Market => {
            let outcome = state
                .exchange
                .place_market_order(&market, payload.side, size, user_id)?;

            let matches = outcome
                .matches
                .iter()
                .map(|m| MatchedOrder::from_match(m, payload.side))
                .collect();

            Ok(Json(PlaceOrderResponse::Market {
                matches,
                size_filled: outcome.size_filled,
            }))
        }
    }
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.exchange.cancel_order(OrderId::from_u64(order_id))?;
    Ok(StatusCode::OK)
}
