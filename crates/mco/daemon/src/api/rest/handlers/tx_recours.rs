//! Handler for `GET /tx_recours`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::Row;

use crate::api::rest::params::{FilterParams, TxRecoursParams};
use crate::api::rest::state::AppState;
use crate::error::ApiResult;

/// Geographic care-use rates: stays and patients per 1000 inhabitants for
/// every zone at the level selected by `type_geo_tx_recours` (`dep` by
/// default, or `reg`, `zon`, `ts`, `geo`).
pub async fn get_tx_recours(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    Query(extra): Query<TxRecoursParams>,
) -> ApiResult<Json<Vec<Row>>> {
    params.ensure_valid()?;

    let rows = state
        .generator
        .tx_recours_rows(&extra.type_geo_tx_recours, state.seed);
    Ok(Json(rows))
}
