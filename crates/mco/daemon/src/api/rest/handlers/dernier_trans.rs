//! Handler for `GET /dernier_trans`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::Row;

use crate::api::rest::params::FilterParams;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Last PMSI transmission date per facility, one row per FINESS code.
///
/// Transmission dates are administrative data, so this endpoint is exempt
/// from the statistical-secrecy simulations; only the empty-perimeter one
/// applies.
pub async fn get_dernier_trans(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<Row>>> {
    params.ensure_valid()?;

    if params.simulates_empty_perimeter() {
        return Err(ApiError::NotFound(
            "Aucun établissement ne correspond aux critères de filtrage.".to_string(),
        ));
    }

    let rows = state
        .generator
        .dernier_trans_rows(&params.annee, state.seed)?;
    Ok(Json(rows))
}
