//! Handler for `GET /diag_assoc`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::{petit_effectif_row, Row};

use crate::api::rest::params::FilterParams;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Significant associated diagnoses (DAS): one row per CIM-10 code, crossed
/// with the `var` dimensions when requested. This endpoint carries no
/// `nb_pat` column.
pub async fn get_diag_assoc(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<Row>>> {
    params.ensure_valid()?;

    if params.simulates_empty_perimeter() {
        return Err(ApiError::NotFound(
            "Aucun séjour ne correspond aux critères de filtrage.".to_string(),
        ));
    }

    if params.simulates_petit_effectif() {
        return Ok(Json(petit_effectif_row("code_diag", "I10")));
    }

    let rows = state
        .generator
        .diag_assoc_rows(params.var.as_deref(), state.seed)?;
    Ok(Json(rows))
}
