//! Handler for `GET /actes`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::{petit_effectif_row, Row};

use crate::api::rest::params::FilterParams;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// CCAM classifying procedures: one row per `code_ccam` with the
/// procedure-specific columns (`nb_acte`, `extension_pmsi`, `acte_activ`,
/// `is_classant`). No `tx_dc` and no `nb_pat` on this endpoint.
pub async fn get_actes(
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
        return Ok(Json(petit_effectif_row("code_ccam", "DZQM006")));
    }

    let rows = state
        .generator
        .actes_rows(params.var.as_deref(), state.seed)?;
    Ok(Json(rows))
}
