//! Handler for `GET /um`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::{petit_effectif_row, Row};

use crate::api::rest::params::FilterParams;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Activity per medical-unit type: one row per `code_rum`, with the
/// RUM-level mean stay duration (`duree_moy_rum`) alongside the full-stay
/// one.
pub async fn get_um(
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
        return Ok(Json(petit_effectif_row("code_rum", "01")));
    }

    let rows = state.generator.um_rows(params.var.as_deref(), state.seed)?;
    Ok(Json(rows))
}
