//! Handler for `GET /dmi_med`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::{petit_effectif_row, Row};

use crate::api::rest::params::FilterParams;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Costly drugs (UCD) and implantable devices (DMI/LPP), mixed in one
/// response. The `datasource` column discriminates the two row shapes: drug
/// rows carry the UCD identity and ATC hierarchy with device fields null,
/// device rows the reverse.
pub async fn get_dmi_med(
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
        return Ok(Json(petit_effectif_row("datasource", "med")));
    }

    let rows = state
        .generator
        .dmi_med_rows(params.var.as_deref(), state.seed)?;
    Ok(Json(rows))
}
