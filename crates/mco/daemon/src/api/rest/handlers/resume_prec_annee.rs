//! Handler for `GET /resume_prec_annee`, the multi-year variant of `/resume`.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::{petit_effectif_row, Row};

use crate::api::rest::params::{FilterParams, TrancheageParams};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Five consecutive years of aggregated stay statistics, ending at the
/// requested year. `annee` is always the leading column and `nb_pat` is
/// always present, unlike `/resume`.
pub async fn get_resume_prec_annee(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    Query(extra): Query<TrancheageParams>,
) -> ApiResult<Json<Vec<Row>>> {
    params.ensure_valid()?;

    if params.simulates_empty_perimeter() {
        return Err(ApiError::NotFound(
            "Aucun séjour ne correspond aux critères de filtrage.".to_string(),
        ));
    }

    // Statistical secrecy, Method B: a single all-string row.
    if params.simulates_petit_effectif() {
        return Ok(Json(petit_effectif_row("annee", "2023")));
    }

    let rows = state.generator.resume_prec_annee_rows(
        params.var.as_deref(),
        &params.annee,
        extra.trancheage.as_deref(),
        state.seed,
    )?;
    Ok(Json(rows))
}
