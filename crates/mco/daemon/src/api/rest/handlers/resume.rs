//! Handler for `GET /resume`, the polyvalent ventilation endpoint.

use axum::extract::{Query, State};
use axum::Json;
use mco_core::Row;

use crate::api::rest::params::{FilterParams, ResumeParams};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};

/// Aggregated MCO stay statistics, ventilated along `var`.
///
/// Without `var` the response is a single perimeter summary row, with
/// `nb_pat` only when `bool_nb_pat=TRUE`. With `var` the response carries one
/// row per dimension combination (capped), `nb_pat` always included. The
/// special `var=duree` returns the stay-duration distribution, rows of
/// exactly `{duree, nb_sej}`.
pub async fn get_resume(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    Query(extra): Query<ResumeParams>,
) -> ApiResult<Json<Vec<Row>>> {
    params.ensure_valid()?;

    // Empty-perimeter simulation: the filters matched no stay at all.
    if params.simulates_empty_perimeter() {
        return Err(ApiError::NotFound(
            "Aucun séjour ne correspond aux critères de filtrage.".to_string(),
        ));
    }

    let include_nb_pat = extra.include_nb_pat();

    // Statistical secrecy, Method A: below the disclosure threshold the
    // patient count cannot be published, the sentinel takes its place.
    if params.simulates_petit_effectif() && include_nb_pat && params.var.is_none() {
        return Ok(Json(state.generator.resume_petit_effectif_row(state.seed)));
    }

    let rows = state.generator.resume_rows(
        params.var.as_deref(),
        extra.trancheage.as_deref(),
        include_nb_pat,
        state.seed,
    )?;
    Ok(Json(rows))
}
