//! Query parameters shared by the MCO endpoints.
//!
//! The real statistics backend narrows its cohort with these filter fields.
//! The mock accepts them all so that production clients can send their
//! requests unchanged, but only `annee`, `var` and the simulation toggles
//! drive any behavior here; the rest is round-tripped and ignored.

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// The common filter bag, one instance per request.
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    /// Two-digit PMSI year (e.g. `"23"` for 2023). Mandatory everywhere.
    pub annee: String,

    // Temporal filters
    pub moissortie: Option<String>,

    // Demographic filters
    pub sexe: Option<String>,
    pub age: Option<String>,
    pub typhosp: Option<String>,

    // Clinical filters
    pub diag: Option<String>,
    pub diag_pos: Option<String>,
    pub acte: Option<String>,
    pub exclu_acte: Option<String>,
    pub and_acte: Option<String>,
    pub and_exclu_acte: Option<String>,
    pub um: Option<String>,

    // Facility filters
    pub finess: Option<String>,
    pub finessgeo: Option<String>,
    pub categ: Option<String>,
    pub secteur: Option<String>,

    // Pathway filters
    pub modeentree: Option<String>,
    pub modesortie: Option<String>,
    pub provenance: Option<String>,
    pub destination: Option<String>,
    pub passageurg: Option<String>,

    // Facility geography
    pub type_geo_etab: Option<String>,
    pub codes_geo_etab: Option<String>,

    // Patient geography
    pub codegeo: Option<String>,
    pub type_geo_pat: Option<String>,
    pub codes_geo_pat: Option<String>,

    // Drug / device filters
    pub code_lpp: Option<String>,
    pub code_ucd: Option<String>,

    // Casemix filters
    pub ghm: Option<String>,
    pub racine: Option<String>,
    pub cmd: Option<String>,
    pub dp: Option<String>,
    pub da: Option<String>,
    pub ga: Option<String>,
    pub gp: Option<String>,
    pub aso: Option<String>,
    pub cas: Option<String>,

    // Authentication context (forwarded by the client portal, unused here)
    pub profils_niveau: Option<String>,
    pub profils_entite: Option<String>,
    pub id_utilisateur: Option<String>,
    pub token_utilisateur: Option<String>,
    pub refus_cookie: Option<String>,

    // Ventilation
    pub var: Option<String>,

    // Mock-only simulation toggles
    pub simulate_vide: Option<String>,
    pub simulate_petit_effectif: Option<String>,
}

impl FilterParams {
    /// `annee` must be exactly two digits on every endpoint.
    pub fn ensure_valid(&self) -> ApiResult<()> {
        mco_core::parse_annee(&self.annee)
            .map(|_| ())
            .map_err(ApiError::from)
    }

    /// `simulate_vide=TRUE`: pretend the filters matched no stay at all.
    pub fn simulates_empty_perimeter(&self) -> bool {
        flag(&self.simulate_vide)
    }

    /// `simulate_petit_effectif=TRUE`: pretend the cohort is below the
    /// statistical-secrecy threshold.
    pub fn simulates_petit_effectif(&self) -> bool {
        flag(&self.simulate_petit_effectif)
    }
}

/// Extra query parameters of `GET /resume`.
#[derive(Debug, Deserialize)]
pub struct ResumeParams {
    /// `"TRUE"` to include `nb_pat` even without `var` (perimeter summary)
    pub bool_nb_pat: Option<String>,

    /// Age-pyramid cut points, `_`-separated (with `var=sexe_trancheage`)
    pub trancheage: Option<String>,
}

impl ResumeParams {
    pub fn include_nb_pat(&self) -> bool {
        flag(&self.bool_nb_pat)
    }
}

/// Extra query parameters of `GET /resume_prec_annee`.
#[derive(Debug, Deserialize)]
pub struct TrancheageParams {
    /// Age-pyramid cut points, `_`-separated (with `var=sexe_trancheage`)
    pub trancheage: Option<String>,
}

/// Extra query parameters of `GET /tx_recours`.
#[derive(Debug, Deserialize)]
pub struct TxRecoursParams {
    /// Geographic level: `dep` (default), `reg`, `zon`, `ts` or `geo`
    #[serde(default = "default_type_geo")]
    pub type_geo_tx_recours: String,
}

fn default_type_geo() -> String {
    "dep".to_string()
}

/// The R client serializes its booleans as the string `"TRUE"`.
fn flag(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case("TRUE"))
}
