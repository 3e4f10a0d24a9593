//! Synthetic row generation for the mock MCO endpoints.
//!
//! Each public generator maps to one endpoint and follows the same pipeline:
//! parse the `var` string, resolve every token to its value domain, take the
//! cartesian product (prefixed with the endpoint's identifier catalog when it
//! has one), then draw the endpoint's measure columns for every combination.
//! Values live in realistic MCO activity ranges and respect the cross-field
//! consistency rules (a patient can have several stays, never the opposite;
//! a RUM is a sub-stay; a stay can carry several procedures).
//!
//! Every generator owns its random stream: an explicit `seed` argument yields
//! bit-identical output, `None` draws from entropy. Nothing here touches a
//! process-global generator, so concurrent calls are independent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use crate::error::GeneratorError;
use crate::nomenclature::{
    atc_for, label_for, Nomenclature, CCAM, CIM10, CODEGEO, DEPARTEMENTS, FINESS, HIERA_LPP, LPP,
    REGIONS, TERRITOIRES_SANTE, TYPE_UM, UCD, ZONES_ARS,
};
use crate::ventilation::{parse_annee, parse_var, var_columns, var_values, VarValue};

/// One output record: an ordered mapping from column name to JSON value.
/// Ventilation columns come first (in token order), measures after.
pub type Row = Map<String, Value>;

/// Sentinel replacing `nb_pat` when the cohort is below the disclosure
/// threshold (Method A of the statistical-secrecy rules).
pub const PETIT_EFFECTIF: &str = "petit_effectif";

/// Hard cap on emitted rows. Large cross products are shuffled before
/// truncation so the sample stays representative instead of biased toward
/// the first catalog entries.
pub const MAX_ROWS: usize = 100;

/// FINESS codes of public facilities (CHU/CH); the others are private clinics.
const FINESS_PUBLICS: &[&str] = &[
    "130783293",
    "750100018",
    "690023154",
    "330781196",
    "310781406",
];

/// One ventilation dimension resolved to its domain and output columns.
struct ResolvedVar {
    columns: Vec<String>,
    values: Vec<VarValue>,
}

/// The five measure columns shared by most endpoints.
struct BaseStats {
    nb_sej: i64,
    duree_moy_sej: f64,
    tx_dc: f64,
    tx_male: f64,
    age_moy: f64,
}

/// Synthesizes endpoint responses against an injected dimension registry.
pub struct Generator {
    nomenclature: Nomenclature,
}

impl Generator {
    pub fn new(nomenclature: Nomenclature) -> Self {
        Self { nomenclature }
    }

    pub fn nomenclature(&self) -> &Nomenclature {
        &self.nomenclature
    }

    /// Rows for `GET /resume`.
    ///
    /// Without `var`: one aggregated row (with `nb_pat` only when the caller
    /// asked for it). With `var=duree` alone: the stay-duration distribution,
    /// rows of exactly `{duree, nb_sej}`. Otherwise: the cartesian product of
    /// the requested dimensions, `nb_pat` always included.
    pub fn resume_rows(
        &self,
        var: Option<&str>,
        trancheage: Option<&str>,
        include_nb_pat: bool,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let tokens = parse_var(&self.nomenclature, var);

        // No ventilation: a single perimeter summary row.
        if tokens.is_empty() {
            let stats = base_stats(&mut rng);
            let mut row = Row::new();
            push_base_measures(&mut row, &stats);
            if include_nb_pat {
                let nb_pat = draw_nb_pat(&mut rng, stats.nb_sej);
                row.insert("nb_pat".to_string(), Value::from(nb_pat));
            }
            return Ok(vec![row]);
        }

        // Stay-duration distribution: only {duree, nb_sej}, more short stays
        // than long ones.
        if tokens.len() == 1 && tokens[0] == "duree" {
            let duree_values = var_values(&self.nomenclature, "duree", None)?;
            let nb_sej_total = rng.gen_range(50_000..=150_000i64);
            let mut rows = Vec::with_capacity(duree_values.len());
            for value in duree_values {
                let VarValue::Int(duree) = value else { continue };
                let nb_sej = ((nb_sej_total as f64 / (duree as f64 + 1.5))
                    * rng.gen_range(0.8..1.2)) as i64;
                let mut row = Row::new();
                row.insert("duree".to_string(), Value::from(duree));
                row.insert("nb_sej".to_string(), Value::from(nb_sej.max(100)));
                rows.push(row);
            }
            return Ok(rows);
        }

        // General case: cartesian product over all requested dimensions.
        let dims = self.resolve(&tokens, trancheage)?;
        let mut rows = Vec::new();
        for mut row in combination_prefixes(&dims) {
            let stats = base_stats(&mut rng);
            let nb_pat = draw_nb_pat(&mut rng, stats.nb_sej);
            row.insert("nb_sej".to_string(), Value::from(stats.nb_sej));
            row.insert("nb_pat".to_string(), Value::from(nb_pat));
            push_tail_measures(&mut row, &stats);
            rows.push(row);
        }
        Ok(cap_rows(rows, &mut rng))
    }

    /// Method A suppression row for `/resume`: the cohort is below the
    /// disclosure threshold, so `nb_pat` carries the sentinel string instead
    /// of an integer and the stay count is drawn small.
    pub fn resume_petit_effectif_row(&self, seed: Option<u64>) -> Vec<Row> {
        let mut rng = rng_for(seed);
        let mut row = Row::new();
        row.insert("nb_sej".to_string(), Value::from(rng.gen_range(1..10i64)));
        row.insert("nb_pat".to_string(), Value::from(PETIT_EFFECTIF));
        row.insert(
            "duree_moy_sej".to_string(),
            Value::from(round2(rng.gen_range(1.0..8.0))),
        );
        row.insert("tx_dc".to_string(), Value::from(round4(rng.gen_range(0.0..0.10))));
        row.insert(
            "tx_male".to_string(),
            Value::from(round4(rng.gen_range(0.30..0.70))),
        );
        row.insert(
            "age_moy".to_string(),
            Value::from(round1(rng.gen_range(30.0..85.0))),
        );
        vec![row]
    }

    /// Rows for `GET /resume_prec_annee`: five consecutive years ending at
    /// the requested one, crossed with the other dimensions. `annee` is the
    /// leading column and `nb_pat` is always present.
    pub fn resume_prec_annee_rows(
        &self,
        var: Option<&str>,
        annee: &str,
        trancheage: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let annee = parse_annee(annee)?;
        let annees = ResolvedVar {
            columns: vec!["annee".to_string()],
            values: ((annee - 4)..=annee)
                .map(|a| VarValue::Int(i64::from(a)))
                .collect(),
        };

        self.expand(Some(annees), var, trancheage, &mut rng, |rng, row| {
            let stats = base_stats(rng);
            let nb_pat = draw_nb_pat(rng, stats.nb_sej);
            row.insert("nb_sej".to_string(), Value::from(stats.nb_sej));
            row.insert("nb_pat".to_string(), Value::from(nb_pat));
            push_tail_measures(row, &stats);
        })
    }

    /// Rows for `GET /diag_assoc`: one row per associated CIM-10 diagnosis
    /// (times the requested dimensions). No `nb_pat` on this endpoint.
    pub fn diag_assoc_rows(
        &self,
        var: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let leading = identifier_dim("code_diag", CIM10);
        self.expand(Some(leading), var, None, &mut rng, |rng, row| {
            let stats = base_stats(rng);
            push_base_measures(row, &stats);
        })
    }

    /// Rows for `GET /um`: one row per medical-unit type, with the RUM-level
    /// mean duration alongside the full-stay one. A RUM is a sub-stay, so
    /// `duree_moy_rum` never exceeds `duree_moy_sej`.
    pub fn um_rows(
        &self,
        var: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let leading = identifier_dim("code_rum", TYPE_UM);
        self.expand(Some(leading), var, None, &mut rng, |rng, row| {
            let stats = base_stats(rng);
            let duree_moy_rum = round2(stats.duree_moy_sej * rng.gen_range(0.5..0.95));
            row.insert("nb_sej".to_string(), Value::from(stats.nb_sej));
            row.insert(
                "duree_moy_sej".to_string(),
                Value::from(stats.duree_moy_sej),
            );
            row.insert("duree_moy_rum".to_string(), Value::from(duree_moy_rum));
            row.insert("tx_dc".to_string(), Value::from(stats.tx_dc));
            row.insert("tx_male".to_string(), Value::from(stats.tx_male));
            row.insert("age_moy".to_string(), Value::from(stats.age_moy));
        })
    }

    /// Rows for `GET /actes`: one row per CCAM procedure code. A stay can
    /// carry several procedures, so `nb_sej` stays below `nb_acte`. No
    /// `tx_dc` and no `nb_pat` on this endpoint.
    pub fn actes_rows(
        &self,
        var: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let leading = identifier_dim("code_ccam", CCAM);
        self.expand(Some(leading), var, None, &mut rng, |rng, row| {
            let nb_acte = rng.gen_range(500..=10_000i64);
            let nb_sej = rng.gen_range((nb_acte as f64 * 0.8) as i64..=nb_acte);
            row.insert(
                "extension_pmsi".to_string(),
                Value::from(["0", "1"][rng.gen_range(0..2)]),
            );
            row.insert("nb_acte".to_string(), Value::from(nb_acte));
            row.insert("nb_sej".to_string(), Value::from(nb_sej));
            row.insert(
                "duree_moy_sej".to_string(),
                Value::from(round2(rng.gen_range(1.0..15.0))),
            );
            row.insert(
                "tx_male".to_string(),
                Value::from(round4(rng.gen_range(0.30..0.70))),
            );
            row.insert(
                "age_moy".to_string(),
                Value::from(round1(rng.gen_range(30.0..85.0))),
            );
            row.insert(
                "acte_activ".to_string(),
                Value::from(["1", "2", "3", "4", "5"][rng.gen_range(0..5)]),
            );
            row.insert("is_classant".to_string(), Value::from(rng.gen_range(0..=1i64)));
        })
    }

    /// Rows for `GET /dmi_med`: a mix of drug rows (`datasource="med"`, UCD
    /// identity and ATC hierarchy filled, device fields null) and implantable
    /// device rows (`datasource="dmi"`, LPP identity and hierarchy filled,
    /// drug fields null). Devices go one per stay, so their `nb_sej` equals
    /// the device count.
    pub fn dmi_med_rows(
        &self,
        var: Option<&str>,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let tokens = parse_var(&self.nomenclature, var);
        let dims = self.resolve(&tokens, None)?;
        let prefixes = combination_prefixes(&dims);

        let mut rows = Vec::new();
        for (code, _) in UCD {
            for prefix in &prefixes {
                rows.push(med_row(&mut rng, code, prefix.clone()));
            }
        }
        for (code, _) in LPP {
            for prefix in &prefixes {
                rows.push(dmi_row(&mut rng, code, prefix.clone()));
            }
        }
        Ok(cap_rows(rows, &mut rng))
    }

    /// Rows for `GET /dernier_trans`: one row per FINESS facility with its
    /// last PMSI transmission date. Year-N data is transmitted early in year
    /// N+1, hence the January-March dates.
    pub fn dernier_trans_rows(
        &self,
        annee: &str,
        seed: Option<u64>,
    ) -> Result<Vec<Row>, GeneratorError> {
        let mut rng = rng_for(seed);
        let annee = parse_annee(annee)?;

        let mut rows = Vec::with_capacity(FINESS.len());
        for (finess_code, rs) in FINESS {
            let (secteur, categ) = if FINESS_PUBLICS.contains(finess_code) {
                ("PU", "CH")
            } else {
                ("PR", "CL")
            };
            let mois = rng.gen_range(1..=3);
            let jour = rng.gen_range(1..=28);
            let date_trans = format!("{}-{mois:02}-{jour:02}", annee + 1);

            let mut row = Row::new();
            row.insert("annee".to_string(), Value::from(annee));
            row.insert("finess".to_string(), Value::from(*finess_code));
            row.insert("rs".to_string(), Value::from(*rs));
            row.insert("secteur".to_string(), Value::from(secteur));
            row.insert("categ".to_string(), Value::from(categ));
            row.insert("derniere_transmission".to_string(), Value::from(date_trans));
            rows.push(row);
        }
        Ok(rows)
    }

    /// Rows for `GET /tx_recours`: stay and patient rates per 1000
    /// inhabitants for every zone at the requested geographic level. The
    /// standardized rates simulate age/sex adjustment with a ±5% factor.
    pub fn tx_recours_rows(&self, type_geo: &str, seed: Option<u64>) -> Vec<Row> {
        let mut rng = rng_for(seed);
        let codes: Vec<&str> = match type_geo {
            "reg" => REGIONS.iter().map(|(code, _)| *code).collect(),
            "zon" => ZONES_ARS.to_vec(),
            "ts" => TERRITOIRES_SANTE.to_vec(),
            "geo" => CODEGEO.to_vec(),
            // "dep" and any unknown level fall back to départements
            _ => DEPARTEMENTS.iter().map(|(code, _)| *code).collect(),
        };

        let mut rows = Vec::with_capacity(codes.len());
        for code in codes {
            let nb_pop = rng.gen_range(100_000..=5_000_000i64);
            let tx_brut_sej = rng.gen_range(60.0..120.0);
            let tx_brut_pat = tx_brut_sej * rng.gen_range(0.80..0.95);
            let nb_sej = (nb_pop as f64 * tx_brut_sej / 1000.0) as i64;
            let nb_pat = (nb_pop as f64 * tx_brut_pat / 1000.0) as i64;
            let facteur_std = rng.gen_range(0.95..1.05);

            let mut row = Row::new();
            row.insert("typ_geo".to_string(), Value::from(type_geo));
            row.insert("code".to_string(), Value::from(code));
            row.insert("nb_sej".to_string(), Value::from(nb_sej));
            row.insert("nb_pat".to_string(), Value::from(nb_pat));
            row.insert("nb_pop".to_string(), Value::from(nb_pop));
            row.insert(
                "tx_recours_brut_sej".to_string(),
                Value::from(round2(tx_brut_sej)),
            );
            row.insert(
                "tx_recours_brut_pat".to_string(),
                Value::from(round2(tx_brut_pat)),
            );
            row.insert(
                "tx_recours_standard_sej".to_string(),
                Value::from(round2(tx_brut_sej * facteur_std)),
            );
            row.insert(
                "tx_recours_standard_pat".to_string(),
                Value::from(round2(tx_brut_pat * facteur_std)),
            );
            rows.push(row);
        }
        rows
    }

    /// Resolve parsed tokens to (domain, columns) pairs, in token order.
    fn resolve(
        &self,
        tokens: &[String],
        trancheage: Option<&str>,
    ) -> Result<Vec<ResolvedVar>, GeneratorError> {
        tokens
            .iter()
            .map(|token| {
                Ok(ResolvedVar {
                    columns: var_columns(token),
                    values: var_values(&self.nomenclature, token, trancheage)?,
                })
            })
            .collect()
    }

    /// Shared cartesian path: resolve `var`, prepend the optional identifier
    /// dimension, expand all combinations, let the shape policy fill the
    /// measures, then apply the row cap.
    fn expand(
        &self,
        leading: Option<ResolvedVar>,
        var: Option<&str>,
        trancheage: Option<&str>,
        rng: &mut StdRng,
        mut fill: impl FnMut(&mut StdRng, &mut Row),
    ) -> Result<Vec<Row>, GeneratorError> {
        let tokens = parse_var(&self.nomenclature, var);
        let mut dims = Vec::with_capacity(tokens.len() + 1);
        if let Some(leading) = leading {
            dims.push(leading);
        }
        dims.extend(self.resolve(&tokens, trancheage)?);

        let mut rows = Vec::new();
        for mut row in combination_prefixes(&dims) {
            fill(rng, &mut row);
            rows.push(row);
        }
        Ok(cap_rows(rows, rng))
    }
}

/// Single-row response for the Method B statistical-secrecy convention:
/// exactly one row, exactly one string-valued column. Clients detect the
/// suppressed cohort by the absence of any numeric column.
pub fn petit_effectif_row(identifier_col: &str, value: &str) -> Vec<Row> {
    let mut row = Row::new();
    row.insert(identifier_col.to_string(), Value::from(value));
    vec![row]
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn base_stats(rng: &mut StdRng) -> BaseStats {
    BaseStats {
        nb_sej: rng.gen_range(100..=30_000),
        duree_moy_sej: round2(rng.gen_range(1.0..15.0)),
        tx_dc: round4(rng.gen_range(0.0..0.10)),
        tx_male: round4(rng.gen_range(0.30..0.70)),
        age_moy: round1(rng.gen_range(30.0..85.0)),
    }
}

/// A patient can have several stays in the year, never the opposite; the
/// observed ratio sits between 0.7 and 1.0.
fn draw_nb_pat(rng: &mut StdRng, nb_sej: i64) -> i64 {
    rng.gen_range((nb_sej as f64 * 0.70) as i64..=nb_sej)
}

/// All five base measures, `nb_sej` first.
fn push_base_measures(row: &mut Row, stats: &BaseStats) {
    row.insert("nb_sej".to_string(), Value::from(stats.nb_sej));
    push_tail_measures(row, stats);
}

/// The base measures that follow the count columns.
fn push_tail_measures(row: &mut Row, stats: &BaseStats) {
    row.insert(
        "duree_moy_sej".to_string(),
        Value::from(stats.duree_moy_sej),
    );
    row.insert("tx_dc".to_string(), Value::from(stats.tx_dc));
    row.insert("tx_male".to_string(), Value::from(stats.tx_male));
    row.insert("age_moy".to_string(), Value::from(stats.age_moy));
}

/// Fixed identifier dimension over a code catalog (diagnosis codes, UM
/// types, procedure codes).
fn identifier_dim(column: &str, table: &[(&str, &str)]) -> ResolvedVar {
    ResolvedVar {
        columns: vec![column.to_string()],
        values: table
            .iter()
            .map(|(code, _)| VarValue::Str((*code).to_string()))
            .collect(),
    }
}

/// All dimension-column combinations, rightmost dimension varying fastest.
/// No dimension yields a single empty prefix (the aggregated case).
fn combination_prefixes(dims: &[ResolvedVar]) -> Vec<Row> {
    let mut prefixes = vec![Row::new()];
    for dim in dims {
        let mut next = Vec::with_capacity(prefixes.len() * dim.values.len());
        for prefix in &prefixes {
            for value in &dim.values {
                let mut row = prefix.clone();
                push_dim_columns(&mut row, &dim.columns, value);
                next.push(row);
            }
        }
        prefixes = next;
    }
    prefixes
}

fn push_dim_columns(row: &mut Row, columns: &[String], value: &VarValue) {
    match (columns, value) {
        ([first, second], VarValue::Pair(a, b)) => {
            row.insert(first.clone(), Value::from(a.clone()));
            row.insert(second.clone(), Value::from(b.clone()));
        }
        ([column, ..], value) => {
            row.insert(column.clone(), value.to_json());
        }
        _ => {}
    }
}

fn cap_rows(mut rows: Vec<Row>, rng: &mut StdRng) -> Vec<Row> {
    if rows.len() > MAX_ROWS {
        rows.shuffle(rng);
        rows.truncate(MAX_ROWS);
    }
    rows
}

fn med_row(rng: &mut StdRng, code_ucd: &str, mut row: Row) -> Row {
    let atc = atc_for(code_ucd);
    let nb = rng.gen_range(1_000..=10_000i64);
    let nb_sej = rng.gen_range((nb as f64 * 0.3) as i64..=nb);
    let nb_pat = draw_nb_pat(rng, nb_sej);

    row.insert("datasource".to_string(), Value::from("med"));
    row.insert("code".to_string(), Value::from(code_ucd));
    row.insert("code_ucd".to_string(), Value::from(code_ucd));
    row.insert("lib_ucd".to_string(), opt_str(label_for(UCD, code_ucd)));
    row.insert("atc1".to_string(), opt_str(atc.map(|a| a.atc1)));
    row.insert("atc2".to_string(), opt_str(atc.map(|a| a.atc2)));
    row.insert("atc3".to_string(), opt_str(atc.map(|a| a.atc3)));
    row.insert("atc4".to_string(), opt_str(atc.map(|a| a.atc4)));
    row.insert("atc5".to_string(), opt_str(atc.map(|a| a.atc5)));
    row.insert("nb".to_string(), Value::from(nb));
    row.insert("nb_sej".to_string(), Value::from(nb_sej));
    row.insert("nb_pat".to_string(), Value::from(nb_pat));
    row.insert(
        "mnt_remb".to_string(),
        Value::from(round2(rng.gen_range(10_000.0..2_000_000.0))),
    );
    row.insert(
        "duree_moy_sej".to_string(),
        Value::from(round2(rng.gen_range(1.0..10.0))),
    );
    row.insert(
        "age_moy".to_string(),
        Value::from(round1(rng.gen_range(40.0..80.0))),
    );
    row.insert("code_lpp".to_string(), Value::Null);
    row.insert("hiera".to_string(), Value::Null);
    row.insert("hiera_libelle".to_string(), Value::Null);
    row
}

fn dmi_row(rng: &mut StdRng, code_lpp: &str, mut row: Row) -> Row {
    let lpp_index = LPP
        .iter()
        .position(|(code, _)| *code == code_lpp)
        .unwrap_or(0);
    let (hiera, hiera_libelle) = HIERA_LPP[lpp_index % HIERA_LPP.len()];
    let nb = rng.gen_range(100..=2_000i64);
    // One implanted device per stay.
    let nb_sej = nb;
    let nb_pat = draw_nb_pat(rng, nb_sej);

    row.insert("datasource".to_string(), Value::from("dmi"));
    row.insert("code".to_string(), Value::from(code_lpp));
    row.insert("code_ucd".to_string(), Value::Null);
    row.insert("lib_ucd".to_string(), Value::Null);
    row.insert("atc1".to_string(), Value::Null);
    row.insert("atc2".to_string(), Value::Null);
    row.insert("atc3".to_string(), Value::Null);
    row.insert("atc4".to_string(), Value::Null);
    row.insert("atc5".to_string(), Value::Null);
    row.insert("nb".to_string(), Value::from(nb));
    row.insert("nb_sej".to_string(), Value::from(nb_sej));
    row.insert("nb_pat".to_string(), Value::from(nb_pat));
    row.insert(
        "mnt_remb".to_string(),
        Value::from(round2(rng.gen_range(5_000.0..500_000.0))),
    );
    row.insert(
        "duree_moy_sej".to_string(),
        Value::from(round2(rng.gen_range(2.0..12.0))),
    );
    row.insert(
        "age_moy".to_string(),
        Value::from(round1(rng.gen_range(50.0..80.0))),
    );
    row.insert("code_lpp".to_string(), Value::from(code_lpp));
    row.insert("hiera".to_string(), Value::from(hiera));
    row.insert("hiera_libelle".to_string(), Value::from(hiera_libelle));
    row
}

fn opt_str(value: Option<&str>) -> Value {
    match value {
        Some(value) => Value::from(value),
        None => Value::Null,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> Generator {
        Generator::new(Nomenclature::builtin())
    }

    fn as_i64(row: &Row, key: &str) -> i64 {
        row.get(key)
            .and_then(Value::as_i64)
            .unwrap_or_else(|| panic!("missing integer column {key}"))
    }

    fn as_f64(row: &Row, key: &str) -> f64 {
        row.get(key)
            .and_then(Value::as_f64)
            .unwrap_or_else(|| panic!("missing float column {key}"))
    }

    #[test]
    fn resume_without_var_is_a_single_row() {
        let rows = generator().resume_rows(None, None, false, Some(42)).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains_key("nb_sej"));
        assert!(!rows[0].contains_key("nb_pat"));
    }

    #[test]
    fn resume_without_var_includes_nb_pat_on_request() {
        let rows = generator().resume_rows(None, None, true, Some(42)).unwrap();
        let row = &rows[0];
        assert!(as_i64(row, "nb_pat") <= as_i64(row, "nb_sej"));
    }

    #[test]
    fn resume_cartesian_cardinality() {
        // 8 GHM codes x 3 hospitalization types
        let rows = generator()
            .resume_rows(Some("ghm_typhosp"), None, false, Some(1))
            .unwrap();
        assert_eq!(rows.len(), 24);
        for row in &rows {
            assert!(row.contains_key("ghm"));
            assert!(row.contains_key("typhosp"));
            assert!(as_i64(row, "nb_pat") <= as_i64(row, "nb_sej"));
        }
    }

    #[test]
    fn resume_caps_large_products_at_100() {
        // finess x dp x mois = 7 x 12 x 12 = 1008 combinations
        let rows = generator()
            .resume_rows(Some("finess_dp_mois"), None, false, Some(7))
            .unwrap();
        assert_eq!(rows.len(), MAX_ROWS);
    }

    #[test]
    fn resume_dimension_columns_come_first() {
        let rows = generator()
            .resume_rows(Some("sexe_trancheage"), Some("10_20_30"), false, Some(3))
            .unwrap();
        assert_eq!(rows.len(), 8);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys[0], "sexe");
        assert_eq!(keys[1], "trancheage");
        assert_eq!(keys[2], "nb_sej");
    }

    #[test]
    fn resume_duration_distribution_is_exclusive() {
        let rows = generator()
            .resume_rows(Some("duree"), None, false, Some(11))
            .unwrap();
        assert_eq!(rows.len(), 16);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 2);
            assert_eq!(as_i64(row, "duree"), i as i64);
            assert!(as_i64(row, "nb_sej") >= 100);
        }
    }

    #[test]
    fn resume_duree_combined_with_other_vars_is_not_special() {
        let rows = generator()
            .resume_rows(Some("duree_typhosp"), None, false, Some(11))
            .unwrap();
        assert_eq!(rows.len(), 48);
        assert!(rows[0].contains_key("tx_dc"));
    }

    #[test]
    fn resume_measure_ranges() {
        let rows = generator()
            .resume_rows(Some("ghm"), None, false, Some(5))
            .unwrap();
        for row in &rows {
            let tx_dc = as_f64(row, "tx_dc");
            let tx_male = as_f64(row, "tx_male");
            let age_moy = as_f64(row, "age_moy");
            assert!((0.0..=0.10).contains(&tx_dc));
            assert!((0.0..=1.0).contains(&tx_male));
            assert!((0.0..=120.0).contains(&age_moy));
        }
    }

    #[test]
    fn same_seed_same_rows() {
        let generator = generator();
        let a = generator
            .resume_rows(Some("ghm_mois"), None, false, Some(42))
            .unwrap();
        let b = generator
            .resume_rows(Some("ghm_mois"), None, false, Some(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let generator = generator();
        let a = generator.resume_rows(Some("ghm"), None, false, Some(1)).unwrap();
        let b = generator.resume_rows(Some("ghm"), None, false, Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_var_token_yields_placeholder_rows() {
        let rows = generator()
            .resume_rows(Some("mystere"), None, false, Some(9))
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("mystere"), Some(&Value::from("mystere_val1")));
    }

    #[test]
    fn prec_annee_without_var_is_one_row_per_year() {
        let rows = generator()
            .resume_prec_annee_rows(None, "23", None, Some(4))
            .unwrap();
        assert_eq!(rows.len(), 5);
        let years: Vec<i64> = rows.iter().map(|row| as_i64(row, "annee")).collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);
        for row in &rows {
            assert!(as_i64(row, "nb_pat") <= as_i64(row, "nb_sej"));
        }
    }

    #[test]
    fn prec_annee_crosses_years_with_var() {
        let rows = generator()
            .resume_prec_annee_rows(Some("ghm"), "23", None, Some(4))
            .unwrap();
        // 5 years x 8 GHM codes
        assert_eq!(rows.len(), 40);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys[0], "annee");
        assert_eq!(keys[1], "ghm");
    }

    #[test]
    fn prec_annee_rejects_bad_year() {
        let err = generator()
            .resume_prec_annee_rows(None, "20xx", None, Some(4))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidYear { .. }));
    }

    #[test]
    fn diag_assoc_has_no_patient_count() {
        let rows = generator().diag_assoc_rows(None, Some(6)).unwrap();
        assert_eq!(rows.len(), CIM10.len());
        for row in &rows {
            assert!(row.contains_key("code_diag"));
            assert!(!row.contains_key("nb_pat"));
        }
    }

    #[test]
    fn um_rum_duration_is_a_sub_stay() {
        let rows = generator().um_rows(Some("finess"), Some(8)).unwrap();
        assert_eq!(rows.len(), TYPE_UM.len() * FINESS.len());
        for row in &rows {
            assert!(as_f64(row, "duree_moy_rum") <= as_f64(row, "duree_moy_sej"));
        }
    }

    #[test]
    fn actes_counts_are_consistent() {
        let rows = generator().actes_rows(None, Some(13)).unwrap();
        assert_eq!(rows.len(), CCAM.len());
        for row in &rows {
            assert!(as_i64(row, "nb_sej") <= as_i64(row, "nb_acte"));
            assert!(!row.contains_key("tx_dc"));
            assert!(!row.contains_key("nb_pat"));
        }
    }

    #[test]
    fn dmi_med_mixes_the_two_datasources() {
        let rows = generator().dmi_med_rows(None, Some(21)).unwrap();
        assert_eq!(rows.len(), UCD.len() + LPP.len());

        let med_rows: Vec<&Row> = rows
            .iter()
            .filter(|row| row.get("datasource") == Some(&Value::from("med")))
            .collect();
        let dmi_rows: Vec<&Row> = rows
            .iter()
            .filter(|row| row.get("datasource") == Some(&Value::from("dmi")))
            .collect();
        assert_eq!(med_rows.len(), UCD.len());
        assert_eq!(dmi_rows.len(), LPP.len());

        for row in &med_rows {
            assert!(row.get("lib_ucd").is_some_and(|v| v.is_string()));
            assert!(row.get("atc5").is_some_and(|v| v.is_string()));
            assert_eq!(row.get("code_lpp"), Some(&Value::Null));
            assert_eq!(row.get("hiera"), Some(&Value::Null));
        }
        for row in &dmi_rows {
            assert_eq!(row.get("code_ucd"), Some(&Value::Null));
            assert_eq!(row.get("atc1"), Some(&Value::Null));
            assert!(row.get("hiera_libelle").is_some_and(|v| v.is_string()));
            // one device per stay
            assert_eq!(as_i64(row, "nb_sej"), as_i64(row, "nb"));
        }
    }

    #[test]
    fn dmi_med_crosses_codes_with_var() {
        let rows = generator().dmi_med_rows(Some("typhosp"), Some(21)).unwrap();
        // (5 UCD + 4 LPP) x 3 hospitalization types
        assert_eq!(rows.len(), 27);
        assert!(rows[0].contains_key("typhosp"));
    }

    #[test]
    fn dernier_trans_one_row_per_facility() {
        let rows = generator().dernier_trans_rows("23", Some(2)).unwrap();
        assert_eq!(rows.len(), FINESS.len());
        for row in &rows {
            assert_eq!(as_i64(row, "annee"), 2023);
            let date = row
                .get("derniere_transmission")
                .and_then(Value::as_str)
                .unwrap();
            assert!(date.starts_with("2024-0"));
            let secteur = row.get("secteur").and_then(Value::as_str).unwrap();
            assert!(secteur == "PU" || secteur == "PR");
        }
    }

    #[test]
    fn dernier_trans_rejects_bad_year() {
        assert!(generator().dernier_trans_rows("abc", Some(2)).is_err());
    }

    #[test]
    fn tx_recours_respects_the_geo_level() {
        let generator = generator();
        assert_eq!(generator.tx_recours_rows("dep", Some(3)).len(), DEPARTEMENTS.len());
        assert_eq!(generator.tx_recours_rows("reg", Some(3)).len(), REGIONS.len());
        assert_eq!(generator.tx_recours_rows("zon", Some(3)).len(), ZONES_ARS.len());

        // Unknown level falls back to départements but echoes the request.
        let rows = generator.tx_recours_rows("plop", Some(3));
        assert_eq!(rows.len(), DEPARTEMENTS.len());
        assert_eq!(rows[0].get("typ_geo"), Some(&Value::from("plop")));
    }

    #[test]
    fn tx_recours_patient_rate_stays_below_stay_rate() {
        for row in generator().tx_recours_rows("dep", Some(17)) {
            assert!(as_f64(&row, "tx_recours_brut_pat") <= as_f64(&row, "tx_recours_brut_sej"));
            assert!(as_i64(&row, "nb_pat") <= as_i64(&row, "nb_sej"));
        }
    }

    #[test]
    fn method_a_row_carries_the_sentinel() {
        let rows = generator().resume_petit_effectif_row(Some(1));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(as_i64(row, "nb_sej") < 10);
        assert_eq!(row.get("nb_pat"), Some(&Value::from(PETIT_EFFECTIF)));
    }

    #[test]
    fn method_b_row_is_single_string_column() {
        let rows = petit_effectif_row("code_ccam", "DZQM006");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("code_ccam"), Some(&Value::from("DZQM006")));
    }
}
