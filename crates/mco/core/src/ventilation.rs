//! Parsing and resolution of the `var` ventilation parameter.
//!
//! The `var` string is built by clients by joining variable names with `_`.
//! Two compound names (`sexe_trancheage`, `modentprov_modsordest`) contain
//! an underscore themselves and must be recognized whole before any split,
//! so the tokenizer is greedy: it tries the compound names first, longest
//! first, then falls back to cutting at the next separator.

use serde_json::Value;

use crate::error::GeneratorError;
use crate::nomenclature::Nomenclature;

/// Default age-bracket cut points (standard MCO age pyramid).
const DEFAULT_TRANCHEAGE: &[i64] = &[10, 20, 30, 40, 50, 60, 70, 80, 90];

/// One value of a ventilation dimension domain.
///
/// Simple variables carry scalars (`Str` or `Int`); compound variables carry
/// a `Pair`, one element per output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Int(i64),
    Str(String),
    Pair(String, String),
}

impl VarValue {
    /// JSON rendering for single-column dimensions. `Pair` values are never
    /// rendered whole; they are flattened into their two columns.
    pub fn to_json(&self) -> Value {
        match self {
            VarValue::Int(n) => Value::from(*n),
            VarValue::Str(s) => Value::from(s.clone()),
            VarValue::Pair(a, b) => Value::from(format!("{a}_{b}")),
        }
    }
}

/// Split a `var` string into its ordered ventilation tokens.
///
/// Greedy left-to-right scan: at each position every compound name is tried
/// (longest first) against the remaining suffix, matching either the whole
/// suffix or a `name + "_"` prefix. Without a compound match the suffix is
/// cut at the next `_`. Every non-empty input parses to a non-empty token
/// list; there is no error case.
///
/// ```
/// use mco_core::{Nomenclature, parse_var};
///
/// let nomenclature = Nomenclature::builtin();
/// assert_eq!(parse_var(&nomenclature, Some("ghm_mois")), vec!["ghm", "mois"]);
/// assert_eq!(
///     parse_var(&nomenclature, Some("sexe_trancheage_ghm")),
///     vec!["sexe_trancheage", "ghm"]
/// );
/// assert!(parse_var(&nomenclature, None).is_empty());
/// ```
pub fn parse_var(nomenclature: &Nomenclature, var: Option<&str>) -> Vec<String> {
    let Some(var) = var.filter(|v| !v.is_empty()) else {
        return Vec::new();
    };

    let compounds = nomenclature.compound_names();
    let mut tokens = Vec::new();
    let mut remaining = var;

    while !remaining.is_empty() {
        let mut matched = false;

        for compound in &compounds {
            if let Some(rest) = remaining.strip_prefix(compound) {
                // Whole-suffix match, or compound followed by more tokens.
                if rest.is_empty() || rest.starts_with('_') {
                    tokens.push((*compound).to_string());
                    remaining = rest.strip_prefix('_').unwrap_or(rest);
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            match remaining.split_once('_') {
                Some((head, tail)) => {
                    tokens.push(head.to_string());
                    remaining = tail;
                }
                None => {
                    tokens.push(remaining.to_string());
                    remaining = "";
                }
            }
        }
    }

    tokens
}

/// Build age-bracket labels from a `_`-separated list of cut points.
///
/// Produces `len + 1` labels, the last one open-ended:
/// `"10_20_30"` → `["[0-10 ans]", "[11-20 ans]", "[21-30 ans]", "[31 ans et +]"]`.
/// An absent or empty parameter falls back to the standard bounds. A
/// non-integer cut point is the one loud failure of the engine and
/// propagates to the caller.
pub fn parse_trancheage(param: Option<&str>) -> Result<Vec<String>, GeneratorError> {
    let bornes: Vec<i64> = match param.filter(|p| !p.is_empty()) {
        None => DEFAULT_TRANCHEAGE.to_vec(),
        Some(raw) => raw
            .split('_')
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| GeneratorError::InvalidAgeCutpoint { value: part.to_string() })
            })
            .collect::<Result<_, _>>()?,
    };

    let mut labels = Vec::with_capacity(bornes.len() + 1);
    let mut prev = 0;
    for borne in bornes {
        if prev == 0 {
            labels.push(format!("[0-{borne} ans]"));
        } else {
            labels.push(format!("[{}-{borne} ans]", prev + 1));
        }
        prev = borne;
    }
    labels.push(format!("[{} ans et +]", prev + 1));
    Ok(labels)
}

/// Parse the two-digit `annee` parameter into a four-digit year.
///
/// The convention is that all years sit in the 21st century: `"23"` → 2023.
pub fn parse_annee(annee: &str) -> Result<i32, GeneratorError> {
    if annee.len() != 2 || !annee.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GeneratorError::InvalidYear { value: annee.to_string() });
    }
    // Two ASCII digits always parse.
    let short: i32 = annee.parse().map_err(|_| GeneratorError::InvalidYear {
        value: annee.to_string(),
    })?;
    Ok(2000 + short)
}

/// Value domain of one ventilation token.
///
/// Compound tokens expand to the cartesian product of their two constituent
/// domains, materialized as pairs. Unknown tokens degrade to a deterministic
/// three-value placeholder domain instead of failing, so an unrecognized
/// `var` never breaks a client.
pub fn var_values(
    nomenclature: &Nomenclature,
    token: &str,
    trancheage: Option<&str>,
) -> Result<Vec<VarValue>, GeneratorError> {
    match token {
        // Compound: sex x age bracket (age pyramid)
        "sexe_trancheage" => {
            let sexes = nomenclature
                .simple_values("sexe")
                .unwrap_or_default()
                .to_vec();
            let tranches = parse_trancheage(trancheage)?;
            let mut values = Vec::with_capacity(sexes.len() * tranches.len());
            for sexe in &sexes {
                if let VarValue::Str(sexe) = sexe {
                    for tranche in &tranches {
                        values.push(VarValue::Pair(sexe.clone(), tranche.clone()));
                    }
                }
            }
            Ok(values)
        }

        // Compound: entry mode x exit mode (patient pathway)
        "modentprov_modsordest" => {
            let entrees = nomenclature
                .simple_values("modentprov")
                .unwrap_or_default()
                .to_vec();
            let sorties = nomenclature
                .simple_values("modsordest")
                .unwrap_or_default()
                .to_vec();
            let mut values = Vec::with_capacity(entrees.len() * sorties.len());
            for entree in &entrees {
                if let VarValue::Str(entree) = entree {
                    for sortie in &sorties {
                        if let VarValue::Str(sortie) = sortie {
                            values.push(VarValue::Pair(entree.clone(), sortie.clone()));
                        }
                    }
                }
            }
            Ok(values)
        }

        // Standalone age bracket (no sex split)
        "trancheage" => Ok(parse_trancheage(trancheage)?
            .into_iter()
            .map(VarValue::Str)
            .collect()),

        _ => {
            if let Some(values) = nomenclature.simple_values(token) {
                return Ok(values.to_vec());
            }
            // Unknown variable: generic values so the request still succeeds.
            Ok((1..=3)
                .map(|i| VarValue::Str(format!("{token}_val{i}")))
                .collect())
        }
    }
}

/// Output column names contributed by one ventilation token.
///
/// Compound tokens contribute two columns; simple tokens one, named after
/// the token itself.
pub fn var_columns(token: &str) -> Vec<String> {
    match token {
        "sexe_trancheage" => vec!["sexe".to_string(), "trancheage".to_string()],
        "modentprov_modsordest" => {
            vec!["modentprov".to_string(), "modsordest".to_string()]
        }
        _ => vec![token.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nomenclature() -> Nomenclature {
        Nomenclature::builtin()
    }

    #[test]
    fn parse_var_empty_and_absent() {
        let n = nomenclature();
        assert!(parse_var(&n, None).is_empty());
        assert!(parse_var(&n, Some("")).is_empty());
    }

    #[test]
    fn parse_var_single_and_multiple_tokens() {
        let n = nomenclature();
        assert_eq!(parse_var(&n, Some("ghm")), vec!["ghm"]);
        assert_eq!(parse_var(&n, Some("ghm_mois")), vec!["ghm", "mois"]);
        assert_eq!(
            parse_var(&n, Some("finess_dp_mois")),
            vec!["finess", "dp", "mois"]
        );
    }

    #[test]
    fn compound_takes_precedence_over_split() {
        let n = nomenclature();
        assert_eq!(parse_var(&n, Some("sexe_trancheage")), vec!["sexe_trancheage"]);
        assert_eq!(
            parse_var(&n, Some("sexe_trancheage_ghm")),
            vec!["sexe_trancheage", "ghm"]
        );
        assert_eq!(
            parse_var(&n, Some("ghm_sexe_trancheage")),
            vec!["ghm", "sexe_trancheage"]
        );
        assert_eq!(
            parse_var(&n, Some("modentprov_modsordest")),
            vec!["modentprov_modsordest"]
        );
    }

    #[test]
    fn compound_prefix_alone_stays_simple() {
        let n = nomenclature();
        // "sexe" followed by something that is not "trancheage" must split.
        assert_eq!(parse_var(&n, Some("sexe_ghm")), vec!["sexe", "ghm"]);
        assert_eq!(parse_var(&n, Some("modentprov")), vec!["modentprov"]);
    }

    #[test]
    fn unknown_tokens_still_parse() {
        let n = nomenclature();
        assert_eq!(parse_var(&n, Some("foo_bar")), vec!["foo", "bar"]);
    }

    #[test]
    fn trancheage_custom_bounds() {
        let labels = parse_trancheage(Some("10_20_30")).unwrap();
        assert_eq!(
            labels,
            vec!["[0-10 ans]", "[11-20 ans]", "[21-30 ans]", "[31 ans et +]"]
        );
    }

    #[test]
    fn trancheage_default_bounds() {
        let labels = parse_trancheage(None).unwrap();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.first().unwrap(), "[0-10 ans]");
        assert_eq!(labels.last().unwrap(), "[91 ans et +]");
    }

    #[test]
    fn trancheage_rejects_non_integer_bounds() {
        let err = parse_trancheage(Some("10_abc_30")).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidAgeCutpoint { .. }));
    }

    #[test]
    fn annee_two_digits_only() {
        assert_eq!(parse_annee("23").unwrap(), 2023);
        assert_eq!(parse_annee("05").unwrap(), 2005);
        assert!(parse_annee("2023").is_err());
        assert!(parse_annee("ab").is_err());
        assert!(parse_annee("").is_err());
    }

    #[test]
    fn sexe_trancheage_domain_is_a_product() {
        let n = nomenclature();
        let values = var_values(&n, "sexe_trancheage", Some("10_20_30")).unwrap();
        // 2 sexes x 4 brackets
        assert_eq!(values.len(), 8);
        assert_eq!(
            values[0],
            VarValue::Pair("1".to_string(), "[0-10 ans]".to_string())
        );
    }

    #[test]
    fn pathway_compound_domain_is_a_product() {
        let n = nomenclature();
        let values = var_values(&n, "modentprov_modsordest", None).unwrap();
        assert_eq!(values.len(), 16);
    }

    #[test]
    fn unknown_token_gets_placeholder_domain() {
        let n = nomenclature();
        let values = var_values(&n, "mystere", None).unwrap();
        assert_eq!(
            values,
            vec![
                VarValue::Str("mystere_val1".to_string()),
                VarValue::Str("mystere_val2".to_string()),
                VarValue::Str("mystere_val3".to_string()),
            ]
        );
    }

    #[test]
    fn columns_per_token() {
        assert_eq!(var_columns("ghm"), vec!["ghm"]);
        assert_eq!(var_columns("sexe_trancheage"), vec!["sexe", "trancheage"]);
        assert_eq!(
            var_columns("modentprov_modsordest"),
            vec!["modentprov", "modsordest"]
        );
    }
}
