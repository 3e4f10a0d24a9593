//! Property tests: the `var` tokenizer round-trips and never fails.

use mco_core::{parse_var, Nomenclature};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ventilation names a client can legitimately put in a `var` string.
const KNOWN_NAMES: &[&str] = &[
    "ghm",
    "mois",
    "sexe",
    "typhosp",
    "finess",
    "dp",
    "dr",
    "cmd",
    "duree",
    "trancheage",
    "modentprov",
    "modsordest",
    "sexe_trancheage",
    "modentprov_modsordest",
];

/// Generate a random known ventilation name.
fn arb_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(KNOWN_NAMES)
}

/// Two adjacent simple tokens can spell a compound name ("sexe" then
/// "trancheage" joins to "sexe_trancheage"); the greedy parser then returns
/// the compound, by design. Such sequences are excluded from the round-trip
/// property.
fn rebuilds_a_compound(tokens: &[&str]) -> bool {
    tokens.windows(2).any(|pair| {
        (pair[0] == "sexe" && pair[1].starts_with("trancheage"))
            || (pair[0] == "modentprov" && pair[1].starts_with("modsordest"))
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Joining any sequence of known names with '_' and re-parsing yields the
    /// original sequence, unless adjacency legitimately re-forms a compound.
    #[test]
    fn parse_round_trips_known_token_sequences(
        tokens in prop::collection::vec(arb_name(), 1..6)
            .prop_filter("adjacency rebuilds a compound", |tokens| {
                !rebuilds_a_compound(tokens)
            })
    ) {
        let nomenclature = Nomenclature::builtin();
        let joined = tokens.join("_");
        prop_assert_eq!(parse_var(&nomenclature, Some(&joined)), tokens);
    }

    /// The parser is total: any string yields a token list, and re-joining
    /// that list parses to the same tokens (idempotence). Inputs with doubled
    /// or edge underscores produce empty tokens that a join cannot represent,
    /// so idempotence is only claimed when every token is non-empty.
    #[test]
    fn parse_is_total_and_idempotent(input in "[a-z_]{0,30}") {
        let nomenclature = Nomenclature::builtin();
        let tokens = parse_var(&nomenclature, Some(&input));
        if !input.is_empty() {
            prop_assert!(!tokens.is_empty());
        }
        if tokens.iter().all(|t| !t.is_empty()) {
            let rejoined = tokens.join("_");
            prop_assert_eq!(parse_var(&nomenclature, Some(&rejoined)), tokens);
        }
    }

    /// A compound name is always matched whole, wherever it sits in the
    /// sequence.
    #[test]
    fn compounds_never_split(prefix in prop::sample::select(&["", "ghm_", "mois_ghm_"][..])) {
        let nomenclature = Nomenclature::builtin();
        let input = format!("{prefix}sexe_trancheage");
        let tokens = parse_var(&nomenclature, Some(&input));
        prop_assert_eq!(tokens.last().map(String::as_str), Some("sexe_trancheage"));
        prop_assert!(!tokens.iter().any(|t| t == "trancheage"));
    }
}
