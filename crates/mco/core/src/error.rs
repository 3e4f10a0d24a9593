//! Error types for the ventilation engine.

use thiserror::Error;

/// Failures while interpreting request-derived parameters.
///
/// The engine is deliberately total for ventilation input: unknown `var`
/// tokens fall back to placeholder domains and an absent `var` yields the
/// aggregated single-row case. Only the two parameters below can fail, and
/// both are caller-input problems the HTTP layer maps to a 400.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A `trancheage` cut-point was not an integer
    #[error("invalid age cut-point '{value}' in trancheage parameter")]
    InvalidAgeCutpoint { value: String },

    /// The `annee` parameter was not a two-digit year
    #[error("invalid annee parameter '{value}': expected two digits")]
    InvalidYear { value: String },
}
