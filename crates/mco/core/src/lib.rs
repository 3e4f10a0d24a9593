//! Ventilation engine for the mock MCO activity API.
//!
//! This crate holds everything with actual behavior behind the mock
//! endpoints:
//! - the dimension registry ([`Nomenclature`]): static PMSI nomenclatures and
//!   the value domain of every ventilation variable;
//! - the `var` tokenizer and value resolver ([`ventilation`]);
//! - the row synthesizer ([`Generator`]): cartesian expansion of the
//!   requested dimensions plus one measure-drawing policy per endpoint.
//!
//! The engine is synchronous and stateless: each generation call builds its
//! own seeded random stream and only reads the immutable registry, so it can
//! be shared freely across concurrent request handlers.

pub mod error;
pub mod generate;
pub mod nomenclature;
pub mod ventilation;

pub use error::GeneratorError;
pub use generate::{petit_effectif_row, Generator, Row, MAX_ROWS, PETIT_EFFECTIF};
pub use nomenclature::Nomenclature;
pub use ventilation::{parse_annee, parse_trancheage, parse_var, VarValue};
