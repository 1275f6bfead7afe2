// Matching engine: skill taxonomy, boundary-safe skill detection, keyword coverage,
// gap analysis, semantic similarity and the hybrid blend, plus course suggestions.
// Everything here is transport-agnostic except `handlers`.

pub mod courses;
pub mod coverage;
pub mod engine;
pub mod extraction;
pub mod handlers;
pub mod matcher;
pub mod semantic;
pub mod taxonomy;

#[cfg(test)]
pub(crate) mod testing;
