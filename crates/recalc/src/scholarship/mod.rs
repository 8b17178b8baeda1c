//! Scholarship pricing: rule matching, list-price derivation, and extras.
//!
//! Everything below the service is a pure function of a [`Selection`] and the
//! shared [`Catalog`]; no derived state survives between calculations.

pub mod calculator;
pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod extras;
pub mod matcher;
pub mod options;
pub mod pricing;
pub mod router;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use calculator::{calculate, Calculation, CalculationError, CalculationState, Quote};
pub use catalog::{CampusDirectory, Catalog, CatalogError};
pub use domain::{
    AverageRange, CampusKey, CampusMetadata, ChargeItem, Level, Modality, Offering,
    ParseChoiceError, ProgramType, Rule, Tier,
};
pub use eligibility::{
    resolve_campus_requirement, resolve_effective_campus, resolve_tier, Eligibility,
};
pub use extras::compute_extras;
pub use matcher::{match_rule, MatchReport, MatchStage, RuleCriteria};
pub use options::SelectionOptions;
pub use pricing::{derive_final_price, derive_list_price};
pub use router::scholarship_router;
pub use selection::Selection;
pub use service::ScholarshipService;
