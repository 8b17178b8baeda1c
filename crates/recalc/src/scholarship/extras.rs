use std::collections::BTreeSet;

use super::catalog::Catalog;
use super::domain::{CampusKey, ProgramType};
use super::pricing::round2;

/// Sum of the selected optional charges for a returning student.
///
/// Codes the campus does not list are ignored so selections made before a
/// campus change do not fail the calculation.
pub fn compute_extras(
    catalog: &Catalog,
    campus: Option<&CampusKey>,
    selected_codes: &BTreeSet<String>,
    enabled: bool,
    program_type: ProgramType,
) -> f64 {
    if !program_type.is_returning() || !enabled {
        return 0.0;
    }

    let Some(metadata) = campus.and_then(|campus| catalog.campus(campus)) else {
        return 0.0;
    };

    let total: f64 = metadata
        .extra_charges
        .values()
        .flatten()
        .filter(|item| selected_codes.contains(&item.code))
        .map(|item| item.amount)
        .sum();

    round2(total)
}
