use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::catalog::Catalog;
use super::domain::{ChargeItem, Level, Modality};
use super::eligibility::{resolve_campus_requirement, resolve_effective_campus};

/// Choices the form can offer for the current upstream fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOptions {
    pub levels: Vec<Level>,
    pub modalities: Vec<Modality>,
    pub plans: Vec<u32>,
    pub campus_required: bool,
    pub campuses: Vec<String>,
    /// Charge catalog of the effective campus; `None` when it lists no charges.
    pub extras: Option<BTreeMap<String, Vec<ChargeItem>>>,
}

impl SelectionOptions {
    pub fn build(
        catalog: &Catalog,
        level: Option<Level>,
        modality: Option<Modality>,
        campus: Option<&str>,
    ) -> Self {
        let campus_required = match (level, modality) {
            (Some(level), Some(modality)) => resolve_campus_requirement(level, modality),
            _ => false,
        };

        Self {
            levels: available_levels(catalog),
            modalities: level
                .map(|level| available_modalities(catalog, level))
                .unwrap_or_default(),
            plans: match (level, modality) {
                (Some(level), Some(modality)) => available_plans(catalog, level, modality),
                _ => Vec::new(),
            },
            campus_required,
            campuses: match level {
                Some(level) if campus_required => available_campuses(catalog, level),
                _ => Vec::new(),
            },
            extras: match (level, modality) {
                (Some(level), Some(modality)) => {
                    available_extras(catalog, level, modality, campus).cloned()
                }
                _ => None,
            },
        }
    }
}

/// Distinct levels present in the rule table, sorted by name.
pub fn available_levels(catalog: &Catalog) -> Vec<Level> {
    let mut levels: Vec<Level> = catalog
        .rules()
        .iter()
        .map(|rule| rule.level)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    levels.sort_by_key(|level| level.as_str());
    levels
}

/// Modalities offered for a level; health sciences has no hybrid track.
pub fn available_modalities(catalog: &Catalog, level: Level) -> Vec<Modality> {
    let mut modalities: Vec<Modality> = catalog
        .rules()
        .iter()
        .filter(|rule| rule.level == level)
        .map(|rule| rule.modality)
        .filter(|modality| !(level == Level::HealthSciences && *modality == Modality::Hybrid))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    modalities.sort_by_key(|modality| modality.display_rank());
    modalities
}

pub fn available_plans(catalog: &Catalog, level: Level, modality: Modality) -> Vec<u32> {
    catalog
        .rules()
        .iter()
        .filter(|rule| rule.level == level && rule.modality == modality)
        .map(|rule| rule.plan)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Campuses listed for the level's in-person line, sorted.
pub fn available_campuses(catalog: &Catalog, level: Level) -> Vec<String> {
    let Some(key) = level.campus_listing_key() else {
        return Vec::new();
    };

    let mut campuses = catalog.campuses_for_line(key).to_vec();
    campuses.sort();
    campuses
}

/// Charge catalog of the campus pricing the selection, if it lists any.
pub fn available_extras<'a>(
    catalog: &'a Catalog,
    level: Level,
    modality: Modality,
    selected_campus: Option<&str>,
) -> Option<&'a BTreeMap<String, Vec<ChargeItem>>> {
    let campus = resolve_effective_campus(level, modality, selected_campus)?;
    catalog
        .campus(&campus)
        .map(|metadata| &metadata.extra_charges)
        .filter(|charges| !charges.is_empty())
}
