use super::catalog::Catalog;
use super::domain::{CampusKey, Level, Modality, Tier};

/// A campus must be chosen for campus-bound lines unless the program is online.
pub fn resolve_campus_requirement(level: Level, modality: Modality) -> bool {
    level.is_campus_bound() && modality != Modality::Online
}

/// Campus whose metadata prices the selection.
///
/// Online programs always use the `ONLINE` sentinel. Lines that do not require a
/// campus resolve to `None` even if one was picked earlier in the form.
pub fn resolve_effective_campus(
    level: Level,
    modality: Modality,
    selected_campus: Option<&str>,
) -> Option<CampusKey> {
    if modality == Modality::Online {
        return Some(CampusKey::online());
    }

    if !resolve_campus_requirement(level, modality) {
        return None;
    }

    selected_campus
        .map(str::trim)
        .filter(|campus| !campus.is_empty())
        .map(CampusKey::new)
}

/// Soft lookup: an unknown campus or one without a classification yields `None`.
pub fn resolve_tier(catalog: &Catalog, campus: &CampusKey) -> Option<Tier> {
    catalog.campus(campus).and_then(|metadata| metadata.tier)
}

/// Everything the resolver derives from (level, modality, campus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub campus_required: bool,
    pub campus: Option<CampusKey>,
    /// Only resolved when a campus is required.
    pub tier: Option<Tier>,
}

impl Eligibility {
    pub fn resolve(
        catalog: &Catalog,
        level: Level,
        modality: Modality,
        selected_campus: Option<&str>,
    ) -> Self {
        let campus_required = resolve_campus_requirement(level, modality);
        let campus = resolve_effective_campus(level, modality, selected_campus);
        let tier = if campus_required {
            campus
                .as_ref()
                .and_then(|campus| resolve_tier(catalog, campus))
        } else {
            None
        };

        Self {
            campus_required,
            campus,
            tier,
        }
    }
}
