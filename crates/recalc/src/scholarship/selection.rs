use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::Catalog;
use super::domain::{Level, Modality, ProgramType};
use super::eligibility::resolve_effective_campus;

/// Form state for a single calculation.
///
/// The setters mirror how the form cascades: picking an upstream field
/// discards every choice that depended on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub program_type: ProgramType,
    pub level: Option<Level>,
    pub modality: Option<Modality>,
    pub plan: Option<u32>,
    pub campus: Option<String>,
    /// Raw text as typed; a comma is accepted as decimal separator.
    #[serde(deserialize_with = "deserialize_average")]
    pub average: Option<String>,
    pub selected_extras: BTreeSet<String>,
    pub extras_enabled: bool,
}

impl Selection {
    pub fn new(program_type: ProgramType) -> Self {
        Self {
            program_type,
            ..Self::default()
        }
    }

    pub fn set_program_type(&mut self, program_type: ProgramType) {
        self.program_type = program_type;
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = Some(level);
        self.modality = None;
        self.plan = None;
        self.campus = None;
        self.selected_extras.clear();
    }

    pub fn set_modality(&mut self, modality: Modality) {
        self.modality = Some(modality);
        self.plan = None;
        self.campus = None;
        self.selected_extras.clear();
    }

    pub fn set_plan(&mut self, plan: u32) {
        self.plan = Some(plan);
        self.selected_extras.clear();
    }

    pub fn set_campus(&mut self, campus: impl Into<String>) {
        self.campus = Some(campus.into());
        self.selected_extras.clear();
    }

    pub fn set_average(&mut self, average: impl Into<String>) {
        self.average = Some(average.into());
    }

    /// Flip the extras switch. It only turns on when the effective campus
    /// lists charges; either way the current picks are discarded.
    pub fn toggle_extras(&mut self, catalog: &Catalog) -> bool {
        let available = self.has_extras_available(catalog);
        if !self.extras_enabled && !available {
            return false;
        }

        self.extras_enabled = !self.extras_enabled;
        self.selected_extras.clear();
        self.extras_enabled
    }

    /// Select or deselect a charge code; ignored while extras are disabled.
    pub fn toggle_extra_code(&mut self, code: &str) {
        if !self.extras_enabled {
            return;
        }

        if !self.selected_extras.remove(code) {
            self.selected_extras.insert(code.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn has_extras_available(&self, catalog: &Catalog) -> bool {
        let (Some(level), Some(modality)) = (self.level, self.modality) else {
            return false;
        };

        resolve_effective_campus(level, modality, self.campus.as_deref())
            .and_then(|campus| catalog.campus(&campus).map(|metadata| metadata.has_extra_charges()))
            .unwrap_or(false)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAverage {
    Text(String),
    Number(f64),
}

/// API clients may send the average as text or as a JSON number.
fn deserialize_average<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAverage>::deserialize(deserializer)?;
    Ok(raw.map(|average| match average {
        RawAverage::Text(text) => text,
        RawAverage::Number(value) => value.to_string(),
    }))
}
