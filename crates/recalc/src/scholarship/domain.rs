use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tolerance applied to both bounds of an average range.
pub const AVERAGE_EPSILON: f64 = 1e-6;

/// Business line a rule or selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Undergraduate,
    HealthSciences,
    Graduate,
    HighSchool,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::HealthSciences => "health_sciences",
            Self::Graduate => "graduate",
            Self::HighSchool => "high_school",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Undergraduate => "Undergraduate",
            Self::HealthSciences => "Health Sciences",
            Self::Graduate => "Graduate",
            Self::HighSchool => "High School",
        }
    }

    /// Lines whose in-person and hybrid offerings are priced per campus.
    pub const fn is_campus_bound(self) -> bool {
        matches!(
            self,
            Self::Undergraduate | Self::HealthSciences | Self::HighSchool
        )
    }

    /// Key into the campus listing of the metadata table.
    pub const fn campus_listing_key(self) -> Option<&'static str> {
        match self {
            Self::Undergraduate => Some("undergraduate_in_person_hybrid"),
            Self::HealthSciences => Some("health_sciences_in_person"),
            Self::HighSchool => Some("high_school_in_person_hybrid"),
            Self::Graduate => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_choice(value).as_str() {
            "undergraduate" => Ok(Self::Undergraduate),
            "health_sciences" => Ok(Self::HealthSciences),
            "graduate" => Ok(Self::Graduate),
            "high_school" => Ok(Self::HighSchool),
            _ => Err(ParseChoiceError::new("level", value)),
        }
    }
}

/// Delivery format of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    InPerson,
    Online,
    Hybrid,
}

impl Modality {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InPerson => "in_person",
            Self::Online => "online",
            Self::Hybrid => "hybrid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InPerson => "In person",
            Self::Online => "Online",
            Self::Hybrid => "Hybrid",
        }
    }

    /// Position used when presenting modalities: in-person, hybrid, online.
    pub const fn display_rank(self) -> u8 {
        match self {
            Self::InPerson => 0,
            Self::Hybrid => 1,
            Self::Online => 2,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_choice(value).as_str() {
            "in_person" => Ok(Self::InPerson),
            "online" => Ok(Self::Online),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ParseChoiceError::new("modality", value)),
        }
    }
}

/// Campus classification bucket used by tier-specific rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    T1,
    T2,
    T3,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        };
        f.write_str(label)
    }
}

/// New-entry vs returning student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    #[default]
    NewEntry,
    Returning,
}

impl ProgramType {
    pub const fn is_returning(self) -> bool {
        matches!(self, Self::Returning)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewEntry => "New entry",
            Self::Returning => "Returning",
        }
    }
}

impl FromStr for ProgramType {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_choice(value).as_str() {
            "new_entry" | "new" => Ok(Self::NewEntry),
            "returning" => Ok(Self::Returning),
            _ => Err(ParseChoiceError::new("program type", value)),
        }
    }
}

/// Raised when a textual choice does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'")]
pub struct ParseChoiceError {
    field: &'static str,
    value: String,
}

impl ParseChoiceError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

fn normalize_choice(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Inclusive bounds on the qualifying academic average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageRange {
    pub min: f64,
    pub max: f64,
}

impl AverageRange {
    pub fn contains(&self, average: f64) -> bool {
        average >= self.min - AVERAGE_EPSILON && average <= self.max + AVERAGE_EPSILON
    }
}

/// A single pricing line from the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub level: Level,
    pub modality: Modality,
    pub plan: u32,
    #[serde(default)]
    pub tier: Option<Tier>,
    pub average_range: AverageRange,
    pub discount_percent: f64,
    pub net_amount: f64,
    pub program_type: ProgramType,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Identifier of a campus entry in the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampusKey(pub String);

impl CampusKey {
    /// Sentinel entry holding modality-based defaults for online programs.
    pub const ONLINE: &'static str = "ONLINE";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn online() -> Self {
        Self(Self::ONLINE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authoritative list price for one (level, plan) at a campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub net_price: f64,
    #[serde(default)]
    pub available_discounts: BTreeMap<String, f64>,
}

/// Optional charge a returning student may add before discounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeItem {
    pub code: String,
    pub description: String,
    pub amount: f64,
}

/// Per-campus tier, authoritative offerings, and charge catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusMetadata {
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub offerings: BTreeMap<Level, BTreeMap<String, Offering>>,
    #[serde(default)]
    pub extra_charges: BTreeMap<String, Vec<ChargeItem>>,
}

impl CampusMetadata {
    pub fn offering(&self, level: Level, plan: u32) -> Option<&Offering> {
        self.offerings
            .get(&level)
            .and_then(|plans| plans.get(&plan.to_string()))
    }

    pub fn has_extra_charges(&self) -> bool {
        !self.extra_charges.is_empty()
    }
}
