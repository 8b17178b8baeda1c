use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    AverageRange, CampusKey, CampusMetadata, Level, Modality, Offering, ProgramType, Rule, Tier,
};

/// Errors raised while loading the reference tables.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Campus metadata table as supplied by the data export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusDirectory {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub campuses_by_line: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub campuses: HashMap<String, CampusMetadata>,
}

/// Immutable reference data shared by every calculation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: Vec<Rule>,
    directory: CampusDirectory,
}

impl Catalog {
    /// Rules keep the order they were supplied in; matching depends on it.
    pub fn new(rules: Vec<Rule>, directory: CampusDirectory) -> Self {
        Self { rules, directory }
    }

    /// Load rules (JSON or CSV by extension) and the campus metadata JSON.
    pub fn load(
        rules_path: impl AsRef<Path>,
        campus_meta_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let rules_path = rules_path.as_ref();
        let campus_meta_path = campus_meta_path.as_ref();

        let rules = load_rules(rules_path)?;
        let directory = load_directory(campus_meta_path)?;

        info!(
            rules = rules.len(),
            campuses = directory.campuses.len(),
            version = directory.version.as_deref().unwrap_or("unversioned"),
            "scholarship catalog loaded"
        );

        Ok(Self::new(rules, directory))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn version(&self) -> Option<&str> {
        self.directory.version.as_deref()
    }

    pub fn campus(&self, key: &CampusKey) -> Option<&CampusMetadata> {
        self.directory.campuses.get(key.as_str())
    }

    pub fn offering(&self, key: &CampusKey, level: Level, plan: u32) -> Option<&Offering> {
        self.campus(key)
            .and_then(|campus| campus.offering(level, plan))
    }

    pub fn campuses_for_line(&self, listing_key: &str) -> &[String] {
        self.directory
            .campuses_by_line
            .get(listing_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CatalogError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn load_rules(path: &Path) -> Result<Vec<Rule>, CatalogError> {
    let reader = open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        parse_rules_csv(reader).map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_reader(reader).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn load_directory(path: &Path) -> Result<CampusDirectory, CatalogError> {
    let reader = open(path)?;
    serde_json::from_reader(reader).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the flat CSV export of the rule table, preserving row order.
pub fn parse_rules_csv<R: Read>(reader: R) -> Result<Vec<Rule>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<RuleRow>()
        .map(|row| row.map(Rule::from))
        .collect()
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    level: Level,
    modality: Modality,
    plan: u32,
    tier: Option<Tier>,
    min: f64,
    max: f64,
    discount_percent: f64,
    net_amount: f64,
    program_type: ProgramType,
    origin: Option<String>,
}

impl From<RuleRow> for Rule {
    fn from(row: RuleRow) -> Self {
        Rule {
            level: row.level,
            modality: row.modality,
            plan: row.plan,
            tier: row.tier,
            average_range: AverageRange {
                min: row.min,
                max: row.max,
            },
            discount_percent: row.discount_percent,
            net_amount: row.net_amount,
            program_type: row.program_type,
            origin: row.origin.filter(|origin| !origin.is_empty()),
        }
    }
}
