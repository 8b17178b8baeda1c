use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::Catalog;
use super::domain::{CampusKey, Level, Modality, ProgramType, Rule, Tier};
use super::eligibility::Eligibility;
use super::extras::compute_extras;
use super::matcher::{diagnose, MatchReport, MatchStage, RuleCriteria};
use super::pricing::{
    applied_discount, authoritative_list_price, back_derive_list_price, derive_final_price,
    round1,
};
use super::selection::Selection;

/// Upper bound of the grading scale.
pub const MAX_AVERAGE: f64 = 10.0;

/// User-facing reasons a calculation stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum CalculationError {
    #[error("Complete the level, modality and study plan.")]
    IncompleteSelection,
    #[error("Select a campus for this business line.")]
    CampusRequired,
    #[error("Enter the student's average.")]
    AverageRequired,
    #[error("Enter a valid average between 0 and 10.")]
    InvalidAverage,
    #[error("No tier was found for the selected campus.")]
    TierNotFound,
    #[error("No price was found for that combination of data, program and average.")]
    NoRuleFound,
    #[error("The list price could not be calculated for this combination.")]
    ListPriceUnavailable,
}

impl CalculationError {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IncompleteSelection => "incomplete_selection",
            Self::CampusRequired => "campus_required",
            Self::AverageRequired => "average_required",
            Self::InvalidAverage => "invalid_average",
            Self::TierNotFound => "tier_not_found",
            Self::NoRuleFound => "no_rule_found",
            Self::ListPriceUnavailable => "list_price_unavailable",
        }
    }
}

/// Successful calculation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub discount_percent_applied: f64,
    pub final_monthly_amount: f64,
    pub list_price: f64,
    pub extras_total: f64,
}

/// Progress of a calculation; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationState {
    Idle,
    Validating,
    Resolving,
    Matched,
    Priced,
    Done(Quote),
    Failed(CalculationError),
}

impl CalculationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }
}

/// Selection after validation: every field needed downstream is present.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedSelection {
    pub program_type: ProgramType,
    pub level: Level,
    pub modality: Modality,
    pub plan: u32,
    pub campus: Option<CampusKey>,
    pub tier: Option<Tier>,
    pub average: f64,
}

impl ValidatedSelection {
    pub(crate) fn criteria(&self) -> RuleCriteria {
        RuleCriteria {
            program_type: self.program_type,
            level: self.level,
            modality: self.modality,
            plan: self.plan,
            tier: self.tier,
            average: self.average,
        }
    }
}

/// Runs one selection through validation, rule resolution and pricing.
///
/// The state is reset on every run; nothing but the catalog reference is
/// kept between runs.
pub struct Calculation<'a> {
    catalog: &'a Catalog,
    state: CalculationState,
    history: Vec<CalculationState>,
}

impl<'a> Calculation<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            state: CalculationState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    /// States visited during the last run, in order, ending with the terminal one.
    pub fn history(&self) -> &[CalculationState] {
        &self.history
    }

    pub fn run(&mut self, selection: &Selection) -> Result<Quote, CalculationError> {
        self.history.clear();
        self.transition(CalculationState::Idle);

        match self.execute(selection) {
            Ok(quote) => {
                self.transition(CalculationState::Done(quote));
                Ok(quote)
            }
            Err(error) => {
                self.transition(CalculationState::Failed(error.clone()));
                Err(error)
            }
        }
    }

    fn execute(&mut self, selection: &Selection) -> Result<Quote, CalculationError> {
        self.transition(CalculationState::Validating);
        let validated = validate(self.catalog, selection)?;

        self.transition(CalculationState::Resolving);
        let report = resolve_rule(self.catalog, &validated);
        let Some(rule) = report.rule else {
            debug!(
                eliminated_at = report.eliminated_at.map(MatchStage::label),
                candidates = report.candidates,
                level = %validated.level,
                modality = %validated.modality,
                plan = validated.plan,
                "no scholarship rule matched"
            );
            return Err(CalculationError::NoRuleFound);
        };

        self.transition(CalculationState::Matched);
        let quote = price(self.catalog, selection, &validated, rule)?;

        self.transition(CalculationState::Priced);
        Ok(quote)
    }

    fn transition(&mut self, next: CalculationState) {
        self.history.push(next.clone());
        self.state = next;
    }
}

/// Stateless entry point used by the service and router.
pub fn calculate(selection: &Selection, catalog: &Catalog) -> Result<Quote, CalculationError> {
    Calculation::new(catalog).run(selection)
}

/// Checks run in order; the first failure wins.
pub(crate) fn validate(
    catalog: &Catalog,
    selection: &Selection,
) -> Result<ValidatedSelection, CalculationError> {
    let (Some(level), Some(modality), Some(plan)) =
        (selection.level, selection.modality, selection.plan)
    else {
        return Err(CalculationError::IncompleteSelection);
    };

    let eligibility = Eligibility::resolve(catalog, level, modality, selection.campus.as_deref());
    if eligibility.campus_required && eligibility.campus.is_none() {
        return Err(CalculationError::CampusRequired);
    }

    let raw_average = selection
        .average
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(CalculationError::AverageRequired)?;
    let average = parse_average(raw_average)?;

    if eligibility.campus_required && eligibility.tier.is_none() {
        return Err(CalculationError::TierNotFound);
    }

    Ok(ValidatedSelection {
        program_type: selection.program_type,
        level,
        modality,
        plan,
        campus: eligibility.campus,
        tier: eligibility.tier,
        average,
    })
}

/// Parse an average in (0, 10] and round it to one decimal place.
pub fn parse_average(raw: &str) -> Result<f64, CalculationError> {
    let value: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| CalculationError::InvalidAverage)?;

    if value.is_nan() || value <= 0.0 || value > MAX_AVERAGE {
        return Err(CalculationError::InvalidAverage);
    }

    Ok(round1(value))
}

pub(crate) fn resolve_rule<'c>(
    catalog: &'c Catalog,
    validated: &ValidatedSelection,
) -> MatchReport<'c> {
    diagnose(catalog.rules(), &validated.criteria())
}

fn price(
    catalog: &Catalog,
    selection: &Selection,
    validated: &ValidatedSelection,
    rule: &Rule,
) -> Result<Quote, CalculationError> {
    let list_price = authoritative_list_price(
        catalog,
        validated.campus.as_ref(),
        validated.level,
        validated.plan,
    )
    .or_else(|| back_derive_list_price(rule))
    .ok_or(CalculationError::ListPriceUnavailable)?;

    let extras_total = compute_extras(
        catalog,
        validated.campus.as_ref(),
        &selection.selected_extras,
        selection.extras_enabled,
        validated.program_type,
    );

    let discount_percent_applied = applied_discount(validated.program_type, rule.discount_percent);
    let final_monthly_amount =
        derive_final_price(list_price, discount_percent_applied, extras_total);

    Ok(Quote {
        discount_percent_applied,
        final_monthly_amount,
        list_price,
        extras_total,
    })
}
