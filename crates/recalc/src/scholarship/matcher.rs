use serde::Serialize;

use super::domain::{Level, Modality, ProgramType, Rule, Tier};

/// Inputs the matcher filters the rule table by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleCriteria {
    pub program_type: ProgramType,
    pub level: Level,
    pub modality: Modality,
    pub plan: u32,
    /// Only set when a campus was required and its tier resolved.
    pub tier: Option<Tier>,
    /// Already rounded to one decimal place.
    pub average: f64,
}

/// Filtering stage, in the order stages are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    ProgramType,
    Level,
    Modality,
    Plan,
    Tier,
    AverageRange,
}

impl MatchStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProgramType => "program type",
            Self::Level => "level",
            Self::Modality => "modality",
            Self::Plan => "plan",
            Self::Tier => "tier",
            Self::AverageRange => "average range",
        }
    }
}

/// Matcher result including the stage that emptied the candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchReport<'a> {
    pub rule: Option<&'a Rule>,
    pub eliminated_at: Option<MatchStage>,
    /// Candidates remaining before the average range was checked.
    pub candidates: usize,
}

/// First rule (in table order) satisfying every criterion.
pub fn match_rule<'a>(rules: &'a [Rule], criteria: &RuleCriteria) -> Option<&'a Rule> {
    diagnose(rules, criteria).rule
}

pub fn diagnose<'a>(rules: &'a [Rule], criteria: &RuleCriteria) -> MatchReport<'a> {
    let candidates = match filter_candidates(rules, criteria) {
        Ok(candidates) => candidates,
        Err(stage) => {
            return MatchReport {
                rule: None,
                eliminated_at: Some(stage),
                candidates: 0,
            }
        }
    };

    let remaining = candidates.len();
    let rule = candidates
        .into_iter()
        .find(|rule| rule.average_range.contains(criteria.average));

    MatchReport {
        rule,
        eliminated_at: rule.is_none().then_some(MatchStage::AverageRange),
        candidates: remaining,
    }
}

fn filter_candidates<'a>(
    rules: &'a [Rule],
    criteria: &RuleCriteria,
) -> Result<Vec<&'a Rule>, MatchStage> {
    let mut candidates: Vec<&Rule> = rules.iter().collect();

    narrow(&mut candidates, MatchStage::ProgramType, |rule| {
        rule.program_type == criteria.program_type
    })?;
    narrow(&mut candidates, MatchStage::Level, |rule| {
        rule.level == criteria.level
    })?;
    narrow(&mut candidates, MatchStage::Modality, |rule| {
        rule.modality == criteria.modality
    })?;
    narrow(&mut candidates, MatchStage::Plan, |rule| {
        rule.plan == criteria.plan
    })?;
    if let Some(tier) = criteria.tier {
        narrow(&mut candidates, MatchStage::Tier, |rule| {
            rule.tier == Some(tier)
        })?;
    }

    Ok(candidates)
}

fn narrow(
    candidates: &mut Vec<&Rule>,
    stage: MatchStage,
    keep: impl Fn(&Rule) -> bool,
) -> Result<(), MatchStage> {
    candidates.retain(|rule| keep(rule));
    if candidates.is_empty() {
        Err(stage)
    } else {
        Ok(())
    }
}

/// Rule used to back-derive a list price: ignores program type and average.
pub fn reference_rule(
    rules: &[Rule],
    level: Level,
    modality: Modality,
    plan: u32,
    tier: Option<Tier>,
) -> Option<&Rule> {
    rules.iter().find(|rule| {
        rule.level == level
            && rule.modality == modality
            && rule.plan == plan
            && tier.map_or(true, |tier| rule.tier == Some(tier))
    })
}
