use super::catalog::Catalog;
use super::domain::{CampusKey, Level, Modality, ProgramType, Rule, Tier};
use super::matcher::reference_rule;

/// Highest discount a returning student can receive.
pub const RETURNING_DISCOUNT_CAP: f64 = 25.0;

/// Monetary rounding to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Averages are matched at one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Net price published for the campus, if the metadata carries one.
pub fn authoritative_list_price(
    catalog: &Catalog,
    campus: Option<&CampusKey>,
    level: Level,
    plan: u32,
) -> Option<f64> {
    campus
        .and_then(|campus| catalog.offering(campus, level, plan))
        .map(|offering| round2(offering.net_price))
        .filter(|price| *price >= 0.0)
}

/// `net / (1 - discount)`; undefined once the discount reaches 100%.
pub fn back_derive_list_price(rule: &Rule) -> Option<f64> {
    if rule.discount_percent >= 100.0 {
        return None;
    }

    let list = rule.net_amount / (1.0 - rule.discount_percent / 100.0);
    Some(round2(list)).filter(|price| *price >= 0.0)
}

/// Undiscounted monthly tuition for a selection, independent of the average.
///
/// Prefers the campus offering; otherwise back-derives from the first rule
/// with the same level, modality, plan and (when given) tier.
pub fn derive_list_price(
    catalog: &Catalog,
    level: Level,
    modality: Modality,
    plan: u32,
    campus: Option<&CampusKey>,
    tier: Option<Tier>,
) -> Option<f64> {
    authoritative_list_price(catalog, campus, level, plan).or_else(|| {
        reference_rule(catalog.rules(), level, modality, plan, tier)
            .and_then(back_derive_list_price)
    })
}

/// Discount actually granted for a rule's raw percentage.
pub fn applied_discount(program_type: ProgramType, raw_percent: f64) -> f64 {
    if program_type.is_returning() {
        raw_percent.min(RETURNING_DISCOUNT_CAP)
    } else {
        raw_percent
    }
}

/// Round the base with extras first, then apply the discount.
pub fn derive_final_price(base: f64, discount_percent: f64, extras: f64) -> f64 {
    let base_with_extras = round2(base + extras);
    round2(base_with_extras * (1.0 - discount_percent / 100.0))
}
