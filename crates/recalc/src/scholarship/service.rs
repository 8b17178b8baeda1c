use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::calculator::{calculate, CalculationError, Quote};
use super::catalog::Catalog;
use super::domain::{CampusKey, ChargeItem, Level, Modality};
use super::eligibility::Eligibility;
use super::options::SelectionOptions;
use super::pricing::derive_list_price;
use super::selection::Selection;

/// Facade over the shared catalog used by the HTTP router and the CLI.
#[derive(Debug, Clone)]
pub struct ScholarshipService {
    catalog: Arc<Catalog>,
}

impl ScholarshipService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a full calculation for the selection.
    pub fn calculate(&self, selection: &Selection) -> Result<Quote, CalculationError> {
        match calculate(selection, &self.catalog) {
            Ok(quote) => {
                info!(
                    level = ?selection.level,
                    modality = ?selection.modality,
                    plan = ?selection.plan,
                    discount = quote.discount_percent_applied,
                    amount = quote.final_monthly_amount,
                    "scholarship calculated"
                );
                Ok(quote)
            }
            Err(error) => {
                debug!(kind = error.kind(), "scholarship calculation rejected");
                Err(error)
            }
        }
    }

    /// Preview list price shown before an average is entered.
    pub fn list_price(&self, selection: &Selection) -> Option<f64> {
        let (level, modality, plan) = (selection.level?, selection.modality?, selection.plan?);
        let eligibility =
            Eligibility::resolve(&self.catalog, level, modality, selection.campus.as_deref());
        if eligibility.campus_required && eligibility.campus.is_none() {
            return None;
        }

        derive_list_price(
            &self.catalog,
            level,
            modality,
            plan,
            eligibility.campus.as_ref(),
            eligibility.tier,
        )
    }

    pub fn options(
        &self,
        level: Option<Level>,
        modality: Option<Modality>,
        campus: Option<&str>,
    ) -> SelectionOptions {
        SelectionOptions::build(&self.catalog, level, modality, campus)
    }

    /// Charge catalog for a campus by name, if it lists any charges.
    pub fn campus_extras(&self, campus: &str) -> Option<&BTreeMap<String, Vec<ChargeItem>>> {
        self.catalog
            .campus(&CampusKey::new(campus))
            .map(|metadata| &metadata.extra_charges)
            .filter(|charges| !charges.is_empty())
    }
}
