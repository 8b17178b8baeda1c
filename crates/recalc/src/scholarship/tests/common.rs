use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scholarship::catalog::{CampusDirectory, Catalog};
use crate::scholarship::domain::{
    AverageRange, CampusMetadata, ChargeItem, Level, Modality, Offering, ProgramType, Rule, Tier,
};
use crate::scholarship::selection::Selection;
use crate::scholarship::service::ScholarshipService;

pub(super) fn rule(
    program_type: ProgramType,
    level: Level,
    modality: Modality,
    plan: u32,
    tier: Option<Tier>,
    range: (f64, f64),
    discount_percent: f64,
    net_amount: f64,
) -> Rule {
    Rule {
        level,
        modality,
        plan,
        tier,
        average_range: AverageRange {
            min: range.0,
            max: range.1,
        },
        discount_percent,
        net_amount,
        program_type,
        origin: Some("fixture".to_string()),
    }
}

/// Rule table in the order the matcher must respect.
pub(super) fn rules() -> Vec<Rule> {
    use Level::*;
    use Modality::*;
    use ProgramType::*;

    vec![
        rule(NewEntry, Undergraduate, InPerson, 12, Some(Tier::T2), (7.0, 7.9), 10.0, 4500.0),
        rule(NewEntry, Undergraduate, InPerson, 12, Some(Tier::T2), (8.0, 8.9), 20.0, 4000.0),
        rule(NewEntry, Undergraduate, InPerson, 12, Some(Tier::T2), (9.0, 10.0), 30.0, 3500.0),
        rule(Returning, Undergraduate, InPerson, 12, Some(Tier::T2), (8.0, 8.9), 20.0, 4000.0),
        rule(Returning, Undergraduate, InPerson, 12, Some(Tier::T2), (9.0, 10.0), 40.0, 3000.0),
        rule(NewEntry, Undergraduate, InPerson, 12, Some(Tier::T1), (8.0, 10.0), 25.0, 4500.0),
        rule(NewEntry, Undergraduate, InPerson, 9, Some(Tier::T1), (8.0, 10.0), 25.0, 3750.0),
        rule(NewEntry, Undergraduate, Online, 12, None, (6.0, 10.0), 15.0, 2550.0),
        rule(NewEntry, Undergraduate, Hybrid, 12, Some(Tier::T2), (7.0, 10.0), 10.0, 4050.0),
        rule(NewEntry, Graduate, Online, 6, None, (7.0, 10.0), 20.0, 2400.0),
        rule(NewEntry, HealthSciences, InPerson, 12, Some(Tier::T3), (8.0, 10.0), 100.0, 0.0),
        rule(NewEntry, HealthSciences, Hybrid, 12, Some(Tier::T3), (8.0, 10.0), 10.0, 5400.0),
        // Overlaps the 8.0-8.9 band above; never reached for those averages.
        rule(NewEntry, Undergraduate, InPerson, 12, Some(Tier::T2), (8.5, 9.5), 50.0, 2500.0),
    ]
}

fn charge(code: &str, description: &str, amount: f64) -> ChargeItem {
    ChargeItem {
        code: code.to_string(),
        description: description.to_string(),
        amount,
    }
}

fn offering(net_price: f64) -> Offering {
    Offering {
        net_price,
        available_discounts: BTreeMap::new(),
    }
}

pub(super) fn directory() -> CampusDirectory {
    let mut campuses = HashMap::new();

    let mut culiacan = CampusMetadata {
        tier: Some(Tier::T2),
        ..CampusMetadata::default()
    };
    culiacan.extra_charges.insert(
        "Administrative".to_string(),
        vec![charge("TRANSCRIPT", "Official transcript", 220.5)],
    );
    culiacan.extra_charges.insert(
        "Services".to_string(),
        vec![
            charge("ID-CARD", "Student ID card", 150.0),
            charge("LAB", "Laboratory fee", 150.0),
        ],
    );
    campuses.insert("Culiacan".to_string(), culiacan);

    let mut hermosillo = CampusMetadata {
        tier: Some(Tier::T1),
        ..CampusMetadata::default()
    };
    hermosillo.offerings.insert(
        Level::Undergraduate,
        BTreeMap::from([("9".to_string(), offering(4500.0))]),
    );
    campuses.insert("Hermosillo".to_string(), hermosillo);

    campuses.insert(
        "Mazatlan".to_string(),
        CampusMetadata {
            tier: Some(Tier::T3),
            ..CampusMetadata::default()
        },
    );
    campuses.insert("Guasave".to_string(), CampusMetadata::default());

    let mut online = CampusMetadata::default();
    online.offerings.insert(
        Level::Graduate,
        BTreeMap::from([("6".to_string(), offering(3200.0))]),
    );
    online.extra_charges.insert(
        "Digital".to_string(),
        vec![charge("PLATFORM", "Learning platform", 99.99)],
    );
    campuses.insert("ONLINE".to_string(), online);

    let campuses_by_line = BTreeMap::from([
        (
            "undergraduate_in_person_hybrid".to_string(),
            vec![
                "Hermosillo".to_string(),
                "Culiacan".to_string(),
                "Guasave".to_string(),
            ],
        ),
        (
            "health_sciences_in_person".to_string(),
            vec!["Mazatlan".to_string()],
        ),
    ]);

    CampusDirectory {
        version: Some("2026.1".to_string()),
        campuses_by_line,
        campuses,
    }
}

pub(super) fn catalog() -> Catalog {
    Catalog::new(rules(), directory())
}

pub(super) fn service() -> ScholarshipService {
    ScholarshipService::new(Arc::new(catalog()))
}

/// Undergraduate, in person, 12 periods at a T2 campus.
pub(super) fn undergraduate_selection(average: &str) -> Selection {
    let mut selection = Selection::new(ProgramType::NewEntry);
    selection.set_level(Level::Undergraduate);
    selection.set_modality(Modality::InPerson);
    selection.set_plan(12);
    selection.set_campus("Culiacan");
    selection.set_average(average);
    selection
}

pub(super) fn returning_selection(average: &str) -> Selection {
    let mut selection = undergraduate_selection(average);
    selection.set_program_type(ProgramType::Returning);
    selection
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
