use super::common::*;
use crate::scholarship::domain::{Level, Modality, ProgramType};
use crate::scholarship::selection::Selection;

#[test]
fn upstream_changes_clear_dependent_fields() {
    let catalog = catalog();
    let mut selection = returning_selection("9.0");
    assert!(selection.toggle_extras(&catalog));
    selection.toggle_extra_code("LAB");

    selection.set_modality(Modality::Hybrid);
    assert_eq!(selection.level, Some(Level::Undergraduate));
    assert_eq!(selection.plan, None);
    assert_eq!(selection.campus, None);
    assert!(selection.selected_extras.is_empty());
    assert_eq!(selection.average.as_deref(), Some("9.0"));

    selection.set_plan(12);
    selection.set_level(Level::Graduate);
    assert_eq!(selection.modality, None);
    assert_eq!(selection.plan, None);
    assert_eq!(selection.program_type, ProgramType::Returning);
}

#[test]
fn campus_and_plan_changes_drop_extra_picks() {
    let catalog = catalog();
    let mut selection = returning_selection("9.0");
    assert!(selection.toggle_extras(&catalog));

    selection.toggle_extra_code("LAB");
    selection.set_campus("Hermosillo");
    assert!(selection.selected_extras.is_empty());

    selection.set_campus("Culiacan");
    selection.toggle_extra_code("ID-CARD");
    selection.set_plan(9);
    assert!(selection.selected_extras.is_empty());
}

#[test]
fn extras_switch_requires_campus_charges() {
    let catalog = catalog();

    let mut untiered = returning_selection("8.5");
    untiered.set_campus("Guasave");
    assert!(!untiered.toggle_extras(&catalog));
    assert!(!untiered.extras_enabled);

    let mut graduate = Selection::new(ProgramType::Returning);
    graduate.set_level(Level::Graduate);
    graduate.set_modality(Modality::InPerson);
    assert!(!graduate.toggle_extras(&catalog));

    let mut online = Selection::new(ProgramType::Returning);
    online.set_level(Level::Undergraduate);
    online.set_modality(Modality::Online);
    assert!(online.toggle_extras(&catalog));
}

#[test]
fn toggling_extras_off_discards_picks() {
    let catalog = catalog();
    let mut selection = returning_selection("8.5");
    assert!(selection.toggle_extras(&catalog));
    selection.toggle_extra_code("LAB");
    assert_eq!(selection.selected_extras.len(), 1);

    assert!(!selection.toggle_extras(&catalog));
    assert!(selection.selected_extras.is_empty());
}

#[test]
fn extra_codes_toggle_only_while_enabled() {
    let catalog = catalog();
    let mut selection = returning_selection("8.5");

    selection.toggle_extra_code("LAB");
    assert!(selection.selected_extras.is_empty());

    selection.toggle_extras(&catalog);
    selection.toggle_extra_code("LAB");
    assert!(selection.selected_extras.contains("LAB"));
    selection.toggle_extra_code("LAB");
    assert!(selection.selected_extras.is_empty());
}

#[test]
fn clear_restores_defaults() {
    let mut selection = returning_selection("8.5");
    selection.clear();
    assert_eq!(selection, Selection::default());
    assert_eq!(selection.program_type, ProgramType::NewEntry);
}

#[test]
fn deserializes_partial_payloads() {
    let selection: Selection = serde_json::from_str(
        r#"{"program_type":"returning","level":"undergraduate","modality":"in_person"}"#,
    )
    .expect("partial selection");

    assert_eq!(selection.program_type, ProgramType::Returning);
    assert_eq!(selection.modality, Some(Modality::InPerson));
    assert_eq!(selection.plan, None);
    assert!(!selection.extras_enabled);
}

#[test]
fn average_accepts_text_or_number() {
    let numeric: Selection = serde_json::from_str(r#"{"average": 8.5}"#).expect("numeric average");
    assert_eq!(numeric.average.as_deref(), Some("8.5"));

    let integer: Selection = serde_json::from_str(r#"{"average": 9}"#).expect("integer average");
    assert_eq!(integer.average.as_deref(), Some("9"));

    let text: Selection = serde_json::from_str(r#"{"average": "8,5"}"#).expect("text average");
    assert_eq!(text.average.as_deref(), Some("8,5"));

    let null: Selection = serde_json::from_str(r#"{"average": null}"#).expect("null average");
    assert_eq!(null.average, None);

    assert!(serde_json::from_str::<Selection>(r#"{"average": [8.5]}"#).is_err());
}
