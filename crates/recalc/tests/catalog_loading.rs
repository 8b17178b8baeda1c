use recalc::scholarship::catalog::parse_rules_csv;
use recalc::scholarship::{CampusKey, Catalog, CatalogError, Level, Modality, ProgramType, Tier};
use std::path::PathBuf;

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data")).join(file)
}

#[test]
fn json_catalog_keeps_rule_order_and_metadata() {
    let catalog = Catalog::load(data_path("rules.json"), data_path("campus_meta.json"))
        .expect("sample catalog loads");

    assert_eq!(catalog.version(), Some("2026.1"));
    assert_eq!(catalog.rules().len(), 20);

    let first = &catalog.rules()[0];
    assert_eq!(first.level, Level::Undergraduate);
    assert_eq!(first.tier, Some(Tier::T1));
    assert_eq!(first.average_range.min, 7.0);

    let hermosillo = catalog
        .campus(&CampusKey::new("Hermosillo"))
        .expect("Hermosillo listed");
    assert_eq!(hermosillo.tier, Some(Tier::T1));
    let offering = hermosillo
        .offering(Level::Undergraduate, 12)
        .expect("authoritative offering");
    assert_eq!(offering.net_price, 6000.0);
    assert_eq!(offering.available_discounts.get("academic"), Some(&30.0));

    let los_mochis = catalog
        .campus(&CampusKey::new("Los Mochis"))
        .expect("Los Mochis listed");
    assert_eq!(los_mochis.tier, None);
    assert!(!los_mochis.has_extra_charges());

    assert_eq!(catalog.campuses_for_line("health_sciences_in_person").len(), 2);
    assert!(catalog.campuses_for_line("unknown_line").is_empty());
}

#[test]
fn csv_export_matches_json_rules() {
    let from_json = Catalog::load(data_path("rules.json"), data_path("campus_meta.json"))
        .expect("json rules load");
    let from_csv = Catalog::load(data_path("rules.csv"), data_path("campus_meta.json"))
        .expect("csv rules load");

    assert_eq!(from_csv.rules(), from_json.rules());
}

#[test]
fn csv_blank_tier_and_origin_become_none() {
    let csv = "level,modality,plan,tier,min,max,discount_percent,net_amount,program_type,origin\n\
undergraduate,online,12,,8.0,10.0,15.0,2550.0,new_entry,\n\
health_sciences,in_person,12, T2 ,8.0,10.0,100.0,0.0,returning,full_scholarship\n";

    let rules = parse_rules_csv(csv.as_bytes()).expect("csv parses");
    assert_eq!(rules.len(), 2);

    assert_eq!(rules[0].modality, Modality::Online);
    assert_eq!(rules[0].tier, None);
    assert_eq!(rules[0].origin, None);

    assert_eq!(rules[1].tier, Some(Tier::T2));
    assert_eq!(rules[1].program_type, ProgramType::Returning);
    assert_eq!(rules[1].origin.as_deref(), Some("full_scholarship"));
}

#[test]
fn csv_rejects_unknown_level() {
    let csv = "level,modality,plan,tier,min,max,discount_percent,net_amount,program_type,origin\n\
kindergarten,online,12,,8.0,10.0,15.0,2550.0,new_entry,\n";

    assert!(parse_rules_csv(csv.as_bytes()).is_err());
}

#[test]
fn missing_file_reports_path() {
    let missing = data_path("does_not_exist.json");
    match Catalog::load(&missing, data_path("campus_meta.json")) {
        Err(CatalogError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_metadata_reports_json_error() {
    let path = std::env::temp_dir().join(format!("recalc-meta-{}.json", std::process::id()));
    std::fs::write(&path, "{ \"campuses\": [").expect("write fixture");

    let result = Catalog::load(data_path("rules.json"), &path);
    std::fs::remove_file(&path).ok();

    match result {
        Err(CatalogError::Json { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected json error, got {other:?}"),
    }
}
