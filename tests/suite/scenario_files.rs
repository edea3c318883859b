//! Scenario files written by one command and read by the next.

use std::fs;

use captable_config::{ScenarioError, ScenarioFormat, load_scenario, save_scenario};
use captable_engine::compute_scenario;
use captable_types::{SafeTerms, ValidationError};
use tempfile::tempdir;

use crate::common::series_a_scenario;

#[test]
fn toml_and_json_files_reload_identically() {
    let dir = tempdir().expect("tempdir");
    let scenario = series_a_scenario();

    for file in ["scenario.toml", "scenario.json"] {
        let path = dir.path().join(file);
        save_scenario(&path, &scenario).expect("save");
        let loaded = load_scenario(&path).expect("load");
        assert_eq!(loaded, scenario, "{file}");
        assert_eq!(compute_scenario(&loaded), compute_scenario(&scenario), "{file}");
    }
}

#[test]
fn format_follows_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plan.JSON");
    assert_eq!(ScenarioFormat::from_path(&path), ScenarioFormat::Json);

    save_scenario(&path, &series_a_scenario()).expect("save");
    let text = fs::read_to_string(&path).expect("read");
    assert!(text.trim_start().starts_with('{'));
}

#[test]
fn saving_over_an_existing_file_leaves_no_backup() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scenario.toml");
    let mut scenario = series_a_scenario();
    save_scenario(&path, &scenario).expect("first save");

    scenario.add_safe(SafeTerms::new("Late Angel", 50_000.0, 10.0));
    save_scenario(&path, &scenario).expect("second save");

    assert_eq!(load_scenario(&path).expect("load").safe_count(), 2);
    assert!(!path.with_extension("bak").exists());
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scenario.json");
    let mut scenario = series_a_scenario();
    scenario.company.founders_shares = scenario.company.total_shares + 1;
    fs::write(&path, serde_json::to_string(&scenario).expect("serialize")).expect("write");

    let err = load_scenario(&path).unwrap_err();
    assert!(
        matches!(
            err,
            ScenarioError::Invalid(ValidationError::FoundersExceedTotal { .. })
        ),
        "{err:?}"
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_scenario(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Read { .. }), "{err:?}");
}
