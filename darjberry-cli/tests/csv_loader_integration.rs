//! Loader and batch analysis against an on-disk fixture file.
//!
//! The unit tests inside csv_loader.rs all use inline strings; these cover
//! the read-from-disk path and the batch command end to end.

use std::path::Path;

use darjberry_cli::app::App;
use darjberry_cli::cli::{BatchArgs, Command, OutputArgs};
use darjberry_cli::config::AppConfig;
use darjberry_cli::csv_loader;
use darjberry_core::{Coordinates, Suitability};
use pretty_assertions::assert_eq;

fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("coordinates.csv")
        .leak()
}

#[test]
fn fixture_loads_every_row() {
    let points = csv_loader::load_from_file(fixture_path()).expect("fixture should load");

    assert_eq!(points.len(), 5);
    assert_eq!(points[0].coordinates, Coordinates::new(27.036, 88.2627));
    assert_eq!(points[0].label.as_deref(), Some("Darjeeling town"));
    assert_eq!(points[3].label, None);
}

#[test]
fn missing_file_is_io_error() {
    let err = csv_loader::load_from_file(Path::new("/this/path/does/not/exist.csv")).unwrap_err();

    assert!(matches!(err, csv_loader::CsvLoadError::Io { .. }));
}

#[tokio::test]
async fn batch_analyzes_fixture_in_order() {
    let mut app = App::new(AppConfig::default()).expect("default config is valid");

    let output = app
        .execute(Command::Batch(BatchArgs {
            file: fixture_path().to_path_buf(),
            output: OutputArgs { json: true },
        }))
        .await
        .expect("batch should succeed");

    let reports: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    let districts: Vec<&str> = reports
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["analysis"]["district"].as_str().unwrap_or_default())
        .collect();

    assert_eq!(
        districts,
        ["Darjeeling", "Kurseong", "Siliguri", "Alipurduar", "Unknown"]
    );
    assert_eq!(
        reports[4]["analysis"]["suitability"],
        serde_json::json!(Suitability::Poor.as_str())
    );
}
