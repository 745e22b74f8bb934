use std::fs;
use std::path::Path;

use mentor_tools::ToolError;
use mentor_tools::config::{Config, ImageMode};
use mentor_tools::io::excel_read;
use mentor_tools::model::Cell;
use mentor_tools::sync;
use rust_xlsxwriter::Workbook;
use serde_yaml::Value;
use tempfile::tempdir;

/// Writes a workbook with a header row followed by one row per mentor.
fn write_mentors_workbook(path: &Path, sheet: &str, rows: &[Vec<(u16, &str)>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet named");
    worksheet.write_string(0, 0, "Name").expect("header written");
    worksheet.write_string(0, 28, "Hours").expect("header written");

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row {
            worksheet
                .write_string((row_idx + 1) as u32, *col_idx, *value)
                .expect("cell written");
        }
    }
    workbook.save(path).expect("workbook saved");
}

fn names_and_indices(path: &Path) -> Vec<(String, u64)> {
    let parsed: Value =
        serde_yaml::from_str(&fs::read_to_string(path).expect("output read")).expect("YAML");
    parsed
        .as_sequence()
        .expect("sequence")
        .iter()
        .map(|entry| {
            (
                entry["name"].as_str().expect("name").to_string(),
                entry["index"].as_u64().expect("index"),
            )
        })
        .collect()
}

#[test]
fn reader_returns_positional_rows_below_the_header() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    write_mentors_workbook(
        &xlsx_path,
        "Mentors",
        &[vec![(0, "Alice"), (5, "English")], vec![], vec![(0, "Bob")]],
    );

    let rows = excel_read::read_rows(&xlsx_path, "Mentors", 1).expect("rows read");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Cell::Text("Alice".to_string()));
    assert_eq!(rows[0][5], Cell::Text("English".to_string()));
    assert_eq!(rows[1][0], Cell::Text("Bob".to_string()));
}

#[test]
fn missing_sheet_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    write_mentors_workbook(&xlsx_path, "Other", &[vec![(0, "Alice")]]);

    let result = excel_read::read_rows(&xlsx_path, "Mentors", 1);
    assert!(matches!(result, Err(ToolError::InvalidWorkbook(_))));
}

#[test]
fn full_export_writes_every_row_in_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    let output_path = temp_dir.path().join("mentors.yml");
    write_mentors_workbook(
        &xlsx_path,
        "Mentors",
        &[
            vec![
                (0, "Alice"),
                (2, "Ad hoc"),
                (9, "Backend"),
                (25, "Bio line\nSecond line"),
                (27, "https://github.com/alice"),
                (28, "2-4 hours"),
            ],
            vec![(0, "Bob"), (2, "Both")],
        ],
    );

    let written = sync::export_full(&xlsx_path, &output_path, &Config::default())
        .expect("full export");

    assert_eq!(written, 2);
    assert_eq!(
        names_and_indices(&output_path),
        vec![("Alice".to_string(), 1), ("Bob".to_string(), 2)]
    );

    let content = fs::read_to_string(&output_path).expect("output read");
    assert!(content.contains("  bio: |-\n    Bio line\n    Second line\n"));
    assert!(content.contains("    - github: https://github.com/alice\n"));

    let parsed: Value = serde_yaml::from_str(&content).expect("YAML");
    assert_eq!(parsed[0]["hours"].as_u64(), Some(4));
    assert_eq!(parsed[0]["type"].as_str(), Some("ad-hoc"));
    assert_eq!(parsed[0]["disabled"].as_bool(), Some(false));
    assert_eq!(parsed[1]["type"].as_str(), Some("both"));
    assert_eq!(parsed[1]["skills"]["areas"].as_str(), Some(""));
}

#[test]
fn incremental_export_appends_only_new_mentors() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    let existing_path = temp_dir.path().join("mentors.yml");
    let existing = "\
- name: alice
  index: 87
- name: bob
  index: 12
";
    fs::write(&existing_path, existing).expect("existing document written");
    write_mentors_workbook(
        &xlsx_path,
        "Mentors",
        &[
            vec![(0, "Old Timer")],
            vec![(0, "Alice")],
            vec![(0, "Carol")],
            vec![(0, "Dave")],
        ],
    );

    let appended = sync::export_incremental(&xlsx_path, &existing_path, 1, &Config::default())
        .expect("incremental export");

    assert_eq!(appended, 2);
    let content = fs::read_to_string(&existing_path).expect("output read");
    assert!(content.starts_with(existing));
    assert_eq!(
        names_and_indices(&existing_path),
        vec![
            ("alice".to_string(), 87),
            ("bob".to_string(), 12),
            ("Carol".to_string(), 88),
            ("Dave".to_string(), 89),
        ]
    );

    let parsed: Value = serde_yaml::from_str(&content).expect("YAML");
    assert_eq!(parsed[2]["disabled"].as_bool(), Some(true));
}

#[test]
fn incremental_export_without_new_rows_leaves_the_document_alone() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    let existing_path = temp_dir.path().join("mentors.yml");
    let existing = "- name: Alice\n  index: 1\n";
    fs::write(&existing_path, existing).expect("existing document written");
    write_mentors_workbook(&xlsx_path, "Mentors", &[vec![(0, "ALICE")]]);

    let appended = sync::export_incremental(&xlsx_path, &existing_path, 0, &Config::default())
        .expect("incremental export");

    assert_eq!(appended, 0);
    assert_eq!(fs::read_to_string(&existing_path).expect("read"), existing);
}

#[test]
fn incremental_export_requires_the_existing_document() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("mentors.xlsx");
    write_mentors_workbook(&xlsx_path, "Mentors", &[vec![(0, "Alice")]]);

    let result = sync::export_incremental(
        &xlsx_path,
        &temp_dir.path().join("absent.yml"),
        0,
        &Config::default(),
    );
    assert!(matches!(result, Err(ToolError::MissingInput(_))));
}

#[test]
fn config_file_overrides_columns_and_defaults() {
    let temp_dir = tempdir().expect("temporary directory");
    let config_path = temp_dir.path().join("mentors-config.yml");
    fs::write(
        &config_path,
        "\
sheet: Sheet1
columns:
  name: 1
  areas: { start: 10, end: 13 }
full:
  matched: true
image:
  mode: asset-path
",
    )
    .expect("config written");

    let config = Config::load(&config_path).expect("config loaded");

    assert_eq!(config.sheet, "Sheet1");
    assert_eq!(config.columns.name, 1);
    assert_eq!(config.columns.areas.start, 10);
    assert_eq!(config.columns.hours, 28);
    assert!(config.full.matched);
    assert_eq!(config.full.sort, 10);
    assert!(config.incremental.disabled);
    assert_eq!(config.image.mode, ImageMode::AssetPath);
}

#[test]
fn config_rejects_inverted_spans() {
    let temp_dir = tempdir().expect("temporary directory");
    let config_path = temp_dir.path().join("mentors-config.yml");
    fs::write(&config_path, "columns:\n  focus: { start: 18, end: 14 }\n")
        .expect("config written");

    assert!(matches!(
        Config::load(&config_path),
        Err(ToolError::InvalidConfig(_))
    ));
}

#[test]
fn config_rejects_unknown_schema_versions() {
    let temp_dir = tempdir().expect("temporary directory");
    let config_path = temp_dir.path().join("mentors-config.yml");
    fs::write(&config_path, "columns:\n  version: 1\n").expect("config written");

    assert!(matches!(
        Config::load(&config_path),
        Err(ToolError::InvalidConfig(_))
    ));
}
