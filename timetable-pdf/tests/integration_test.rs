use std::fs;
use std::path::Path;
use std::process::Command;

use timetable_pdf::display::CellSource;
use timetable_pdf::{build_display_grid, generate_pdf, RenderConfig, TimetableError, TimetableInput};

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_timetable-pdf"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

fn fixture() -> TimetableInput {
    TimetableInput::from_json_file(Path::new("tests/fixtures/timetable.json"))
        .expect("Failed to load fixture")
}

#[test]
fn test_basic_timetable() {
    setup();
    let output_file = "test-basic.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated"), "Unexpected output: {}", stdout);
}

#[test]
fn test_light_config_and_title() {
    setup();
    let output_file = "test-light.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "-c", "tests/fixtures/light_a4.json",
            "-t", "Semester 5",
            "--no-repeat-header",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");
}

#[test]
fn test_default_logging_shows_warnings_only() {
    setup();
    let output_file = "test-quiet.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unresolved slot"), "Missing warning: {}", stderr);
    assert!(!stderr.contains("slot codes"), "Debug output without --verbose: {}", stderr);
}

#[test]
fn test_verbose_logging_shows_debug() {
    setup();
    let output_file = "test-verbose.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "-o", &format!("tests/output/{}", output_file),
            "--verbose",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("11 slot codes"), "Missing debug output: {}", stderr);
}

#[test]
fn test_missing_course_table() {
    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/missing_courses.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed without a course table");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("course table"), "Unexpected error: {}", stderr);
}

#[test]
fn test_degenerate_geometry() {
    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "-c", "tests/fixtures/bad_geometry.json",
            "-o", "tests/output/should-not-exist-either.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an oversized axis column");
}

#[test]
fn test_invalid_input_file() {
    let output = cargo_bin()
        .args(["-i", "nonexistent.json", "-o", "tests/output/nope.pdf"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing input");
}

#[test]
fn test_missing_font_file() {
    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/timetable.json",
            "--font", "fonts/missing.ttf",
            "--font-bold", "fonts/missing-bold.ttf",
            "-o", "tests/output/nope-font.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing fonts");
}

#[test]
fn test_display_grid_from_fixture() {
    let (display, slot_map) = build_display_grid(&fixture()).expect("Failed to build grid");

    // Six theory codes plus five lab codes.
    assert_eq!(slot_map.len(), 11);
    assert_eq!(slot_map.get("P2"), Some("Molecular Biology Laboratory LAB"));

    // Header plus five unique day rows; the hour-order row is dropped.
    assert_eq!(display.rows.len(), 6);
    assert_eq!(display.columns, 11);
    assert!(display.rows.iter().all(|r| r.cells.len() == 11));
    assert_eq!(display.rows[0].cells[0].text, "Day/Time");
    assert_eq!(display.rows[0].cells[1].text, "08:00 - 08:50");

    let day2 = &display.rows[2];
    assert_eq!(day2.cells[0].text, "Day 2");
    assert_eq!(day2.cells[1].text, "Genetic Engineering Laboratory LAB");
    assert_eq!(day2.cells[3].text, "Molecular Biology/X");

    let unresolved: Vec<_> = display.unresolved().into_iter().map(|u| u.text).collect();
    assert_eq!(unresolved, vec!["X", "A", "Q1/Z"]);

    let day3 = &display.rows[3];
    assert_eq!(day3.cells[9].source, CellSource::Unresolved);
    assert_eq!(day3.cells[8].text, "Molecular Biology Laboratory LAB/Y");
}

#[test]
fn test_generate_pdf_report() {
    setup();
    let output_file = "test-library.pdf";
    cleanup_file(output_file);
    let path = output_dir().join(output_file);

    let report = generate_pdf(&fixture(), RenderConfig::default(), &path)
        .expect("Failed to generate PDF");

    assert_eq!(report.rows, 6);
    assert_eq!(report.pages, 1);
    assert_eq!(report.unresolved.len(), 3);
    assert!(path.exists(), "PDF file was not created");
}

#[test]
fn test_generate_pdf_paginates_small_pages() {
    setup();
    let output_file = "test-small-pages.pdf";
    cleanup_file(output_file);
    let path = output_dir().join(output_file);

    let config = RenderConfig {
        page_width: 420.0,
        page_height: 80.0,
        ..Default::default()
    };
    let report = generate_pdf(&fixture(), config, &path).expect("Failed to generate PDF");
    assert!(report.pages > 1, "expected several pages, got {}", report.pages);
}

#[test]
fn test_empty_grid_is_missing_table() {
    let input = TimetableInput {
        grid: Some(Vec::new()),
        ..fixture()
    };
    let result = build_display_grid(&input);
    assert!(matches!(result, Err(TimetableError::MissingTable(_))));
}
