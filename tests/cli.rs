mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::{prelude::*, str::contains};

fn viewer(db: &std::path::Path) -> Command {
    let mut command = Command::cargo_bin("susenas-viewer").expect("binary exists");
    command.env_remove("SUSENAS_DB").arg("--db").arg(db);
    command
}

#[test]
fn districts_lists_codes_with_province() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    viewer(&db)
        .arg("districts")
        .assert()
        .success()
        .stdout("07 (35)\n12 (33)\n");
}

#[test]
fn cascade_narrows_clusters_then_sequences() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    viewer(&db)
        .args(["clusters", "--kab", "07"])
        .assert()
        .success()
        .stdout("123456\n654321\n");

    viewer(&db)
        .args(["sequences", "-k", "07", "-n", "123456", "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"1\"").and(contains("\"2\"")));
}

#[test]
fn show_renders_all_blocks_as_text() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    let assert = viewer(&db)
        .args(["show", "--kab", "07", "--nks", "123456", "--nurt", "1"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");

    assert!(output.contains("Nama KRT: Budi Santoso"));
    assert!(output.contains("Waktu Mulai: 9:05"));
    assert!(output.contains("Blok IV.1 - Pengeluaran Makanan (Seminggu)"));
    assert!(output.contains("Beras"));
    assert!(output.contains("Sewa rumah"));
    assert!(output.contains("K8:2"));
    assert!(output.contains("== Blok IV - Pengeluaran (Rekapitulasi) =="));
    assert!(output.contains("* R16 (JUMLAH)"));
    assert!(output.contains("R1.1"));
    assert!(output.contains("JUMLAH"));
    assert!(output.contains("Blok VII - Pendapatan dan Pengeluaran"));
    assert!(output.contains("3,000,000"));
}

#[test]
fn show_json_numbers_household_members() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    let assert = viewer(&db)
        .args(["show", "-k", "07", "-n", "123456", "-u", "1", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json output");

    let rows = json["individual_food"]["rows"]
        .as_array()
        .expect("individual rows");
    let members = rows
        .iter()
        .map(|row| {
            (
                row["cells"][0].as_str().unwrap_or_default().to_string(),
                row["cells"][1].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        members,
        vec![
            ("190".to_string(), "1".to_string()),
            ("190".to_string(), "2".to_string()),
            ("195".to_string(), "2".to_string()),
        ]
    );
    assert_eq!(json["food"]["rows"].as_array().map(Vec::len), Some(1));
}

#[test]
fn show_restricts_sections_when_requested() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    let assert = viewer(&db)
        .args(["show", "-k", "07", "-n", "123456", "-u", "1", "--section", "b6"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");

    assert!(output.contains("Blok VI - Pengeluaran dan Pendapatan"));
    assert!(!output.contains("Blok IV.3.2"));
    assert!(!output.contains("Blok VII - Pendapatan dan Pengeluaran"));
}

#[test]
fn show_renders_dashes_for_empty_household() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    viewer(&db)
        .args(["show", "-k", "07", "-n", "123456", "-u", "2"])
        .assert()
        .success()
        .stdout(contains("Nama KRT: -"))
        .stdout(contains("Tidak ada data pengeluaran makanan."));
}

#[test]
fn show_reports_missing_household() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    viewer(&db)
        .args(["show", "-k", "07", "-n", "123456", "-u", "9"])
        .assert()
        .failure()
        .stderr(contains("No record found for Kab=07 NKS=123456 Nurt=9"));
}

#[test]
fn missing_database_fails_with_context() {
    let workspace = TestWorkspace::new();

    viewer(&workspace.path().join("absent.db"))
        .arg("districts")
        .assert()
        .failure()
        .stderr(contains("Opening survey database"));
}

#[test]
fn show_color_uses_ansi_bold_for_totals() {
    let workspace = TestWorkspace::new();
    let db = workspace.survey_db("susenas.db");

    viewer(&db)
        .args(["show", "-k", "07", "-n", "123456", "-u", "1", "-s", "B432", "--color"])
        .assert()
        .success()
        .stdout(contains("\u{1b}[1mR16 (JUMLAH)\u{1b}[0m"))
        .stdout(contains("* R16").not());
}
