#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates `name` as a survey database with the viewer's tables and the
    /// sample households from [`seed_sample_households`].
    pub fn survey_db(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let conn = Connection::open(&path).expect("create survey db");
        create_schema(&conn);
        seed_sample_households(&conn);
        path
    }
}

pub fn create_schema(conn: &Connection) {
    let kolom = (1..=14)
        .map(|i| format!("Kolom{i} REAL"))
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute_batch(&format!(
        "CREATE TABLE rekap (
            Kab TEXT, NKS TEXT, Nurt TEXT, Prop TEXT, Kec TEXT, Desa TEXT,
            R110 TEXT, JamMulai INTEGER, MenitMulai INTEGER,
            B432R1K3 REAL, B432R16K3 REAL, B5ER1K3 REAL, B5ER11K3 REAL,
            B5AK5J REAL, B5AK6J REAL, B6R8 REAL, B7R1 REAL,
            data_json TEXT
        );
        CREATE TABLE komoditi (NoUrut INTEGER PRIMARY KEY, Rincian TEXT, KodeCOICOP TEXT);
        CREATE TABLE modul_komoditi (
            Kab TEXT, NKS TEXT, Nurt TEXT, NoUrutKomoditiFK INTEGER, IDART TEXT, {kolom}
        );
        CREATE TABLE pendapatan_5a (
            Kab TEXT, NKS TEXT, Nurt TEXT,
            MB5AK2 TEXT, MB5AK3 TEXT, MB5AK4 INTEGER, MB5AK5 REAL, MB5AK6 REAL, MB5AK7 REAL
        );
        CREATE TABLE pendapatan_5b (
            Kab TEXT, NKS TEXT, Nurt TEXT,
            MB5BK2 TEXT, MB5BK3 TEXT, MB5BK4 INTEGER, MB5BK5 REAL, MB5BK6 REAL, MB5BK7 REAL
        );"
    ))
    .expect("create schema");
}

/// Two districts; household (07, 123456, 1) is fully populated, household
/// (07, 123456, 2) exists with null survey fields only.
pub fn seed_sample_households(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO rekap (Kab, NKS, Nurt, Prop, Kec, Desa, R110, JamMulai, MenitMulai,
                            B432R1K3, B432R16K3, B5ER1K3, B5ER11K3, B5AK5J, B6R8, data_json)
         VALUES ('07', '123456', '1', '35', '010', '001', 'Budi', 9, 5,
                 25000, 175000, 100000, 40000, 500000, 1250000.5,
                 '{\"B7R1\": 3000000, \"R110\": \"Budi Santoso\"}');
         INSERT INTO rekap (Kab, NKS, Nurt, Prop) VALUES ('07', '123456', '2', '35');
         INSERT INTO rekap (Kab, NKS, Nurt, Prop) VALUES ('07', '654321', '1', '35');
         INSERT INTO rekap (Kab, NKS, Nurt, Prop) VALUES ('12', '111111', '1', '33');
         INSERT INTO komoditi VALUES (1, 'Beras', NULL);
         INSERT INTO komoditi VALUES (190, 'Nasi campur', NULL);
         INSERT INTO komoditi VALUES (195, 'Roti', NULL);
         INSERT INTO komoditi VALUES (230, 'Sewa rumah', '04.1.1');",
    )
    .expect("seed rekap");

    let lines: [(i64, Option<&str>, Option<f64>, Option<f64>); 6] = [
        (1, None, Some(2.5), Some(30000.0)),
        (2, None, None, None),
        (195, Some("02"), Some(1.0), Some(15000.0)),
        (190, Some("02"), Some(3.0), Some(45000.0)),
        (190, Some("01"), Some(2.0), Some(30000.0)),
        (230, None, None, None),
    ];
    for (sequence, person, qty, value) in lines {
        conn.execute(
            "INSERT INTO modul_komoditi (Kab, NKS, Nurt, NoUrutKomoditiFK, IDART, Kolom1, Kolom2)
             VALUES ('07', '123456', '1', ?1, ?2, ?3, ?4)",
            params![sequence, person, qty, value],
        )
        .expect("insert commodity line");
    }
    conn.execute(
        "INSERT INTO modul_komoditi (Kab, NKS, Nurt, NoUrutKomoditiFK, Kolom5, Kolom6, Kolom8)
         VALUES ('07', '123456', '1', 230, 1, 1500000, 2)",
        [],
    )
    .expect("insert non-food line");

    conn.execute_batch(
        "INSERT INTO pendapatan_5a VALUES ('07', '123456', '1', 'Guru', '85', 12, 300000, 200000, NULL);
         INSERT INTO pendapatan_5b VALUES ('07', '123456', '1', 'Warung', '47', 10, 900000, 400000, 500000);",
    )
    .expect("seed income");
}
