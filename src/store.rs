//! Read-only access to the survey database.
//!
//! The database holds one `rekap` row per household keyed by district (`Kab`),
//! cluster code (`NKS`) and sequence number (`Nurt`), plus the per-household
//! module tables `modul_komoditi` (joined with the `komoditi` catalog),
//! `pendapatan_5a` and `pendapatan_5b`.

use std::{fmt, path::Path};

use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row, params};
use serde::Serialize;
use thiserror::Error;

use crate::{
    commodity::{CommodityLine, VALUE_SLOTS},
    income::{BusinessIncomeLine, JobIncomeLine},
    record::FlatRecord,
    value::Value,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid {table} row: {reason}")]
    InvalidRow { table: &'static str, reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Key of one household record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordKey {
    pub district: String,
    pub cluster: String,
    pub sequence: String,
}

impl RecordKey {
    pub fn new(
        district: impl Into<String>,
        cluster: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            district: district.into(),
            cluster: cluster.into(),
            sequence: sequence.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kab={} NKS={} Nurt={}",
            self.district, self.cluster, self.sequence
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    pub code: String,
    pub province: Option<String>,
}

impl District {
    /// Selection label such as `07 (35)`.
    pub fn label(&self) -> String {
        match &self.province {
            Some(province) => format!("{} ({province})", self.code),
            None => self.code.clone(),
        }
    }
}

/// Lookups the viewer needs from storage. Every call is a single blocking
/// read; a record that does not exist is `Ok(None)`.
pub trait SurveyStore {
    fn districts(&self) -> StoreResult<Vec<District>>;
    fn clusters(&self, district: &str) -> StoreResult<Vec<String>>;
    fn sequences(&self, district: &str, cluster: &str) -> StoreResult<Vec<String>>;
    fn record(&self, key: &RecordKey) -> StoreResult<Option<FlatRecord>>;
    fn commodity_lines(&self, key: &RecordKey) -> StoreResult<Vec<CommodityLine>>;
    fn job_income_lines(&self, key: &RecordKey) -> StoreResult<Vec<JobIncomeLine>>;
    fn business_income_lines(&self, key: &RecordKey) -> StoreResult<Vec<BusinessIncomeLine>>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        debug!("Opening survey database {path:?} read-only");
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only=ON;")?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn distinct_text<P: Params>(&self, sql: &str, params: P) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| Ok(Value::from_sql(row.get_ref(0)?)))?;
        let mut values = Vec::new();
        for row in rows {
            if let Some(value) = row? {
                values.push(value.as_display());
            }
        }
        Ok(values)
    }
}

impl SurveyStore for SqliteStore {
    fn districts(&self) -> StoreResult<Vec<District>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT Kab, Prop FROM rekap WHERE Kab IS NOT NULL ORDER BY Kab",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                Value::from_sql(row.get_ref(0)?),
                Value::from_sql(row.get_ref(1)?),
            ))
        })?;
        let mut districts = Vec::new();
        for row in rows {
            let (code, province) = row?;
            if let Some(code) = code {
                districts.push(District {
                    code: code.as_display(),
                    province: province.map(|value| value.as_display()),
                });
            }
        }
        Ok(districts)
    }

    fn clusters(&self, district: &str) -> StoreResult<Vec<String>> {
        self.distinct_text(
            "SELECT DISTINCT NKS FROM rekap WHERE Kab = ?1 ORDER BY NKS",
            params![district],
        )
    }

    fn sequences(&self, district: &str, cluster: &str) -> StoreResult<Vec<String>> {
        self.distinct_text(
            "SELECT DISTINCT Nurt FROM rekap WHERE Kab = ?1 AND NKS = ?2 ORDER BY Nurt",
            params![district, cluster],
        )
    }

    fn record(&self, key: &RecordKey) -> StoreResult<Option<FlatRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM rekap WHERE Kab = ?1 AND NKS = ?2 AND Nurt = ?3")?;
        let names = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let record = stmt
            .query_row(params![key.district, key.cluster, key.sequence], |row| {
                let mut record = FlatRecord::new();
                for (idx, name) in names.iter().enumerate() {
                    record.insert(name.clone(), Value::from_sql(row.get_ref(idx)?));
                }
                Ok(record)
            })
            .optional()?;
        Ok(record.map(|mut record| {
            record.merge_aux_payload();
            record
        }))
    }

    fn commodity_lines(&self, key: &RecordKey) -> StoreResult<Vec<CommodityLine>> {
        let slots = (1..=VALUE_SLOTS)
            .map(|slot| format!("mk.Kolom{slot}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT mk.NoUrutKomoditiFK, mk.IDART, {slots}, k.Rincian, k.KodeCOICOP \
             FROM modul_komoditi mk \
             LEFT JOIN komoditi k ON mk.NoUrutKomoditiFK = k.NoUrut \
             WHERE mk.Kab = ?1 AND mk.NKS = ?2 AND mk.Nurt = ?3 \
             ORDER BY mk.NoUrutKomoditiFK"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![key.district, key.cluster, key.sequence],
            read_commodity_row,
        )?;
        let mut lines = Vec::new();
        for row in rows {
            let (sequence, mut line) = row?;
            line.sequence_number = sequence.map(parse_sequence).transpose()?;
            lines.push(line);
        }
        debug!("Loaded {} commodity line(s) for {key}", lines.len());
        Ok(lines)
    }

    fn job_income_lines(&self, key: &RecordKey) -> StoreResult<Vec<JobIncomeLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT MB5AK2, MB5AK3, MB5AK4, MB5AK5, MB5AK6, MB5AK7 FROM pendapatan_5a \
             WHERE Kab = ?1 AND NKS = ?2 AND Nurt = ?3",
        )?;
        let rows = stmt.query_map(params![key.district, key.cluster, key.sequence], |row| {
            Ok(JobIncomeLine {
                job_type: value_at(row, 0)?,
                sector: value_at(row, 1)?,
                months_worked: value_at(row, 2)?,
                wage: value_at(row, 3)?,
                bonus: value_at(row, 4)?,
                other: value_at(row, 5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn business_income_lines(&self, key: &RecordKey) -> StoreResult<Vec<BusinessIncomeLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT MB5BK2, MB5BK3, MB5BK4, MB5BK5, MB5BK6, MB5BK7 FROM pendapatan_5b \
             WHERE Kab = ?1 AND NKS = ?2 AND Nurt = ?3",
        )?;
        let rows = stmt.query_map(params![key.district, key.cluster, key.sequence], |row| {
            Ok(BusinessIncomeLine {
                business_type: value_at(row, 0)?,
                sector: value_at(row, 1)?,
                months_run: value_at(row, 2)?,
                gross_income: value_at(row, 3)?,
                cost: value_at(row, 4)?,
                net_income: value_at(row, 5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn value_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Value>> {
    Ok(Value::from_sql(row.get_ref(idx)?))
}

fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(value_at(row, idx)?.map(|value| value.as_display()))
}

/// Reads a commodity row, returning the raw catalog sequence alongside the
/// line so it can be validated outside the row callback.
fn read_commodity_row(row: &Row<'_>) -> rusqlite::Result<(Option<Value>, CommodityLine)> {
    let mut columns: [Option<Value>; VALUE_SLOTS] = Default::default();
    for (slot, column) in columns.iter_mut().enumerate() {
        *column = value_at(row, slot + 2)?;
    }
    let line = CommodityLine {
        sequence_number: None,
        person_id: text_at(row, 1)?,
        columns,
        description: text_at(row, VALUE_SLOTS + 2)?,
        classification_code: text_at(row, VALUE_SLOTS + 3)?,
    };
    Ok((value_at(row, 0)?, line))
}

fn parse_sequence(value: Value) -> StoreResult<i64> {
    value.as_i64().ok_or_else(|| StoreError::InvalidRow {
        table: "modul_komoditi",
        reason: format!("NoUrutKomoditiFK '{value}' is not an integer"),
    })
}
