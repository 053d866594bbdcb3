//! Income lines from job (block V.A) and own-business (block V.B) modules.

use serde::Serialize;

use crate::{
    format::{DASH, format_currency, value_or_dash},
    record::FlatRecord,
    value::Value,
};

pub const TOTAL_LABEL: &str = "JUMLAH";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobIncomeLine {
    pub job_type: Option<Value>,
    pub sector: Option<Value>,
    pub months_worked: Option<Value>,
    pub wage: Option<Value>,
    pub bonus: Option<Value>,
    pub other: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessIncomeLine {
    pub business_type: Option<Value>,
    pub sector: Option<Value>,
    pub months_run: Option<Value>,
    pub gross_income: Option<Value>,
    pub cost: Option<Value>,
    pub net_income: Option<Value>,
}

/// Display row of an income table. `total` marks the trailing JUMLAH row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeRow {
    pub cells: Vec<String>,
    pub total: bool,
}

pub const JOB_HEADERS: [&str; 7] = [
    "No",
    "Jenis Pekerjaan",
    "Lap. Usaha",
    "Bulan Kerja",
    "Gaji/Upah (Rp)",
    "THR/Bonus (Rp)",
    "Lainnya (Rp)",
];

pub const BUSINESS_HEADERS: [&str; 7] = [
    "No",
    "Jenis Usaha",
    "Lap. Usaha",
    "Bulan Usaha",
    "Pend. Kotor (Rp)",
    "Biaya Produksi (Rp)",
    "Pend. Bersih (Rp)",
];

const JOB_TOTAL_FIELDS: [&str; 3] = ["B5AK5J", "B5AK6J", "B5AK7J"];
const BUSINESS_TOTAL_FIELDS: [&str; 3] = ["B5BK5J", "B5BK6J", "B5BK7J"];

pub fn job_income_rows(lines: &[JobIncomeLine], record: &FlatRecord) -> Vec<IncomeRow> {
    let rows = lines.iter().enumerate().map(|(idx, line)| {
        line_row(
            idx + 1,
            line.job_type.as_ref(),
            [line.sector.as_ref(), line.months_worked.as_ref()],
            [line.wage.as_ref(), line.bonus.as_ref(), line.other.as_ref()],
        )
    });
    rows.chain(total_row(record, &JOB_TOTAL_FIELDS)).collect()
}

pub fn business_income_rows(lines: &[BusinessIncomeLine], record: &FlatRecord) -> Vec<IncomeRow> {
    let rows = lines.iter().enumerate().map(|(idx, line)| {
        line_row(
            idx + 1,
            line.business_type.as_ref(),
            [line.sector.as_ref(), line.months_run.as_ref()],
            [
                line.gross_income.as_ref(),
                line.cost.as_ref(),
                line.net_income.as_ref(),
            ],
        )
    });
    rows.chain(total_row(record, &BUSINESS_TOTAL_FIELDS)).collect()
}

fn line_row(
    number: usize,
    kind: Option<&Value>,
    details: [Option<&Value>; 2],
    amounts: [Option<&Value>; 3],
) -> IncomeRow {
    let kind = kind
        .filter(|value| !value.is_empty_text())
        .map(Value::as_display)
        .unwrap_or_else(|| DASH.to_string());
    let mut cells = vec![number.to_string(), kind];
    cells.extend(details.into_iter().map(value_or_dash));
    cells.extend(amounts.into_iter().map(format_currency));
    IncomeRow {
        cells,
        total: false,
    }
}

/// JUMLAH row built from the record's recap fields, present only when at
/// least one of them has a value.
fn total_row(record: &FlatRecord, fields: &[&str; 3]) -> Option<IncomeRow> {
    if fields.iter().all(|name| record.field(name).is_absent()) {
        return None;
    }
    let mut cells = vec![TOTAL_LABEL.to_string(), String::new(), String::new(), String::new()];
    cells.extend(fields.iter().map(|name| format_currency(record.get(name))));
    Some(IncomeRow { cells, total: true })
}
