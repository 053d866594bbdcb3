//! Static section catalog plus row ordering and labelling rules.
//!
//! Sections `B5E` and `B5G` list rows 11-15 as sub-items of row 1; those rows
//! sort between rows 1 and 2 and are labelled `R1.1`..`R1.5`.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

const SECTION_TITLES: &[(&str, &str)] = &[
    ("B431", "Blok IV.3.1 - Pengeluaran"),
    ("B432", "Blok IV.3.2 - Pengeluaran Makanan Seminggu"),
    ("B433", "Blok IV.3.3 - Pengeluaran Non Makanan"),
    ("B5A", "Blok V.A - Jumlah Pendapatan Pekerjaan"),
    ("B5B", "Blok V.B - Jumlah Pendapatan Usaha"),
    ("B5C", "Blok V.C - Pendapatan dari Sumber Lain"),
    ("B5D", "Blok V.D - Penerimaan"),
    ("B5E", "Blok V.E - Penerimaan Lainnya"),
    ("B5F", "Blok V.F - Pengiriman Uang/Barang"),
    ("B5G", "Blok V.G - Pengeluaran Bukan Konsumsi"),
    ("B6", "Blok VI - Pengeluaran dan Pendapatan"),
    ("B7", "Blok VII - Pendapatan dan Pengeluaran"),
];

const TOTAL_ROWS: &[(&str, &[&str])] = &[
    ("B432", &["15", "16"]),
    ("B433", &["15", "16"]),
    ("B6", &["7", "8"]),
    ("B7", &["7", "8"]),
    ("B5E", &["6"]),
    ("B5F", &["6"]),
    ("B5G", &["6"]),
];

const SUB_ROW_SECTIONS: &[&str] = &["B5E", "B5G"];
const SUB_ROWS: &[&str] = &["11", "12", "13", "14", "15"];

/// Display groups for section tables, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionGroup {
    ExpenditureRecap,
    IncomeRecap,
    ExpenditureAndIncome,
}

impl SectionGroup {
    pub const ALL: [SectionGroup; 3] = [
        SectionGroup::ExpenditureRecap,
        SectionGroup::IncomeRecap,
        SectionGroup::ExpenditureAndIncome,
    ];

    pub fn of(section: &str) -> Option<SectionGroup> {
        match section {
            "B431" | "B432" | "B433" => Some(SectionGroup::ExpenditureRecap),
            "B5C" | "B5D" | "B5E" | "B5F" | "B5G" => Some(SectionGroup::IncomeRecap),
            "B6" | "B7" => Some(SectionGroup::ExpenditureAndIncome),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionGroup::ExpenditureRecap => "Blok IV - Pengeluaran (Rekapitulasi)",
            SectionGroup::IncomeRecap => "Blok V.C-G - Pendapatan dan Penerimaan (Rekapitulasi)",
            SectionGroup::ExpenditureAndIncome => "Blok VI dan VII - Pengeluaran dan Pendapatan",
        }
    }
}

pub fn section_title(section: &str) -> &str {
    SECTION_TITLES
        .iter()
        .find(|(id, _)| *id == section)
        .map(|(_, title)| *title)
        .unwrap_or(section)
}

pub fn total_rows(section: &str) -> &'static [&'static str] {
    TOTAL_ROWS
        .iter()
        .find(|(id, _)| *id == section)
        .map(|(_, rows)| *rows)
        .unwrap_or(&[])
}

pub fn is_total_row(section: &str, row: &str) -> bool {
    total_rows(section).contains(&row)
}

pub fn has_sub_rows(section: &str) -> bool {
    SUB_ROW_SECTIONS.contains(&section)
}

fn is_sub_row(section: &str, row: &str) -> bool {
    has_sub_rows(section) && SUB_ROWS.contains(&row)
}

/// Leading integer of a row key; rows without one count as 0.
fn row_number(row: &str) -> u64 {
    row.chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// First run of digits in a column key (`K12` -> 12).
fn column_number(column: &str) -> u64 {
    column
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

fn row_sort_key(section: &str, row: &str) -> f64 {
    let number = row_number(row) as f64;
    if is_sub_row(section, row) {
        1.0 + (number - 10.0) / 10.0
    } else {
        number
    }
}

/// Orders row keys for display. Rows with equal keys keep their input order.
pub fn sort_rows<S: AsRef<str>>(section: &str, rows: &[S]) -> Vec<String> {
    rows.iter()
        .map(AsRef::<str>::as_ref)
        .sorted_by(|a, b| {
            row_sort_key(section, a)
                .partial_cmp(&row_sort_key(section, b))
                .unwrap_or(Ordering::Equal)
        })
        .map(str::to_string)
        .collect()
}

pub fn row_label(section: &str, row: &str) -> String {
    if is_sub_row(section, row) {
        format!("R1.{}", row_number(row) - 10)
    } else {
        format!("R{row}")
    }
}

/// Orders `K<n>` column keys by their number.
pub fn sort_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns
        .iter()
        .map(AsRef::<str>::as_ref)
        .sorted_by_key(|column| column_number(column))
        .map(str::to_string)
        .collect()
}
