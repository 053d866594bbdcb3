//! Household identity block shown at the top of a record.

use serde::Serialize;

use crate::{
    format::{DASH, value_or_dash},
    record::FlatRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityField {
    pub label: &'static str,
    pub value: String,
}

pub const START_TIME_LABEL: &str = "Waktu Mulai";

/// Label → record field, in display order. The start time is composed from
/// two fields and is inserted separately.
const IDENTITY_FIELDS: &[(&str, &str)] = &[
    ("Provinsi", "Prop"),
    ("Kabupaten", "Kab"),
    ("Kecamatan", "Kec"),
    ("Desa", "Desa"),
    ("Klasifikasi", "Klasifikasi"),
    ("SLS", "SLS"),
    ("NKS", "NKS"),
    ("No. Urut", "Nurt"),
    ("NBS", "NBS"),
    ("NUBF", "NUBF"),
    ("Nama KRT", "R110"),
    ("Alamat", "Alamat"),
    ("Semester", "Semester"),
    ("Kode Pencacah", "KodePencacah"),
    ("Kode Pengawas", "KodePengawas"),
];

/// Two-column layout of the identity block; `None` leaves the right cell
/// blank.
pub const IDENTITY_PAIRS: &[(&str, Option<&str>)] = &[
    ("Provinsi", Some("Kabupaten")),
    ("Kecamatan", Some("Desa")),
    ("Klasifikasi", Some("SLS")),
    ("NKS", Some("No. Urut")),
    ("NBS", Some("NUBF")),
    ("Nama KRT", None),
    ("Alamat", None),
    ("Semester", Some(START_TIME_LABEL)),
    ("Kode Pencacah", Some("Kode Pengawas")),
];

pub fn identity_fields(record: &FlatRecord) -> Vec<IdentityField> {
    let mut fields = IDENTITY_FIELDS
        .iter()
        .map(|&(label, name)| IdentityField {
            label,
            value: value_or_dash(record.get(name)),
        })
        .collect::<Vec<_>>();
    let start = fields
        .iter()
        .position(|field| field.label == "Semester")
        .map_or(fields.len(), |idx| idx + 1);
    fields.insert(
        start,
        IdentityField {
            label: START_TIME_LABEL,
            value: start_time(record),
        },
    );
    fields
}

/// `JamMulai:MenitMulai` with two-digit minutes. A missing or non-numeric
/// minute counts as zero.
pub fn start_time(record: &FlatRecord) -> String {
    let Some(hour) = record.get("JamMulai") else {
        return DASH.to_string();
    };
    let minute = record
        .get("MenitMulai")
        .and_then(|value| value.as_i64())
        .unwrap_or(0);
    format!("{hour}:{minute:02}")
}

/// Identity fields arranged as `(left, right)` display pairs.
pub fn identity_pairs(fields: &[IdentityField]) -> Vec<(&IdentityField, Option<&IdentityField>)> {
    let lookup = |label: &str| fields.iter().find(|field| field.label == label);
    IDENTITY_PAIRS
        .iter()
        .filter_map(|&(left, right)| {
            let left = lookup(left)?;
            Some((left, right.and_then(lookup)))
        })
        .collect()
}
