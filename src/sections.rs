//! Projection of a flat record into per-section row/column tables.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::{fields, layout, record::FlatRecord, value::Value};

pub type ColumnCells = BTreeMap<String, Option<Value>>;
pub type RowTable = BTreeMap<String, ColumnCells>;
pub type SectionTable = BTreeMap<String, RowTable>;

/// Groups every recognized section field of `record` into its section's
/// row → column → value table.
///
/// Sections whose fields are all absent are left out, as are sections where
/// no field yields a populated cell.
pub fn build_section_tables(record: &FlatRecord) -> SectionTable {
    let mut raw: BTreeMap<&str, Vec<(&str, Option<&Value>)>> = BTreeMap::new();
    for (name, value) in record.iter() {
        if let Some(section) = fields::classify_section(name) {
            raw.entry(section).or_default().push((name, value));
        }
    }

    let mut tables = SectionTable::new();
    for (section, entries) in raw {
        if entries.iter().all(|(_, value)| value.is_none()) {
            continue;
        }
        let rows = build_rows(section, &entries);
        if rows.values().flat_map(|cells| cells.values()).any(Option::is_some) {
            tables.insert(section.to_string(), rows);
        } else {
            debug!("Section {section} has no populated cells after address parsing");
        }
    }
    tables
}

fn build_rows(section: &str, entries: &[(&str, Option<&Value>)]) -> RowTable {
    let mut rows = RowTable::new();
    for (name, value) in entries {
        let Some(address) = fields::parse_address(&name[section.len()..]) else {
            debug!("Skipping unaddressable field {name}");
            continue;
        };
        rows.entry(address.row)
            .or_default()
            .insert(address.column, value.cloned());
    }
    rows
}

/// Union of the column keys used by any row of a section, in column order.
pub fn section_columns(rows: &RowTable) -> Vec<String> {
    let columns = rows
        .values()
        .flat_map(|cells| cells.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    layout::sort_columns(&columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, Option<Value>)]) -> FlatRecord {
        entries.iter().cloned().collect()
    }

    #[test]
    fn build_section_tables_groups_by_section_and_row() {
        let tables = build_section_tables(&record(&[
            ("B432R1K3", Some(Value::Integer(10))),
            ("B432R1K4", Some(Value::Integer(20))),
            ("B432R2K3", None),
            ("B6R8", Some(Value::Integer(7))),
            ("Kab", Some(Value::from("01"))),
        ]));

        assert_eq!(tables.len(), 2);
        let b432 = &tables["B432"];
        assert_eq!(b432["1"]["K3"], Some(Value::Integer(10)));
        assert_eq!(b432["1"]["K4"], Some(Value::Integer(20)));
        assert_eq!(b432["2"]["K3"], None);
        assert_eq!(tables["B6"]["8"]["K4"], Some(Value::Integer(7)));
    }

    #[test]
    fn build_section_tables_drops_all_absent_sections() {
        let tables = build_section_tables(&record(&[
            ("B7R1", None),
            ("B7R2", None),
            ("B5CR1K3", Some(Value::Integer(1))),
        ]));
        assert!(!tables.contains_key("B7"));
        assert!(tables.contains_key("B5C"));
    }

    #[test]
    fn build_section_tables_drops_sections_without_addressable_values() {
        let tables = build_section_tables(&record(&[
            ("B431", Some(Value::Integer(3))),
            ("B431R1K2", None),
        ]));
        assert!(tables.is_empty());
    }

    #[test]
    fn section_columns_sorts_union_numerically() {
        let tables = build_section_tables(&record(&[
            ("B5DR1K10", Some(Value::Integer(1))),
            ("B5DR2K3", Some(Value::Integer(2))),
            ("B5DR2K4", None),
        ]));
        assert_eq!(section_columns(&tables["B5D"]), vec!["K3", "K4", "K10"]);
    }
}
