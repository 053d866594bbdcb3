//! Field-name grammar for questionnaire sections.
//!
//! Record fields such as `B432R1K3` encode a section (`B432`), a row (`1`) and
//! a column (`K3`). Classification happens in two steps: [`classify_section()`]
//! recognizes the section prefix and [`parse_address()`] reads the row/column
//! address from the remaining suffix. Names that match neither step are not
//! section fields and are skipped by the table builder.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Column assigned to `R<n>` fields that carry no column of their own.
pub const SINGLE_COLUMN: &str = "K4";
/// Row assigned to `K<n>` fields that carry no row of their own.
pub const IMPLICIT_ROW: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellAddress {
    pub row: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAddress {
    pub section: String,
    pub row: String,
    pub column: String,
}

struct SectionRule {
    pattern: Regex,
    section: SectionId,
}

enum SectionId {
    Prefix(usize),
    Fixed(&'static str),
}

struct Grammar {
    sections: Vec<SectionRule>,
    row_column: Regex,
    row_only: Regex,
    column_only: Regex,
}

fn grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| Grammar {
        sections: vec![
            section_rule(r"^B43[123]", SectionId::Prefix(4)),
            section_rule(r"^B5[A-G][RK]", SectionId::Prefix(3)),
            section_rule(r"^B6R", SectionId::Fixed("B6")),
            section_rule(r"^B7R", SectionId::Fixed("B7")),
        ],
        row_column: compile(r"^R(\d+[A-Z]?)K(\d+)"),
        row_only: compile(r"^R(\d+)$"),
        column_only: compile(r"^K(\d+)"),
    })
}

fn section_rule(pattern: &str, section: SectionId) -> SectionRule {
    SectionRule {
        pattern: compile(pattern),
        section,
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern}: {err}"))
}

/// Returns the section id a field belongs to, or `None` for fields outside
/// the recognized sections.
pub fn classify_section(name: &str) -> Option<&str> {
    grammar().sections.iter().find_map(|rule| {
        if !rule.pattern.is_match(name) {
            return None;
        }
        Some(match rule.section {
            SectionId::Prefix(len) => &name[..len],
            SectionId::Fixed(id) => id,
        })
    })
}

/// Parses the address part of a field name (the name with its section id
/// stripped). Patterns are tried in order: `R<row>K<col>`, `R<row>`, then
/// `K<col>`.
pub fn parse_address(suffix: &str) -> Option<CellAddress> {
    let grammar = grammar();
    if let Some(caps) = grammar.row_column.captures(suffix) {
        return Some(CellAddress {
            row: caps[1].to_string(),
            column: format!("K{}", &caps[2]),
        });
    }
    if let Some(caps) = grammar.row_only.captures(suffix) {
        return Some(CellAddress {
            row: caps[1].to_string(),
            column: SINGLE_COLUMN.to_string(),
        });
    }
    if let Some(caps) = grammar.column_only.captures(suffix) {
        return Some(CellAddress {
            row: IMPLICIT_ROW.to_string(),
            column: format!("K{}", &caps[1]),
        });
    }
    None
}

pub fn classify_field(name: &str) -> Option<FieldAddress> {
    let section = classify_section(name)?;
    let address = parse_address(&name[section.len()..])?;
    Some(FieldAddress {
        section: section.to_string(),
        row: address.row,
        column: address.column,
    })
}
