//! Plain-text rendering of record views.
//!
//! Columns are padded to their widest cell; ANSI escape sequences do not
//! count towards the width, so emphasized total rows stay aligned.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    identity::identity_pairs,
    view::{RecordView, ViewRow, ViewTable},
};

const BOLD: &str = "\u{1b}[1m";
const RESET: &str = "\u{1b}[0m";
/// Marker prefixed to total rows when ANSI emphasis is off.
const TOTAL_MARKER: &str = "* ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Ansi,
    Marker,
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();

    let header_line = format_row(headers, &widths);
    let _ = writeln!(output, "{header_line}");

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let separator_line = format_row(&separator_cells, &separator_widths);
    let _ = writeln!(output, "{separator_line}");

    for row in rows {
        let row_line = format_row(row, &widths);
        let _ = writeln!(output, "{row_line}");
    }

    output
}

/// Renders one view table under its title, or its empty message when it has
/// no rows.
pub fn render_view_table(table: &ViewTable, emphasis: Emphasis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", table.title);
    if table.rows.is_empty() {
        if let Some(message) = &table.empty_message {
            let _ = writeln!(output, "{message}");
        }
        return output;
    }
    let rows = table
        .rows
        .iter()
        .map(|row| emphasize(row, emphasis))
        .collect::<Vec<_>>();
    output.push_str(&render_table(&table.headers, &rows));
    output
}

pub fn render_record(view: &RecordView, emphasis: Emphasis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Identitas Rumah Tangga");
    let pairs = identity_pairs(&view.identity)
        .into_iter()
        .map(|(left, right)| {
            vec![
                format!("{}: {}", left.label, left.value),
                right
                    .map(|field| format!("{}: {}", field.label, field.value))
                    .unwrap_or_default(),
            ]
        })
        .collect::<Vec<_>>();
    output.push_str(&render_rows(&pairs));

    let mut current_group = None;
    for table in view.tables() {
        let group = view
            .section_groups
            .iter()
            .find(|group| group.tables.iter().any(|t| std::ptr::eq(t, table)));
        if let Some(group) = group
            && current_group != Some(group.group)
        {
            let _ = writeln!(output, "\n== {} ==", group.title);
            current_group = Some(group.group);
        }
        output.push('\n');
        output.push_str(&render_view_table(table, emphasis));
    }
    output
}

pub fn print_record(view: &RecordView, emphasis: Emphasis) {
    print!("{}", render_record(view, emphasis));
}

/// Aligned rows without header or separator.
fn render_rows(rows: &[Vec<String>]) -> String {
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![1usize; column_count];
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }
    let mut output = String::new();
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

fn emphasize(row: &ViewRow, emphasis: Emphasis) -> Vec<String> {
    if !row.total {
        return row.cells.clone();
    }
    match emphasis {
        Emphasis::Ansi => row
            .cells
            .iter()
            .map(|cell| format!("{BOLD}{cell}{RESET}"))
            .collect(),
        Emphasis::Marker => row
            .cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                if idx == 0 {
                    format!("{TOTAL_MARKER}{cell}")
                } else {
                    cell.clone()
                }
            })
            .collect(),
    }
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let display = display_width(sanitized.as_ref());
        let mut cell = sanitized.into_owned();
        let padding = widths
            .get(idx)
            .copied()
            .unwrap_or_default()
            .saturating_sub(display);
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| match ch {
                    '\n' | '\r' | '\t' => ' ',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}
