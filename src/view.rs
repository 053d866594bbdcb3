//! Assembly of a household record into titled display tables.
//!
//! [`RecordView::build()`] runs every projection over one loaded record and
//! returns plain strings ready for any renderer: the text table printer in
//! [`crate::table`] and the JSON output of the `show` command both consume it.

use serde::Serialize;

use crate::{
    commodity::{
        CommodityBuckets, CommodityLine, PersonSequence, other_columns_summary, split_commodities,
    },
    format::{DASH, format_currency, format_number},
    identity::{IdentityField, identity_fields},
    income::{
        BUSINESS_HEADERS, BusinessIncomeLine, IncomeRow, JOB_HEADERS, JobIncomeLine,
        business_income_rows, job_income_rows,
    },
    layout::{self, SectionGroup},
    record::FlatRecord,
    sections::{RowTable, SectionTable, build_section_tables, section_columns},
};

const TOTAL_SUFFIX: &str = " (JUMLAH)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    pub cells: Vec<String>,
    pub total: bool,
}

impl ViewRow {
    fn plain(cells: Vec<String>) -> Self {
        Self {
            cells,
            total: false,
        }
    }
}

impl From<IncomeRow> for ViewRow {
    fn from(row: IncomeRow) -> Self {
        Self {
            cells: row.cells,
            total: row.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewTable {
    pub title: String,
    /// Questionnaire section the table was projected from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<ViewRow>,
    /// Shown instead of the table when `rows` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl ViewTable {
    fn new(title: impl Into<String>, headers: &[&str], rows: Vec<ViewRow>) -> Self {
        Self {
            title: title.into(),
            section: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            empty_message: None,
        }
    }

    fn or_empty(mut self, message: &str) -> Self {
        if self.rows.is_empty() {
            self.empty_message = Some(message.to_string());
        }
        self
    }
}

/// Section tables of one display group, in section id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionGroupView {
    pub group: SectionGroup,
    pub title: String,
    pub tables: Vec<ViewTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub identity: Vec<IdentityField>,
    pub food: ViewTable,
    pub individual_food: ViewTable,
    pub non_food: ViewTable,
    pub job_income: ViewTable,
    pub business_income: ViewTable,
    pub section_groups: Vec<SectionGroupView>,
}

impl RecordView {
    pub fn build(
        record: &FlatRecord,
        commodities: &[CommodityLine],
        job_lines: &[JobIncomeLine],
        business_lines: &[BusinessIncomeLine],
    ) -> Self {
        let buckets = split_commodities(commodities);
        let sections = build_section_tables(record);
        Self::from_parts(record, &buckets, &sections, job_lines, business_lines)
    }

    pub fn from_parts(
        record: &FlatRecord,
        buckets: &CommodityBuckets,
        sections: &SectionTable,
        job_lines: &[JobIncomeLine],
        business_lines: &[BusinessIncomeLine],
    ) -> Self {
        let job_income = ViewTable::new(
            "Blok V.A - Pendapatan Pekerjaan Utama",
            &JOB_HEADERS,
            job_income_rows(job_lines, record)
                .into_iter()
                .map(ViewRow::from)
                .collect(),
        )
        .or_empty("Tidak ada data pendapatan pekerjaan utama.");
        let business_income = ViewTable::new(
            "Blok V.B - Pendapatan Usaha Sendiri",
            &BUSINESS_HEADERS,
            business_income_rows(business_lines, record)
                .into_iter()
                .map(ViewRow::from)
                .collect(),
        )
        .or_empty("Tidak ada data pendapatan usaha sendiri.");

        Self {
            identity: identity_fields(record),
            food: food_table(&buckets.food),
            individual_food: individual_food_table(&buckets.individual_food),
            non_food: non_food_table(&buckets.non_food),
            job_income,
            business_income,
            section_groups: section_groups(sections),
        }
    }

    /// Every table in page order.
    pub fn tables(&self) -> Vec<&ViewTable> {
        let mut tables = vec![&self.food, &self.individual_food, &self.non_food];
        let group_tables = |group: SectionGroup| {
            self.section_groups
                .iter()
                .filter(move |view| view.group == group)
                .flat_map(|view| view.tables.iter())
        };
        tables.extend(group_tables(SectionGroup::ExpenditureRecap));
        tables.push(&self.job_income);
        tables.push(&self.business_income);
        tables.extend(group_tables(SectionGroup::IncomeRecap));
        tables.extend(group_tables(SectionGroup::ExpenditureAndIncome));
        tables
    }

    /// Keeps only the section tables whose id is listed.
    pub fn retain_sections(&mut self, sections: &[String]) {
        for group in &mut self.section_groups {
            group.tables.retain(|table| {
                table
                    .section
                    .as_ref()
                    .is_some_and(|section| sections.contains(section))
            });
        }
        self.section_groups.retain(|group| !group.tables.is_empty());
    }
}

const COMMODITY_HEADERS: [&str; 9] = [
    "No Urut",
    "Komoditi",
    "K1 Qty",
    "K2 Nilai",
    "K3 Qty",
    "K4 Nilai",
    "K5 Total Qty",
    "K6 Total Nilai",
    "Lainnya",
];

fn sequence_cell(line: &CommodityLine) -> String {
    line.sequence_number
        .map(|number| number.to_string())
        .unwrap_or_else(|| DASH.to_string())
}

fn text_or_dash(text: Option<&str>) -> String {
    text.filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DASH.to_string())
}

/// Quantity/value pairs of slots 1-6 as shown in the food tables.
fn food_amount_cells(line: &CommodityLine) -> Vec<String> {
    (1..=6)
        .map(|slot| {
            if slot % 2 == 1 {
                format_number(line.slot(slot))
            } else {
                format_currency(line.slot(slot))
            }
        })
        .collect()
}

pub fn food_table(lines: &[CommodityLine]) -> ViewTable {
    let rows = lines
        .iter()
        .map(|line| {
            let mut cells = vec![sequence_cell(line), text_or_dash(line.description.as_deref())];
            cells.extend(food_amount_cells(line));
            cells.push(other_columns_summary(line));
            ViewRow::plain(cells)
        })
        .collect();
    ViewTable::new(
        "Blok IV.1 - Pengeluaran Makanan (Seminggu)",
        &COMMODITY_HEADERS,
        rows,
    )
    .or_empty("Tidak ada data pengeluaran makanan.")
}

/// Individual food lines with each household member's sequence number in the
/// `ART` column. `lines` must already be sorted by person.
pub fn individual_food_table(lines: &[CommodityLine]) -> ViewTable {
    let persons = PersonSequence::assign(lines);
    let rows = lines
        .iter()
        .map(|line| {
            let mut cells = vec![
                sequence_cell(line),
                persons.label(line.person_id.as_deref()),
                text_or_dash(line.description.as_deref()),
            ];
            cells.extend(food_amount_cells(line));
            cells.push(other_columns_summary(line));
            ViewRow::plain(cells)
        })
        .collect();
    let mut headers = COMMODITY_HEADERS.to_vec();
    headers.insert(1, "ART");
    ViewTable::new(
        "Blok IV.1 - Pengeluaran Makanan Individu (Seminggu)",
        &headers,
        rows,
    )
    .or_empty("Tidak ada data pengeluaran makanan individu.")
}

pub fn non_food_table(lines: &[CommodityLine]) -> ViewTable {
    let rows = lines
        .iter()
        .map(|line| {
            ViewRow::plain(vec![
                sequence_cell(line),
                text_or_dash(line.classification_code.as_deref()),
                text_or_dash(line.description.as_deref()),
                format_number(line.slot(5)),
                format_currency(line.slot(6)),
                other_columns_summary(line),
            ])
        })
        .collect();
    ViewTable::new(
        "Blok IV.2 - Pengeluaran Non Makanan (Sebulan/Setahun)",
        &[
            "No Urut",
            "Kode COICOP",
            "Komoditi",
            "K5 Qty",
            "K6 Nilai (Rp)",
            "Lainnya",
        ],
        rows,
    )
    .or_empty("Tidak ada data pengeluaran non makanan.")
}

/// One section as a table: a `Row` label column followed by the union of the
/// section's columns. Total rows carry a `(JUMLAH)` suffix and the `total`
/// flag.
pub fn section_table(section: &str, rows: &RowTable) -> ViewTable {
    let columns = section_columns(rows);
    let row_keys = rows.keys().collect::<Vec<_>>();
    let view_rows = layout::sort_rows(section, &row_keys)
        .into_iter()
        .filter_map(|row| {
            let cells = rows.get(&row)?;
            let total = layout::is_total_row(section, &row);
            let mut label = layout::row_label(section, &row);
            if total {
                label.push_str(TOTAL_SUFFIX);
            }
            let mut out = vec![label];
            out.extend(
                columns
                    .iter()
                    .map(|column| format_currency(cells.get(column).and_then(Option::as_ref))),
            );
            Some(ViewRow { cells: out, total })
        })
        .collect();
    let mut headers = vec!["Row"];
    headers.extend(columns.iter().map(String::as_str));
    let mut table = ViewTable::new(layout::section_title(section), &headers, view_rows);
    table.section = Some(section.to_string());
    table
}

fn section_groups(sections: &SectionTable) -> Vec<SectionGroupView> {
    SectionGroup::ALL
        .iter()
        .filter_map(|&group| {
            let tables = sections
                .iter()
                .filter(|(id, _)| SectionGroup::of(id) == Some(group))
                .map(|(id, rows)| section_table(id, rows))
                .collect::<Vec<_>>();
            (!tables.is_empty()).then(|| SectionGroupView {
                group,
                title: group.title().to_string(),
                tables,
            })
        })
        .collect()
}
