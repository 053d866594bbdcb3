use susenas_viewer::{
    record::FlatRecord,
    table::{Emphasis, render_record, render_table, render_view_table},
    value::Value,
    view::{RecordView, food_table, section_table},
};

#[test]
fn render_table_aligns_columns() {
    let headers = vec!["Row".to_string(), "K3".to_string()];
    let rows = vec![
        vec!["R1".to_string(), "25,000".to_string()],
        vec!["R16 (JUMLAH)".to_string(), "175,000".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Row           K3",
            "------------  -------",
            "R1            25,000",
            "R16 (JUMLAH)  175,000",
        ]
    );
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = vec!["Komoditi".to_string()];
    let rows = vec![vec!["Beras\nlokal\tkualitas".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "Beras lokal kualitas");
}

#[test]
fn empty_view_table_prints_its_message() {
    let rendered = render_view_table(&food_table(&[]), Emphasis::Marker);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Blok IV.1 - Pengeluaran Makanan (Seminggu)",
            "Tidak ada data pengeluaran makanan.",
        ]
    );
}

#[test]
fn ansi_emphasis_keeps_total_rows_aligned() {
    let record: FlatRecord = [
        ("B6R1", Some(Value::Integer(1_000))),
        ("B6R8", Some(Value::Integer(2_500_000))),
    ]
    .into_iter()
    .collect();
    let view = RecordView::build(&record, &[], &[], &[]);
    let table = &view.section_groups[0].tables[0];
    assert_eq!(table, &section_table("B6", &record_rows(&record)));

    let rendered = render_view_table(table, Emphasis::Ansi);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[3], "R1           1,000");
    assert_eq!(
        lines[4],
        "\u{1b}[1mR8 (JUMLAH)\u{1b}[0m  \u{1b}[1m2,500,000\u{1b}[0m"
    );
}

#[test]
fn record_text_starts_with_identity_and_groups_sections() {
    let record: FlatRecord = [
        ("R110", Some(Value::from("Siti"))),
        ("B432R1K3", Some(Value::Integer(10))),
        ("B7R8", Some(Value::Integer(20))),
    ]
    .into_iter()
    .collect();
    let view = RecordView::build(&record, &[], &[], &[]);

    let rendered = render_record(&view, Emphasis::Marker);

    assert!(rendered.starts_with("Identitas Rumah Tangga\n"));
    assert!(rendered.contains("Nama KRT: Siti"));
    let recap = rendered
        .find("== Blok IV - Pengeluaran (Rekapitulasi) ==")
        .expect("expenditure group header");
    let job = rendered
        .find("Blok V.A - Pendapatan Pekerjaan Utama")
        .expect("job income table");
    let closing = rendered
        .find("== Blok VI dan VII - Pengeluaran dan Pendapatan ==")
        .expect("closing group header");
    assert!(recap < job && job < closing);
    assert!(rendered.contains("* R8 (JUMLAH)"));
}

fn record_rows(record: &FlatRecord) -> susenas_viewer::sections::RowTable {
    susenas_viewer::sections::build_section_tables(record)
        .remove("B6")
        .expect("B6 rows")
}
