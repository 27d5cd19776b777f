use super::{cell_text, Record};

/// Default file name offered by the save dialog.
pub const CSV_FILE_NAME: &str = "invoice_data.csv";

/// Serializes the accumulated records to CSV text.
///
/// Columns come from the first record only. A later record can carry
/// fields the first one lacks; those are not exported, while the results
/// table does show them. That asymmetry is intentional and pinned by
/// tests. Every cell is double-quoted with internal quotes doubled, so
/// embedded commas, quotes and newlines survive a standard CSV parser.
pub fn to_csv(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let columns: Vec<&String> = first.keys().collect();

    let mut csv = String::new();
    append_row(&mut csv, columns.iter().map(|c| c.as_str().to_string()));
    for record in records {
        append_row(
            &mut csv,
            columns.iter().map(|column| cell_text(record.get(*column))),
        );
    }
    csv
}

fn append_row(csv: &mut String, cells: impl Iterator<Item = String>) {
    let row = cells
        .map(|cell| quote(&cell))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&row);
    csv.push('\n');
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
