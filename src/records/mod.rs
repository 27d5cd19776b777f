pub mod csv;

use serde_json::Value;

/// One structured result returned by the extraction service for one
/// uploaded document. Field names vary between documents; nothing forces
/// two records to share a schema. serde_json's `preserve_order` feature
/// keeps fields in the order the service returned them.
pub type Record = serde_json::Map<String, Value>;

/// Union of field names across all records, in first-seen order. Later
/// records may introduce columns earlier ones lack; those columns append
/// at the end rather than reordering anything already seen.
pub fn column_union(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Textual form of one cell. Missing and null fields are empty; strings
/// pass through unquoted; lists (and nested objects) use their JSON text,
/// which keeps list order visible as a bracketed form.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().expect("test record must be an object").clone()
    }

    #[test]
    fn columns_are_the_first_seen_order_union() {
        let records = vec![
            record(json!({"invoice_no": "1", "total": 10})),
            record(json!({"invoice_no": "2", "vendor": "Acme", "total": 20})),
            record(json!({"due_date": "2024-01-01"})),
        ];
        assert_eq!(
            column_union(&records),
            vec!["invoice_no", "total", "vendor", "due_date"]
        );
    }

    #[test]
    fn column_union_is_idempotent() {
        let records = vec![
            record(json!({"b": 1, "a": 2})),
            record(json!({"c": 3, "a": 4})),
        ];
        assert_eq!(column_union(&records), column_union(&records));
        assert_eq!(column_union(&records), vec!["b", "a", "c"]);
    }

    #[test]
    fn no_records_means_no_columns() {
        assert!(column_union(&[]).is_empty());
    }

    #[test]
    fn cells_render_scalars_lists_and_gaps() {
        let rec = record(json!({
            "invoice_no": "INV-7",
            "total": 42.5,
            "items": ["paper", "ink"],
            "notes": null
        }));
        assert_eq!(cell_text(rec.get("invoice_no")), "INV-7");
        assert_eq!(cell_text(rec.get("total")), "42.5");
        assert_eq!(cell_text(rec.get("items")), r#"["paper","ink"]"#);
        assert_eq!(cell_text(rec.get("notes")), "");
        assert_eq!(cell_text(rec.get("missing")), "");
    }
}
