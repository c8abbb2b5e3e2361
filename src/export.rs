//! Delimited-text export of the augmented table.

use crate::error::Result;
use crate::table::Table;
use std::io::Write;
use std::path::Path;

/// Escape a field for comma-delimited output (commas, quotes, newlines).
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize every column, derived ones included, with a header row.
/// Categorical columns are written as their label text. Re-running
/// overwrites the file.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut out = String::new();
    let header: Vec<String> = table.names().iter().map(|n| escape_field(n)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in 0..table.row_count() {
        let fields: Vec<String> = table
            .iter()
            .map(|(_, column)| escape_field(&column.display_value(row)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    tracing::debug!(path = %path.display(), rows = table.row_count(), "table exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_delimited;
    use crate::table::{Column, Table};
    use tempfile::TempDir;

    fn labeled_table() -> Table {
        let mut t = Table::new();
        t.add_column(
            "name",
            Column::Categorical(vec!["plain".into(), "with, comma".into(), "with \"quote\"".into()]),
        )
        .unwrap();
        t.add_column("x", Column::Numeric(vec![1.5, 2.0, 3.25])).unwrap();
        t
    }

    #[test]
    fn test_export_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&labeled_table(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("name,x"));
        assert_eq!(lines.next(), Some("plain,1.5"));
        assert_eq!(lines.next(), Some("\"with, comma\",2"));
    }

    #[test]
    fn test_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let original = labeled_table();
        write_csv(&original, &path).unwrap();

        let read_back = parse_delimited(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back.row_count(), original.row_count());
        assert_eq!(read_back.column_count(), original.column_count());
        assert_eq!(
            read_back.categorical("name").unwrap(),
            original.categorical("name").unwrap()
        );
    }

    #[test]
    fn test_export_overwrites_idempotently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&labeled_table(), &path).unwrap();
        write_csv(&labeled_table(), &path).unwrap();
        let read_back = parse_delimited(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back.row_count(), 3);
    }

    #[test]
    fn test_export_fails_on_unwritable_path() {
        let err = write_csv(&labeled_table(), Path::new("/no-such-dir/out.csv"));
        assert!(err.is_err());
    }
}
