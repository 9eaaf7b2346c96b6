use thiserror::Error;

use crate::data::model::Table;

/// Text column could not be determined.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnError {
    #[error("text column '{requested}' not found; columns found: {available:?}")]
    Missing {
        requested: String,
        available: Vec<String>,
    },
    #[error("no text column found, pass --text-col; columns found: {available:?}")]
    NotDetected { available: Vec<String> },
}

/// Pick the text column: an explicit name wins, then the first candidate
/// name present, then the first column holding only strings.
pub fn resolve_text_column(
    table: &Table,
    explicit: Option<&str>,
    candidates: &[&str],
) -> Result<String, ColumnError> {
    match explicit {
        Some(name) if table.has_column(name) => Ok(name.to_string()),
        Some(name) => Err(ColumnError::Missing {
            requested: name.to_string(),
            available: table.column_names.clone(),
        }),
        None => detect_text_column(table, candidates).ok_or_else(|| ColumnError::NotDetected {
            available: table.column_names.clone(),
        }),
    }
}

pub fn detect_text_column(table: &Table, candidates: &[&str]) -> Option<String> {
    if let Some(name) = candidates.iter().find(|c| table.has_column(c)) {
        return Some(name.to_string());
    }
    table
        .column_names
        .iter()
        .find(|c| table.is_string_column(c))
        .cloned()
}

/// The label column is never guessed: it must be named and must exist.
pub fn resolve_label_column<'a>(table: &Table, requested: Option<&'a str>) -> Option<&'a str> {
    requested.filter(|name| table.has_column(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEXT_COLUMN_CANDIDATES;
    use crate::data::model::{CellValue, Row};

    fn table(columns: &[(&str, CellValue)]) -> Table {
        let mut row = Row::default();
        for (name, value) in columns {
            row.cells.insert(name.to_string(), value.clone());
        }
        Table::new(columns.iter().map(|(n, _)| n.to_string()).collect(), vec![row])
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    #[test]
    fn literal_text_column_wins() {
        let t = table(&[
            ("content", s("a")),
            ("prompt", s("b")),
            ("title", s("c")),
            ("text", s("d")),
        ]);
        assert_eq!(detect_text_column(&t, TEXT_COLUMN_CANDIDATES).as_deref(), Some("text"));
    }

    #[test]
    fn candidate_priority_beats_scan_order() {
        let t = table(&[("title", s("a")), ("query", s("b")), ("description", CellValue::Integer(3))]);
        assert_eq!(
            detect_text_column(&t, TEXT_COLUMN_CANDIDATES).as_deref(),
            Some("description")
        );
    }

    #[test]
    fn falls_back_to_only_string_column() {
        let t = table(&[("id", CellValue::Integer(1)), ("body", s("hello")), ("score", CellValue::Float(0.2))]);
        assert_eq!(detect_text_column(&t, TEXT_COLUMN_CANDIDATES).as_deref(), Some("body"));
    }

    #[test]
    fn no_string_column_is_an_error_listing_columns() {
        let t = table(&[("id", CellValue::Integer(1)), ("score", CellValue::Float(0.2))]);
        let err = resolve_text_column(&t, None, TEXT_COLUMN_CANDIDATES).unwrap_err();
        assert_eq!(
            err,
            ColumnError::NotDetected {
                available: vec!["id".into(), "score".into()]
            }
        );
        assert!(err.to_string().contains("score"));
    }

    #[test]
    fn explicit_text_column_overrides_detection() {
        let t = table(&[("text", s("a")), ("notes", s("b"))]);
        assert_eq!(
            resolve_text_column(&t, Some("notes"), TEXT_COLUMN_CANDIDATES).unwrap(),
            "notes"
        );
        assert!(matches!(
            resolve_text_column(&t, Some("body"), TEXT_COLUMN_CANDIDATES),
            Err(ColumnError::Missing { .. })
        ));
    }

    #[test]
    fn label_column_must_be_named_and_present() {
        let t = table(&[("text", s("a")), ("label", CellValue::Integer(1))]);
        assert_eq!(resolve_label_column(&t, Some("label")), Some("label"));
        assert_eq!(resolve_label_column(&t, Some("target")), None);
        assert_eq!(resolve_label_column(&t, None), None);
    }
}
