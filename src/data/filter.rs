use super::model::Table;

// ---------------------------------------------------------------------------
// Row selection: labeled vs unlabeled rows
// ---------------------------------------------------------------------------

/// Two disjoint index sets covering every row of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    /// Rows whose label cell is present and non-null.
    pub labeled: Vec<usize>,
    /// Rows whose label cell is null, NaN, or absent.
    pub unlabeled: Vec<usize>,
}

/// Split row indices by whether `label_column` holds a value.
///
/// A row passes into `labeled` when:
/// * The row has a cell for `label_column`, and
/// * That cell is not null (NaN floats count as null)
///
/// Everything else lands in `unlabeled`. Both lists keep table order.
pub fn partition_by_label(table: &Table, label_column: &str) -> RowSelection {
    let mut selection = RowSelection::default();
    for (i, cell) in table.column(label_column).enumerate() {
        if cell.is_null() {
            selection.unlabeled.push(i);
        } else {
            selection.labeled.push(i);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    #[test]
    fn partition_is_disjoint_and_ordered() {
        let labels = [
            Some(CellValue::Integer(1)),
            Some(CellValue::Null),
            None,
            Some(CellValue::Float(f64::NAN)),
            Some(CellValue::Integer(0)),
        ];
        let rows = labels
            .iter()
            .map(|label| {
                let mut row = Row::default();
                if let Some(v) = label {
                    row.cells.insert("label".into(), v.clone());
                }
                row
            })
            .collect();
        let table = Table::new(vec!["label".into()], rows);

        let selection = partition_by_label(&table, "label");
        assert_eq!(selection.labeled, vec![0, 4]);
        assert_eq!(selection.unlabeled, vec![1, 2, 3]);
    }
}
