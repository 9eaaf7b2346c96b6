use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // `{:?}` keeps the decimal point on integral floats ("3.0").
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Missing cell. NaN floats count as missing, as they do in Pandas.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, CellValue::String(_))
    }

    /// Render the cell as plain text (classifier input, CSV field): nulls
    /// become the empty string.
    pub fn to_text(&self) -> String {
        if self.is_null() {
            String::new()
        } else {
            self.to_string()
        }
    }

    /// Cast to an integer the way `astype(int)` would.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            CellValue::Bool(b) => Some(i64::from(*b)),
            CellValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// One row of the source table: column_name → value.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// Cell for `column`; absent columns read as null.
    pub fn get(&self, column: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.cells.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table. Column order follows the source file.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Row>,
    pub column_names: Vec<String>,
}

impl Table {
    /// Build a table from rows and the column order seen in the source.
    ///
    /// Columns that appear in rows but not in `column_names` are appended
    /// in sorted order so no cell is ever unreachable.
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        let seen: BTreeSet<String> = column_names.iter().cloned().collect();
        let mut column_names = column_names;
        let mut extra: BTreeSet<String> = BTreeSet::new();
        for row in &rows {
            for col in row.cells.keys() {
                if !seen.contains(col) {
                    extra.insert(col.clone());
                }
            }
        }
        column_names.extend(extra);
        Table { rows, column_names }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Iterate the cells of one column in row order.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Column rendered as classifier input, one string per row.
    pub fn text_values(&self, column: &str) -> Vec<String> {
        self.column(column).map(CellValue::to_text).collect()
    }

    /// Whether a column holds only strings (ignoring nulls) and at least one.
    pub fn is_string_column(&self, column: &str) -> bool {
        let mut any = false;
        for cell in self.column(column) {
            if cell.is_null() {
                continue;
            }
            if !cell.is_string() {
                return false;
            }
            any = true;
        }
        any
    }
}
