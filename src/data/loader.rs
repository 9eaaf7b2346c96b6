use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type};
use arrow::util::display::array_value_to_string;
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`     – header row, one cell type inferred per column
/// * `.json`    – `[{ "id": 1, "text": "...", ... }, ...]`
/// * `.parquet` – Arrow-typed columns
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Read the first worksheet. The first row names the columns; blank header
/// cells become `Unnamed: <index>` and repeated names get a `.N` suffix.
fn load_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).context("opening spreadsheet")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("spreadsheet has no worksheets")?
        .context("reading first worksheet")?;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Ok(Table::new(Vec::new(), Vec::new()));
    };
    let headers = dedupe_headers(
        header
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(i, spreadsheet_value(cell).to_text()))
            .collect(),
    );

    let mut rows = Vec::with_capacity(range.height().saturating_sub(1));
    for cells in sheet_rows {
        let mut row = Row::default();
        for (col_idx, col_name) in headers.iter().enumerate() {
            let value = cells.get(col_idx).map(spreadsheet_value).unwrap_or(CellValue::Null);
            row.cells.insert(col_name.clone(), value);
        }
        rows.push(row);
    }

    normalize_integral_columns(&headers, &mut rows);
    Ok(Table::new(headers, rows))
}

fn spreadsheet_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::Date(d.to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
    }
}

/// Blank header cells are named after their position, as pandas does.
fn header_name(index: usize, name: String) -> String {
    if name.is_empty() {
        format!("Unnamed: {index}")
    } else {
        name
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    headers
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let out = if *count == 0 { name } else { format!("{name}.{count}") };
            *count += 1;
            out
        })
        .collect()
}

/// Spreadsheets store every number as a float; integral ones are read back
/// as integers so an `id` of 7 prints as `7` rather than `7.0`.
///
/// * Purely numeric columns convert only when every cell is integral and
///   none is missing (a gap keeps the column float).
/// * Columns that also hold text, booleans or dates convert cell by cell.
fn normalize_integral_columns(columns: &[String], rows: &mut [Row]) {
    for col in columns {
        let mixed = rows.iter().any(|row| {
            matches!(
                row.get(col),
                CellValue::String(_) | CellValue::Bool(_) | CellValue::Date(_)
            )
        });
        if !mixed {
            let mut has_float = false;
            let integral = rows.iter().all(|row| match row.get(col) {
                CellValue::Integer(_) => true,
                CellValue::Float(v) => {
                    has_float = true;
                    is_integral(*v)
                }
                _ => false,
            });
            if !integral || !has_float {
                continue;
            }
        }
        for row in rows.iter_mut() {
            if let Some(cell) = row.cells.get_mut(col) {
                if let CellValue::Float(v) = *cell {
                    if is_integral(v) {
                        *cell = CellValue::Integer(v as i64);
                    }
                }
            }
        }
    }
}

fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 1, "text": "Senior Java developer", "label": 1 },
///   { "id": 2, "text": "Office plants need water", "label": null },
///   ...
/// ]
/// ```
///
/// Column order is the order of first appearance across records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = Row::default();
        for (key, val) in obj {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
            row.cells.insert(key.clone(), json_to_value(val));
        }
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn json_to_value(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one record per line.
/// Each column gets one type (see [`infer_column_kind`]), so a text or id
/// column that happens to hold `007` or `2024` keeps those cells verbatim.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = dedupe_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .enumerate()
            .map(|(i, h)| header_name(i, h.to_string()))
            .collect(),
    );

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        records.push(result.with_context(|| format!("CSV row {row_no}"))?);
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|col_idx| infer_column_kind(records.iter().filter_map(|r| r.get(col_idx))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            let mut row = Row::default();
            for (col_idx, col_name) in headers.iter().enumerate() {
                let value = record
                    .get(col_idx)
                    .map(|raw| parse_cell(kinds[col_idx], raw))
                    .unwrap_or(CellValue::Null);
                row.cells.insert(col_name.clone(), value);
            }
            row
        })
        .collect();

    Ok(Table::new(headers, rows))
}

/// Missing-value markers recognised in CSV cells.
const NA_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Type shared by every non-missing cell of a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    String,
}

/// Narrowest kind that every non-missing cell parses as.
fn infer_column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let (mut all_int, mut all_float, mut all_bool) = (true, true, true);
    for raw in cells.filter(|raw| !NA_MARKERS.contains(raw)) {
        all_int &= raw.parse::<i64>().is_ok();
        all_float &= raw.parse::<f64>().is_ok();
        all_bool &= parse_bool(raw).is_some();
    }
    if all_int {
        ColumnKind::Integer
    } else if all_float {
        ColumnKind::Float
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::String
    }
}

fn parse_cell(kind: ColumnKind, raw: &str) -> CellValue {
    if NA_MARKERS.contains(&raw) {
        return CellValue::Null;
    }
    let parsed = match kind {
        ColumnKind::Integer => raw.parse().ok().map(CellValue::Integer),
        ColumnKind::Float => raw.parse().ok().map(CellValue::Float),
        ColumnKind::Bool => parse_bool(raw).map(CellValue::Bool),
        ColumnKind::String => None,
    };
    parsed.unwrap_or_else(|| CellValue::String(raw.to_string()))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Every column becomes a table column; cell types
/// follow the Arrow schema.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut row = Row::default();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell_value(batch.column(col_idx), row_idx)
                    .with_context(|| format!("Row {row_idx}: failed to read '{}'", field.name()))?;
                row.cells.insert(field.name().clone(), value);
            }
            rows.push(row);
        }
    }

    Ok(Table::new(columns, rows))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            CellValue::Date(array_value_to_string(col.as_ref(), row)?)
        }
        // Anything else (unsigned ints, decimals, nested) is kept as its
        // display string but never counts as a text column candidate.
        _ => CellValue::Date(array_value_to_string(col.as_ref(), row)?),
    };
    Ok(value)
}
