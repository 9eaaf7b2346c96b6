use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Serialize;

use super::model::Table;

/// Name of the column whose values are copied into the output `id` field.
pub const ID_COLUMN: &str = "id";

/// One line of the submission file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub id: String,
    pub prediction: u8,
}

/// Pair each prediction with its row id.
///
/// Ids come from the table's `id` column when it exists, otherwise they are
/// the 1-based row position. Uniqueness is not checked.
pub fn assemble_records(table: &Table, predictions: &[u8]) -> Result<Vec<OutputRecord>> {
    ensure!(
        predictions.len() == table.len(),
        "got {} predictions for {} rows",
        predictions.len(),
        table.len()
    );

    let ids: Vec<String> = if table.has_column(ID_COLUMN) {
        table.column(ID_COLUMN).map(|cell| cell.to_text()).collect()
    } else {
        (1..=table.len()).map(|i| i.to_string()).collect()
    };

    Ok(ids
        .into_iter()
        .zip(predictions)
        .map(|(id, &prediction)| OutputRecord { id, prediction })
        .collect())
}

/// Write `id,prediction` rows to `path`, replacing any existing file.
pub fn write_submission(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    if records.is_empty() {
        writer
            .write_record(["id", "prediction"])
            .context("writing CSV header")?;
    }
    for record in records {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}
