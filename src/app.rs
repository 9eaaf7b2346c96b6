use anyhow::{Context, Result, bail};

use crate::config::RunConfig;
use crate::data::loader::load_file;
use crate::data::writer::{assemble_records, write_submission};
use crate::predict::columns::{resolve_label_column, resolve_text_column};
use crate::predict::{self, Strategy};

// ---------------------------------------------------------------------------
// Batch run: load → resolve columns → predict → write
// ---------------------------------------------------------------------------

/// Summary of a finished run.
#[derive(Debug)]
pub struct RunReport {
    pub text_column: String,
    pub rows: usize,
    pub strategy: Strategy,
}

/// Execute one run. Every fatal condition is checked before the output file
/// is touched.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    if !config.input.exists() {
        bail!("Input file not found: {}", config.input.display());
    }

    let table = load_file(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    log::debug!(
        "Loaded {} rows, columns: {:?}",
        table.len(),
        table.column_names
    );
    if table.is_empty() {
        log::warn!("{} has no data rows; output will hold the header only", config.input.display());
    }

    let text_column = resolve_text_column(
        &table,
        config.text_column.as_deref(),
        config.predictor.text_candidates,
    )?;
    log::info!("Using text column: {text_column}");

    let label_column = resolve_label_column(&table, config.label_column.as_deref());
    if let (Some(requested), None) = (config.label_column.as_deref(), label_column) {
        log::warn!("Label column '{requested}' not found in input");
    }

    let predictions = predict::predict(&table, &text_column, label_column, &config.predictor);
    let records = assemble_records(&table, &predictions.values)?;
    write_submission(&config.output, &records)?;
    log::info!("Wrote {}", config.output.display());

    Ok(RunReport {
        text_column,
        rows: records.len(),
        strategy: predictions.strategy,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::PredictorConfig;

    fn config(input: &Path, output: &Path) -> RunConfig {
        RunConfig {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            text_column: None,
            label_column: None,
            predictor: PredictorConfig::default(),
        }
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let err = run(&config(&PathBuf::from("/no/such/file.xlsx"), &output)).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!output.exists());
    }

    #[test]
    fn unresolvable_text_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("numbers.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,score\n1,0.5\n2,0.7\n").unwrap();

        let err = run(&config(&input, &output)).unwrap_err();
        assert!(err.to_string().contains("score"));
        assert!(!output.exists());
    }

    #[test]
    fn heuristic_run_writes_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("jobs.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "id,title,description\n17,a,Java lead wanted\n4,b,Blue sky today\n9,c,\n",
        )
        .unwrap();

        let mut cfg = config(&input, &output);
        cfg.label_column = Some("label".into());
        let report = run(&cfg).unwrap();

        assert_eq!(report.text_column, "description");
        assert_eq!(report.rows, 3);
        assert_eq!(report.strategy, Strategy::Heuristic { fallback: None });
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "id,prediction\n17,1\n4,0\n9,0\n"
        );
    }

    #[test]
    fn header_only_input_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,text\n").unwrap();

        let report = run(&config(&input, &output)).unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "id,prediction\n");
    }
}
