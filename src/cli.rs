use std::path::PathBuf;

use clap::Parser;

use crate::config::{PredictorConfig, RunConfig};

/// Create an `id,prediction` submission CSV from a spreadsheet of text rows.
///
/// With `--label-col`, rows that carry a label train a TF-IDF + logistic
/// regression model that then scores every row. Otherwise a keyword
/// heuristic is used.
#[derive(Parser, Debug)]
#[command(name = "generate-submission", version)]
pub struct Cli {
    /// Spreadsheet to read (.xlsx, .xls, .ods, .csv, .json, .parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path (overwritten if it exists)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Column holding the text to score (default: autodetect)
    #[arg(long)]
    pub text_col: Option<String>,

    /// Column holding 0/1 labels; enables supervised training when present
    #[arg(long)]
    pub label_col: Option<String>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            input: cli.input,
            output: cli.output,
            text_column: cli.text_col,
            label_column: cli.label_col,
            predictor: PredictorConfig::default(),
        }
    }
}
