use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Fixed tuning constants
// ---------------------------------------------------------------------------

/// Column names tried, in order, before scanning for any string column.
pub const TEXT_COLUMN_CANDIDATES: &[&str] = &["text", "description", "query", "prompt", "content"];

/// Substrings that mark a row as positive for the keyword heuristic.
pub const HEURISTIC_KEYWORDS: &[&str] = &[
    "java",
    "python",
    "sql",
    "javascript",
    "react",
    "collaborat",
    "team",
    "lead",
    "manager",
    "stakeholder",
    "customer",
];

pub const MAX_FEATURES: usize = 5000;
pub const NGRAM_RANGE: (usize, usize) = (1, 2);
pub const DECISION_THRESHOLD: f64 = 0.5;
pub const MIN_TRAINING_ROWS: usize = 5;
pub const MAX_ITERATIONS: usize = 1000;
pub const REGULARIZATION_C: f64 = 1.0;
pub const TOLERANCE: f64 = 1e-4;

// ---------------------------------------------------------------------------
// PredictorConfig
// ---------------------------------------------------------------------------

/// Everything the prediction core needs besides the table itself.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub text_candidates: &'static [&'static str],
    pub keywords: &'static [&'static str],
    /// Vocabulary cap, most frequent terms first.
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths.
    pub ngram_range: (usize, usize),
    /// P(positive) at or above this is predicted as 1.
    pub threshold: f64,
    /// Below this many labeled rows the heuristic is used instead.
    pub min_training_rows: usize,
    pub max_iterations: usize,
    /// Inverse L2 regularization strength.
    pub regularization_c: f64,
    pub tolerance: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            text_candidates: TEXT_COLUMN_CANDIDATES,
            keywords: HEURISTIC_KEYWORDS,
            max_features: MAX_FEATURES,
            ngram_range: NGRAM_RANGE,
            threshold: DECISION_THRESHOLD,
            min_training_rows: MIN_TRAINING_ROWS,
            max_iterations: MAX_ITERATIONS,
            regularization_c: REGULARIZATION_C,
            tolerance: TOLERANCE,
        }
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// One batch run, decoupled from the command-line parser.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub text_column: Option<String>,
    pub label_column: Option<String>,
    pub predictor: PredictorConfig,
}
