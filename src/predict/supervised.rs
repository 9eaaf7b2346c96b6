use std::collections::BTreeSet;

use thiserror::Error;

use super::logistic::{LogisticRegression, SolverOptions};
use super::tfidf::TfIdfVectorizer;
use crate::config::PredictorConfig;
use crate::data::filter::partition_by_label;
use crate::data::model::Table;

/// Reasons the supervised model cannot be trained on this table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("only {found} labeled rows, need at least {required}")]
    InsufficientRows { found: usize, required: usize },
    #[error("label '{value}' in row {row} is not an integer")]
    InvalidLabel { row: usize, value: String },
    #[error("labels hold a single class ({0}); two are needed")]
    SingleClass(i64),
    #[error("labels hold {0} classes; only binary labels are supported")]
    TooManyClasses(usize),
    #[error("labeled text yields an empty vocabulary")]
    EmptyVocabulary,
}

/// Train TF-IDF + logistic regression on the labeled rows and predict every
/// row of the table, labeled rows included.
///
/// The vocabulary comes from labeled rows only; terms that appear solely in
/// unlabeled rows carry no weight. The larger of the two label values is
/// the positive class.
pub fn train_and_predict(
    table: &Table,
    text_column: &str,
    label_column: &str,
    config: &PredictorConfig,
) -> Result<Vec<u8>, TrainError> {
    let selection = partition_by_label(table, label_column);
    if selection.labeled.len() < config.min_training_rows {
        return Err(TrainError::InsufficientRows {
            found: selection.labeled.len(),
            required: config.min_training_rows,
        });
    }

    let mut train_texts = Vec::with_capacity(selection.labeled.len());
    let mut labels = Vec::with_capacity(selection.labeled.len());
    for &i in &selection.labeled {
        let row = &table.rows[i];
        let label = row.get(label_column);
        let value = label.as_i64().ok_or_else(|| TrainError::InvalidLabel {
            row: i,
            value: label.to_text(),
        })?;
        train_texts.push(row.get(text_column).to_text());
        labels.push(value);
    }

    let classes: BTreeSet<i64> = labels.iter().copied().collect();
    let positive = match classes.len() {
        1 => return Err(TrainError::SingleClass(labels[0])),
        2 => classes.last().copied().unwrap_or(1),
        n => return Err(TrainError::TooManyClasses(n)),
    };
    let targets: Vec<f64> = labels
        .iter()
        .map(|&l| if l == positive { 1.0 } else { 0.0 })
        .collect();

    let mut vectorizer = TfIdfVectorizer::new(config.ngram_range, config.max_features);
    vectorizer.fit(&train_texts)?;
    let features = vectorizer.transform_all(&train_texts);

    let model = LogisticRegression::fit(
        &features,
        &targets,
        vectorizer.vocabulary_size(),
        SolverOptions {
            c: config.regularization_c,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        },
    );
    log::debug!(
        "trained on {} labeled rows, scoring {} unlabeled ({} features, {} iterations, converged = {})",
        train_texts.len(),
        selection.unlabeled.len(),
        vectorizer.vocabulary_size(),
        model.iterations(),
        model.converged()
    );

    let predictions = table
        .text_values(text_column)
        .iter()
        .map(|text| {
            let probability = model.predict_proba(&vectorizer.transform(text));
            u8::from(probability >= config.threshold)
        })
        .collect();
    Ok(predictions)
}
