//! Prediction core: pick a text column, then score every row with either the
//! supervised model or the keyword heuristic.
//!
//! ```text
//!   label column resolved? ──no──► heuristic
//!          │yes
//!          ▼
//!   train_and_predict ──TrainError──► warn, heuristic
//!          │ok
//!          ▼
//!     supervised predictions
//! ```

pub mod columns;
pub mod heuristic;
pub mod logistic;
pub mod supervised;
pub mod tfidf;

use crate::config::PredictorConfig;
use crate::data::model::Table;
use supervised::TrainError;

/// Which scorer produced the predictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Supervised,
    /// Keyword heuristic; `fallback` holds the reason when training was
    /// attempted and abandoned.
    Heuristic { fallback: Option<TrainError> },
}

/// One 0/1 prediction per table row, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictions {
    pub values: Vec<u8>,
    pub strategy: Strategy,
}

/// Score every row of `table`.
///
/// `label_column` must already be resolved against the table (see
/// [`columns::resolve_label_column`]); `None` goes straight to the heuristic.
pub fn predict(
    table: &Table,
    text_column: &str,
    label_column: Option<&str>,
    config: &PredictorConfig,
) -> Predictions {
    let Some(label_column) = label_column else {
        log::info!("No label column provided or not found, using heuristic predictions");
        return heuristic_over(table, text_column, config, None);
    };

    match supervised::train_and_predict(table, text_column, label_column, config) {
        Ok(values) => {
            log::info!("Trained supervised model on label column '{label_column}'");
            Predictions {
                values,
                strategy: Strategy::Supervised,
            }
        }
        Err(err @ TrainError::InsufficientRows { .. }) => {
            log::warn!("Not enough labeled rows for training ({err}). Falling back to heuristic.");
            heuristic_over(table, text_column, config, Some(err))
        }
        Err(err) => {
            log::warn!("Supervised model unavailable; falling back to heuristic: {err}");
            heuristic_over(table, text_column, config, Some(err))
        }
    }
}

fn heuristic_over(
    table: &Table,
    text_column: &str,
    config: &PredictorConfig,
    fallback: Option<TrainError>,
) -> Predictions {
    Predictions {
        values: heuristic::predict(&table.text_values(text_column), config.keywords),
        strategy: Strategy::Heuristic { fallback },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn jobs(rows: &[(&str, Option<CellValue>)]) -> Table {
        let rows = rows
            .iter()
            .map(|(text, label)| {
                let mut row = Row::default();
                row.cells.insert("text".into(), CellValue::String(text.to_string()));
                row.cells
                    .insert("label".into(), label.clone().unwrap_or(CellValue::Null));
                row
            })
            .collect();
        Table::new(vec!["text".into(), "label".into()], rows)
    }

    fn int(v: i64) -> Option<CellValue> {
        Some(CellValue::Integer(v))
    }

    fn labeled_jobs() -> Table {
        jobs(&[
            ("python developer", int(1)),
            ("python engineer", int(1)),
            ("senior python developer", int(1)),
            ("gardening flowers", int(0)),
            ("gardening roses", int(0)),
            ("senior gardening flowers", int(0)),
            ("python developer wanted", None),
            ("fresh flowers for the office", None),
            ("gardening team", None),
        ])
    }

    #[test]
    fn no_label_column_uses_heuristic() {
        let table = labeled_jobs();
        let config = PredictorConfig::default();
        let out = predict(&table, "text", None, &config);
        assert_eq!(out.strategy, Strategy::Heuristic { fallback: None });
        assert_eq!(
            out.values,
            heuristic::predict(&table.text_values("text"), config.keywords)
        );
    }

    #[test]
    fn too_few_labels_match_heuristic_exactly() {
        let table = jobs(&[
            ("gardening", int(1)),
            ("Java lead", int(0)),
            ("roses", int(1)),
            ("sql tuning", int(0)),
            ("customer calls", None),
            ("blue sky", None),
        ]);
        let config = PredictorConfig::default();
        let out = predict(&table, "text", Some("label"), &config);

        assert_eq!(out.values, vec![0, 1, 0, 1, 1, 0]);
        assert_eq!(
            out.strategy,
            Strategy::Heuristic {
                fallback: Some(TrainError::InsufficientRows { found: 4, required: 5 })
            }
        );
    }

    #[test]
    fn supervised_scores_every_row() {
        let table = labeled_jobs();
        let out = predict(&table, "text", Some("label"), &PredictorConfig::default());

        assert_eq!(out.strategy, Strategy::Supervised);
        assert_eq!(out.values.len(), table.len());
        assert!(out.values.iter().all(|&v| v == 0 || v == 1));
        // Training rows are re-scored by the model.
        assert_eq!(&out.values[..6], &[1, 1, 1, 0, 0, 0]);
        assert_eq!(out.values[6], 1);
        assert_eq!(out.values[7], 0);
        // "team" is a heuristic keyword, but the model only knows "gardening".
        assert_eq!(out.values[8], 0);
    }

    #[test]
    fn supervised_runs_are_repeatable() {
        let table = labeled_jobs();
        let config = PredictorConfig::default();
        let first = predict(&table, "text", Some("label"), &config);
        let second = predict(&table, "text", Some("label"), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn single_class_falls_back() {
        let table = jobs(&[
            ("python", int(1)),
            ("java", int(1)),
            ("sql", int(1)),
            ("react", int(1)),
            ("gardening", int(1)),
            ("blue sky", None),
        ]);
        let out = predict(&table, "text", Some("label"), &PredictorConfig::default());
        assert_eq!(
            out.strategy,
            Strategy::Heuristic {
                fallback: Some(TrainError::SingleClass(1))
            }
        );
        assert_eq!(out.values, vec![1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn unparsable_label_falls_back() {
        let table = jobs(&[
            ("python", int(1)),
            ("java", Some(CellValue::String("yes".into()))),
            ("sql", int(0)),
            ("react", int(1)),
            ("gardening", int(0)),
        ]);
        let out = predict(&table, "text", Some("label"), &PredictorConfig::default());
        assert!(matches!(
            out.strategy,
            Strategy::Heuristic {
                fallback: Some(TrainError::InvalidLabel { row: 1, .. })
            }
        ));
    }

    #[test]
    fn float_labels_are_cast() {
        let table = jobs(&[
            ("python developer", Some(CellValue::Float(1.0))),
            ("python engineer", Some(CellValue::Float(1.0))),
            ("senior python developer", Some(CellValue::Float(1.0))),
            ("gardening flowers", Some(CellValue::Float(0.0))),
            ("gardening roses", Some(CellValue::Float(0.0))),
            ("senior gardening flowers", Some(CellValue::Float(0.0))),
            ("unlabeled", Some(CellValue::Float(f64::NAN))),
        ]);
        let out = predict(&table, "text", Some("label"), &PredictorConfig::default());
        assert_eq!(out.strategy, Strategy::Supervised);
        assert_eq!(out.values.len(), 7);
    }
}
