use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serdeio::read_record_from_file;
use thiserror::Error;
use tracing::info;

use crate::{LinearModel, layout::canonical_name};

/// Custom error types for linear model loading and scoring
#[derive(Debug, Error)]
pub enum LinearModelError {
    #[error("Model artifact not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Model has no features")]
    Empty,
    #[error("Model has {features} features but {coef} coefficients")]
    ShapeMismatch { features: usize, coef: usize },
    #[error("Duplicate feature name: {name}")]
    DuplicateFeature { name: String },
    #[error("Non-finite model parameter: {parameter}")]
    NonFiniteParameter { parameter: String },
    #[error("Expected {expected} feature values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Prediction is not a finite number")]
    NonFinitePrediction,
    #[error("File read error: {source}")]
    FileRead {
        #[from]
        source: serdeio::Error,
    },
}

/// On-disk shape of a fitted linear regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelRecord {
    pub features: Vec<String>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl From<&LinearModel> for LinearModelRecord {
    fn from(model: &LinearModel) -> Self {
        Self {
            features: model.features().to_vec(),
            coef: model.coef().to_vec(),
            intercept: model.intercept(),
        }
    }
}

pub fn parse_linear_model(record: LinearModelRecord) -> Result<LinearModel, LinearModelError> {
    if record.features.is_empty() {
        return Err(LinearModelError::Empty);
    }
    if record.features.len() != record.coef.len() {
        return Err(LinearModelError::ShapeMismatch {
            features: record.features.len(),
            coef: record.coef.len(),
        });
    }
    if let Some(name) = record
        .features
        .iter()
        .duplicates_by(|name| canonical_name(name))
        .next()
    {
        return Err(LinearModelError::DuplicateFeature { name: name.clone() });
    }
    if !record.intercept.is_finite() {
        return Err(LinearModelError::NonFiniteParameter {
            parameter: "intercept".to_string(),
        });
    }
    if let Some((name, _)) = record
        .features
        .iter()
        .zip(&record.coef)
        .find(|(_, w)| !w.is_finite())
    {
        return Err(LinearModelError::NonFiniteParameter {
            parameter: format!("coef[{name}]"),
        });
    }

    Ok(LinearModel::new(
        record.features,
        record.coef,
        record.intercept,
    ))
}

pub fn read_linear_model(path: impl AsRef<Path>) -> Result<LinearModel, LinearModelError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LinearModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let record: LinearModelRecord = read_record_from_file(path)?;
    let model = parse_linear_model(record)?;
    info!(
        path = %path.display(),
        features = model.features().len(),
        "loaded linear model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{AccidentRecord, parser::test_utils::test_model_prediction};

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data/linear")
    }

    fn record(json: &str) -> LinearModelRecord {
        serde_json::from_str(json).expect("Failed to parse record")
    }

    #[test]
    fn test_read_linear_model() {
        let model = read_linear_model(data_dir().join("model.json")).expect("Failed to load model");
        assert_eq!(model.features().len(), 10);
        assert_eq!(model.intercept(), 3050.0);

        test_model_prediction(&data_dir(), &model, 1e-9).unwrap_or_else(|e| {
            panic!("Linear model prediction test failed using data dir {:?}: {}", data_dir(), e)
        });
    }

    #[test]
    fn test_read_linear_model_not_found() {
        let path = data_dir().join("missing.json");
        let err = read_linear_model(&path).unwrap_err();
        assert!(matches!(err, LinearModelError::NotFound { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let ordered = parse_linear_model(record(
            r#"{"features": ["date", "accident_DERAIL", "geography_FR"],
                "coef": [-1.5, 12.0, 15.0], "intercept": 3050.0}"#,
        ))
        .unwrap();
        let shuffled = parse_linear_model(record(
            r#"{"features": ["geography_FR", "date", "accident_DERAIL"],
                "coef": [15.0, -1.5, 12.0], "intercept": 3050.0}"#,
        ))
        .unwrap();

        for input in [
            AccidentRecord::new(2020, "DERAIL", "FR"),
            AccidentRecord::new(2031, "COLLIS", "DE"),
        ] {
            assert_eq!(
                ordered.predict_record(&input).unwrap().value,
                shuffled.predict_record(&input).unwrap().value
            );
        }
    }

    #[test]
    fn test_parse_linear_model_shape_mismatch() {
        let err = parse_linear_model(record(
            r#"{"features": ["date", "accident_DERAIL"], "coef": [1.0], "intercept": 0.0}"#,
        ))
        .unwrap_err();
        let error_msg = err.to_string();
        assert!(error_msg.contains("2 features"));
        assert!(error_msg.contains("1 coefficients"));
    }

    #[test]
    fn test_parse_linear_model_empty() {
        let err = parse_linear_model(record(r#"{"features": [], "coef": [], "intercept": 1.0}"#))
            .unwrap_err();
        assert!(matches!(err, LinearModelError::Empty));
    }

    #[test]
    fn test_parse_linear_model_duplicate_feature() {
        let err = parse_linear_model(record(
            r#"{"features": ["date", "geography_DE", "date"], "coef": [1.0, 2.0, 3.0], "intercept": 0.0}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, LinearModelError::DuplicateFeature { ref name } if name == "date"));
    }

    #[test]
    fn test_parse_linear_model_levels_differing_by_case() {
        let err = parse_linear_model(record(
            r#"{"features": ["date", "geography_de", "geography_DE"], "coef": [0.0, 1.0, 100.0], "intercept": 0.0}"#,
        ))
        .unwrap_err();
        assert!(
            matches!(err, LinearModelError::DuplicateFeature { ref name } if name.eq_ignore_ascii_case("geography_DE"))
        );

        // unmatched names are compared verbatim
        assert!(
            parse_linear_model(record(
                r#"{"features": ["date", "DATE"], "coef": [1.0, 2.0], "intercept": 0.0}"#,
            ))
            .is_ok()
        );
    }

    #[test]
    fn test_parse_linear_model_non_finite() {
        let err = parse_linear_model(LinearModelRecord {
            features: vec!["date".to_string(), "geography_DE".to_string()],
            coef: vec![1.0, f64::NAN],
            intercept: 0.0,
        })
        .unwrap_err();
        assert!(err.to_string().contains("coef[geography_DE]"));

        let err = parse_linear_model(LinearModelRecord {
            features: vec!["date".to_string()],
            coef: vec![1.0],
            intercept: f64::INFINITY,
        })
        .unwrap_err();
        assert!(err.to_string().contains("intercept"));
    }

    #[test]
    fn test_record_from_model() {
        let source = record(r#"{"features": ["date"], "coef": [-2.0], "intercept": 10.0}"#);
        let model = parse_linear_model(source.clone()).unwrap();
        let back = LinearModelRecord::from(&model);
        assert_eq!(back.features, source.features);
        assert_eq!(back.coef, source.coef);
        assert_eq!(back.intercept, source.intercept);
    }
}
