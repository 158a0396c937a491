use itertools::izip;
use ordered_float::NotNan;

use crate::{
    layout::{BaselineLevel, FeatureLayout},
    parser::LinearModelError,
    record::AccidentRecord,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub value: NotNan<f64>,
    /// Inputs that were scored as the base level of their column.
    pub baseline: Vec<BaselineLevel>,
}

#[derive(Debug, Clone)]
pub struct LinearModel {
    features: Vec<String>,
    coef: Vec<f64>,
    intercept: f64,
    layout: FeatureLayout,
}

impl LinearModel {
    /// Callers are expected to have checked that `coef` matches `features`;
    /// see [`crate::parser::parse_linear_model`].
    pub(crate) fn new(features: Vec<String>, coef: Vec<f64>, intercept: f64) -> Self {
        let layout = FeatureLayout::new(&features);
        Self {
            features,
            coef,
            intercept,
            layout,
        }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn predict(&self, x: &[f64]) -> Result<NotNan<f64>, LinearModelError> {
        if x.len() != self.coef.len() {
            return Err(LinearModelError::DimensionMismatch {
                expected: self.coef.len(),
                found: x.len(),
            });
        }

        let dot: f64 = izip!(&self.coef, x).map(|(w, v)| w * v).sum();

        let y = self.intercept + dot;
        if !y.is_finite() {
            return Err(LinearModelError::NonFinitePrediction);
        }
        NotNan::new(y).map_err(|_| LinearModelError::NonFinitePrediction)
    }

    pub fn predict_record(&self, record: &AccidentRecord) -> Result<Prediction, LinearModelError> {
        let row = self.layout.encode(record);
        let value = self.predict(&row.values)?;
        Ok(Prediction {
            value,
            baseline: row.baseline,
        })
    }
}
