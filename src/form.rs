//! Terminal rendition of the prediction form.
//!
//! The form reads answers line by line from any [`BufRead`] and renders to any
//! [`Write`], so it can be driven by a terminal or by a test buffer alike.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::{
    AccidentRecord, LinearModel,
    linear::Prediction,
    parser::LinearModelError,
    record::{DEFAULT_ACCIDENT, DEFAULT_GEOGRAPHY, YearRange, parse_year},
};

pub const TITLE: &str = "Railway Accidents Predictor (EU)";
pub const DESCRIPTION: &str = "Predicts annual accident counts by year, accident type, and country code \
     using a linear model trained on your dataset.";
pub const ACCIDENT_PROMPT: &str = "Accident type (e.g., COLLIS, DERAIL, LEVELCROSS, OTHER)";
pub const GEOGRAPHY_PROMPT: &str = "Country code (e.g., DE, FR, IT, ES, PL, RO)";
pub const BASELINE_CAPTION: &str = "Note: If a new/rare accident type or country code wasn't present in training, \
     the model treats it like the base level because of one-hot 'drop_first' encoding.";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Model(#[from] LinearModelError),
}

pub struct Form<R, W> {
    input: R,
    output: W,
    years: YearRange,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, output: W, years: YearRange) -> Self {
        Self {
            input,
            output,
            years,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Returns `None` at end of input.
    fn ask(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label} [{default}]: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    fn ask_year(&mut self) -> io::Result<i32> {
        let label = format!("Year ({}-{})", self.years.min(), self.years.max());
        let default = self.years.default_year();
        loop {
            let Some(answer) = self.ask(&label, &default.to_string())? else {
                return Ok(default);
            };
            match parse_year(&answer).and_then(|year| self.years.check(year)) {
                Ok(year) => return Ok(year),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn ask_level(&mut self, label: &str, default: &str) -> io::Result<String> {
        Ok(self
            .ask(label, default)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Collects the three inputs, falling back to defaults on empty answers.
    pub fn collect(&mut self) -> io::Result<AccidentRecord> {
        writeln!(self.output, "{TITLE}")?;
        writeln!(self.output, "{DESCRIPTION}")?;
        writeln!(self.output)?;

        let year = self.ask_year()?;
        let accident = self.ask_level(ACCIDENT_PROMPT, DEFAULT_ACCIDENT)?;
        let geography = self.ask_level(GEOGRAPHY_PROMPT, DEFAULT_GEOGRAPHY)?;
        Ok(AccidentRecord::new(year, &accident, &geography))
    }

    pub fn run(&mut self, model: &LinearModel) -> Result<Prediction, FormError> {
        let record = self.collect()?;
        let prediction = model.predict_record(&record)?;
        writeln!(self.output)?;
        render_prediction(&mut self.output, &prediction)?;
        Ok(prediction)
    }
}

pub fn render_prediction(mut out: impl Write, prediction: &Prediction) -> io::Result<()> {
    writeln!(out, "Prediction")?;
    writeln!(
        out,
        "Estimated number of accidents: {:.2}",
        prediction.value.into_inner()
    )?;
    for level in &prediction.baseline {
        writeln!(out, "Treated as base level: {level}")?;
    }
    writeln!(out)?;
    writeln!(out, "{BASELINE_CAPTION}")
}
