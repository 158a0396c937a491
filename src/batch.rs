use std::{
    fs::{File, read_to_string},
    io::{self, BufWriter, Write},
    path::Path,
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    AccidentRecord, LinearModel,
    parser::LinearModelError,
    record::{RecordError, YearRange},
};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: {source}")]
    Record { line: usize, source: RecordError },
    #[error("Line {line}: {source}")]
    Model {
        line: usize,
        source: LinearModelError,
    },
}

/// A record with the 1-based line it was read from.
pub type NumberedRecord = (usize, AccidentRecord);

/// Reads header-less `year,accident,geography` rows, skipping blank lines.
pub fn read_records(
    path: impl AsRef<Path>,
    years: YearRange,
) -> Result<Vec<NumberedRecord>, BatchError> {
    let content = read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_no = i + 1;
            AccidentRecord::from_csv_line(line)
                .and_then(|record| years.check(record.year()).map(|_| (line_no, record)))
                .map_err(|source| BatchError::Record {
                    line: line_no,
                    source,
                })
        })
        .collect()
}

pub fn predict_all(model: &LinearModel, records: &[NumberedRecord]) -> Result<Vec<f64>, BatchError> {
    records
        .iter()
        .map(|(line, record)| {
            let line = *line;
            let prediction = model
                .predict_record(record)
                .map_err(|source| BatchError::Model { line, source })?;
            for level in &prediction.baseline {
                warn!(line, %level, "scored as base level");
            }
            Ok(prediction.value.into_inner())
        })
        .collect()
}

pub fn write_predictions(mut writer: impl Write, predictions: &[f64]) -> io::Result<()> {
    for pred in predictions {
        writeln!(writer, "{pred:.6}")?;
    }
    writer.flush()
}

/// Scores every row of `input` and writes one prediction per line to `output`.
pub fn run_batch(
    model: &LinearModel,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    years: YearRange,
) -> Result<usize, BatchError> {
    let records = read_records(input, years)?;
    let predictions = predict_all(model, &records)?;
    let writer = BufWriter::new(File::create(output)?);
    write_predictions(writer, &predictions)?;
    info!(rows = predictions.len(), "wrote predictions");
    Ok(predictions.len())
}
