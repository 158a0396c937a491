use std::path::Path;

use anyhow::Result as AnyResult;

use crate::{AccidentRecord, LinearModel};

pub fn all_close(a: &[f64], b: &[f64], tol: f64) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tol)
}

pub fn read_records(path: &Path) -> Vec<AccidentRecord> {
    let x_content = std::fs::read_to_string(path).expect("Failed to read X.csv");
    x_content
        .lines()
        .map(|line| AccidentRecord::from_csv_line(line).expect("Failed to parse X row"))
        .collect()
}

pub fn read_labels(path: &Path) -> Vec<f64> {
    let y_content = std::fs::read_to_string(path).expect("Failed to read y.csv");
    y_content
        .lines()
        .map(|s| s.trim().parse::<f64>().expect("Failed to parse y value"))
        .collect()
}

pub fn test_model_prediction(data_dir: &Path, model: &LinearModel, tolerance: f64) -> AnyResult<()> {
    let x_data = read_records(&data_dir.join("X.csv"));
    let y_true = read_labels(&data_dir.join("y.csv"));

    let y_pred = x_data
        .iter()
        .map(|x| model.predict_record(x).map(|p| p.value.into_inner()))
        .collect::<Result<Vec<f64>, _>>()?;

    assert!(
        all_close(&y_pred, &y_true, tolerance),
        "Predictions {y_pred:?} and y values {y_true:?} differ more than tolerance"
    );

    Ok(())
}
