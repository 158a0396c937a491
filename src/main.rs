mod logging;
mod opts;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::warn;

use railcast::{
    AccidentRecord, LinearModel, Prediction,
    batch::run_batch,
    form::{Form, render_prediction},
    parser::LinearModelRecord,
};

use crate::opts::{Opts, Subcommand};

fn main() -> Result<()> {
    let opts = Opts::parse();
    logging::init()?;

    let years = opts.years().context("invalid --min-year/--max-year")?;
    let model = LinearModel::from_file(&opts.model)
        .with_context(|| format!("failed to load the model from `{}`", opts.model.display()))?;

    match opts.subcommand.unwrap_or_default() {
        Subcommand::Form => {
            let mut form = Form::new(io::stdin().lock(), io::stdout().lock(), years);
            let prediction = form.run(&model)?;
            warn_baseline(&prediction);
        }
        Subcommand::Predict(args) => {
            let year = years.check(args.year)?;
            let record = AccidentRecord::new(year, &args.accident_type, &args.country);
            let prediction = model.predict_record(&record)?;
            warn_baseline(&prediction);
            render_prediction(io::stdout().lock(), &prediction)?;
        }
        Subcommand::Inspect(args) => inspect(&model, args.json)?,
        Subcommand::Batch(args) => {
            run_batch(&model, &args.input, &args.output, years).with_context(|| {
                format!("failed to score `{}`", args.input.display())
            })?;
        }
    }

    Ok(())
}

fn warn_baseline(prediction: &Prediction) {
    for level in &prediction.baseline {
        warn!(%level, "no indicator column, scored as base level");
    }
}

fn inspect(model: &LinearModel, json: bool) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    if json {
        serde_json::to_writer_pretty(&mut out, &LinearModelRecord::from(model))?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let layout = model.layout();
    writeln!(out, "intercept: {}", model.intercept())?;
    writeln!(out, "features: {}", model.features().len())?;
    for (name, w) in model.features().iter().zip(model.coef()) {
        writeln!(out, "  {name}: {w}")?;
    }
    for column in layout.categorical_columns() {
        writeln!(out, "{column} levels: {}", layout.levels(column).join(", "))?;
    }
    out.flush()?;
    Ok(())
}
