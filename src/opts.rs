//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use railcast::{YearRange, record::RecordError};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Linear model artifact (JSON with `features`, `coef` and `intercept`)
    #[arg(
        short,
        long,
        env = "RAILCAST_MODEL",
        default_value = "models/accident_linear.json"
    )]
    pub model: PathBuf,

    /// Earliest year accepted as input
    #[arg(long, env = "RAILCAST_MIN_YEAR", default_value_t = YearRange::default().min())]
    pub min_year: i32,

    /// Latest year accepted as input
    #[arg(long, env = "RAILCAST_MAX_YEAR", default_value_t = YearRange::default().max())]
    pub max_year: i32,

    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,
}

impl Opts {
    pub fn years(&self) -> Result<YearRange, RecordError> {
        YearRange::new(self.min_year, self.max_year)
    }
}

#[derive(clap::Subcommand, Default)]
pub enum Subcommand {
    /// Asks for the inputs interactively and shows the prediction
    #[default]
    Form,

    /// Predicts a single accident count from command-line inputs
    Predict(PredictArgs),

    /// Shows the model parameters and the known categorical levels
    Inspect(InspectArgs),

    /// Scores a header-less `year,accident,geography` CSV file
    Batch(BatchArgs),
}

#[derive(Args)]
pub struct PredictArgs {
    #[arg(short, long, default_value_t = railcast::record::DEFAULT_YEAR)]
    pub year: i32,

    #[arg(short, long, default_value = railcast::record::DEFAULT_ACCIDENT)]
    pub accident_type: String,

    /// Country code
    #[arg(short, long, default_value = railcast::record::DEFAULT_GEOGRAPHY)]
    pub country: String,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Prints the artifact as JSON instead
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}
