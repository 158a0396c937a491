mod linear;

pub mod batch;
pub mod form;
pub mod layout;
pub mod parser;
pub mod record;

pub use layout::{BaselineLevel, EncodedRow, FeatureLayout};
pub use linear::{LinearModel, Prediction};
pub use record::{AccidentRecord, YearRange};
