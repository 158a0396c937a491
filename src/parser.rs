mod builtin;

pub mod linear;
pub use linear::{LinearModelError, LinearModelRecord, parse_linear_model, read_linear_model};

#[cfg(test)]
pub(crate) mod test_utils;
