use std::path::Path;

use crate::{LinearModel, parser::LinearModelError};

impl LinearModel {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinearModelError> {
        super::read_linear_model(path)
    }
}
