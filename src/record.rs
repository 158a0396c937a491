use std::ops::RangeInclusive;

use thiserror::Error;

/// Numeric input column holding the year.
pub const DATE_COLUMN: &str = "date";
/// Categorical input column holding the accident type.
pub const ACCIDENT_COLUMN: &str = "accident";
/// Categorical input column holding the country code.
pub const GEOGRAPHY_COLUMN: &str = "geography";

pub const NUMERIC_COLUMNS: [&str; 1] = [DATE_COLUMN];
pub const CATEGORICAL_COLUMNS: [&str; 2] = [ACCIDENT_COLUMN, GEOGRAPHY_COLUMN];

pub const DEFAULT_YEAR: i32 = 2025;
pub const DEFAULT_ACCIDENT: &str = "COLLIS";
pub const DEFAULT_GEOGRAPHY: &str = "DE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid year: {value:?}. Expected a whole number")]
    InvalidYear { value: String },
    #[error("Year {year} is out of range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Expected 3 fields (year,accident,geography), found {found}")]
    FieldCount { found: usize },
    #[error("Invalid year range: {min} is after {max}")]
    InvalidYearRange { min: i32, max: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 2004,
            max: 2035,
        }
    }
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self, RecordError> {
        if min > max {
            return Err(RecordError::InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// [`DEFAULT_YEAR`] pulled into the range.
    pub fn default_year(&self) -> i32 {
        DEFAULT_YEAR.max(self.min).min(self.max)
    }

    pub fn as_range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn check(&self, year: i32) -> Result<i32, RecordError> {
        if self.as_range().contains(&year) {
            Ok(year)
        } else {
            Err(RecordError::YearOutOfRange {
                year,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub fn parse_year(s: &str) -> Result<i32, RecordError> {
    s.trim().parse().map_err(|_| RecordError::InvalidYear {
        value: s.trim().to_string(),
    })
}

fn normalize_level(s: &str) -> String {
    s.trim().to_uppercase()
}

/// One row of model input: the year and two categorical levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccidentRecord {
    pub(crate) year: i32,
    pub(crate) accident: String,
    pub(crate) geography: String,
}

impl Default for AccidentRecord {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR, DEFAULT_ACCIDENT, DEFAULT_GEOGRAPHY)
    }
}

impl AccidentRecord {
    pub fn new(year: i32, accident: &str, geography: &str) -> Self {
        Self {
            year,
            accident: normalize_level(accident),
            geography: normalize_level(geography),
        }
    }

    /// Parses `year,accident,geography`.
    pub fn from_csv_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let &[year, accident, geography] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        };
        Ok(Self::new(parse_year(year)?, accident, geography))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn accident(&self) -> &str {
        &self.accident
    }

    pub fn geography(&self) -> &str {
        &self.geography
    }

    pub(crate) fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            DATE_COLUMN => Some(f64::from(self.year)),
            _ => None,
        }
    }

    pub(crate) fn level(&self, column: &str) -> Option<&str> {
        match column {
            ACCIDENT_COLUMN => Some(&self.accident),
            GEOGRAPHY_COLUMN => Some(&self.geography),
            _ => None,
        }
    }
}
