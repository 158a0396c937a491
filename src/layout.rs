use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::record::{AccidentRecord, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// Level -> feature index, in stored feature order.
type LevelMap = IndexMap<String, usize, FxBuildHasher>;

/// Separator between a column name and its level in one-hot feature names.
pub const PREFIX_SEP: char = '_';

/// What a single stored feature column is filled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Numeric { column: &'static str },
    OneHot { column: &'static str, level: String },
    /// Not produced by encoding any input; always zero.
    Unmatched { name: String },
}

impl Slot {
    fn classify(name: &str) -> Self {
        if let Some(column) = NUMERIC_COLUMNS.iter().copied().find(|&c| c == name) {
            return Slot::Numeric { column };
        }
        CATEGORICAL_COLUMNS
            .iter()
            .find_map(|&column| {
                name.strip_prefix(column)
                    .and_then(|rest| rest.strip_prefix(PREFIX_SEP))
                    .filter(|level| !level.is_empty())
                    .map(|level| Slot::OneHot {
                        column,
                        level: level.to_uppercase(),
                    })
            })
            .unwrap_or_else(|| Slot::Unmatched {
                name: name.to_string(),
            })
    }
}

/// Feature name as the encoder sees it: one-hot levels are upper-cased, so
/// `geography_de` and `geography_DE` name the same column.
pub fn canonical_name(name: &str) -> String {
    match Slot::classify(name) {
        Slot::OneHot { column, level } => format!("{column}{PREFIX_SEP}{level}"),
        Slot::Numeric { .. } | Slot::Unmatched { .. } => name.to_string(),
    }
}

/// A categorical level with no indicator column, encoded as all zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineLevel {
    pub column: &'static str,
    pub level: String,
}

impl fmt::Display for BaselineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.column, self.level)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    pub values: Vec<f64>,
    /// Columns whose level had no indicator and fell back to the base level.
    pub baseline: Vec<BaselineLevel>,
}

/// Maps an input record onto the column order a model was trained with.
///
/// Training used drop-first one-hot encoding, so the first level of each
/// categorical column has no feature and is represented by all indicators being
/// zero. Levels never seen in training are indistinguishable from it and are
/// encoded the same way.
#[derive(Debug, Clone)]
pub struct FeatureLayout {
    slots: Vec<Slot>,
    levels: IndexMap<&'static str, LevelMap, FxBuildHasher>,
}

impl FeatureLayout {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots: Vec<Slot> = features
            .into_iter()
            .map(|name| Slot::classify(name.as_ref()))
            .collect();

        let mut levels: IndexMap<&'static str, LevelMap, FxBuildHasher> = IndexMap::default();
        for (i, slot) in slots.iter().enumerate() {
            if let Slot::OneHot { column, level } = slot {
                levels
                    .entry(*column)
                    .or_default()
                    .entry(level.clone())
                    .or_insert(i);
            }
        }

        Self { slots, levels }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Categorical columns that have at least one indicator feature.
    pub fn categorical_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.levels.keys().copied()
    }

    /// Known non-baseline levels of `column`, in stored order.
    pub fn levels(&self, column: &str) -> impl Iterator<Item = &str> {
        self.levels
            .get(column)
            .into_iter()
            .flat_map(|levels| levels.keys().map(String::as_str))
    }

    pub fn encode(&self, record: &AccidentRecord) -> EncodedRow {
        let mut values: Vec<f64> = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Numeric { column } => record.numeric(column).unwrap_or(0.0),
                Slot::OneHot { .. } | Slot::Unmatched { .. } => 0.0,
            })
            .collect();

        let mut baseline = Vec::new();
        for (&column, levels) in &self.levels {
            let Some(level) = record.level(column) else {
                continue;
            };
            match levels.get(level) {
                Some(&i) => values[i] = 1.0,
                None => {
                    debug!(column, level, "level has no indicator, using base level");
                    baseline.push(BaselineLevel {
                        column,
                        level: level.to_string(),
                    });
                }
            }
        }

        EncodedRow { values, baseline }
    }
}
