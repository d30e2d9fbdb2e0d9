//! Column frequency analysis and the harmonized output schema

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occurrence counts for every column name seen in any source header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnFrequencies {
    counts: HashMap<String, usize>,
}

impl ColumnFrequencies {
    /// Count for a column name; `None` if it never appeared in a header
    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }

    /// Get the number of distinct column names
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no header contributed any column
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Tally column name occurrences across source headers, in source order.
///
/// The first sighting of a name counts as 0; every further sighting
/// increments it, including repeats inside a single header. A count above
/// zero therefore means the column appears in more than one place and is
/// usable as a join key. Names are compared by exact string equality, with
/// no trimming or case folding.
pub fn column_frequencies(headers: &[&[String]]) -> ColumnFrequencies {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for header in headers {
        for name in *header {
            counts
                .entry(name.clone())
                .and_modify(|count| *count += 1)
                .or_insert(0);
        }
    }

    ColumnFrequencies { counts }
}

/// A column in the harmonized schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, compared case-sensitively everywhere
    pub name: String,
    /// Header occurrences beyond the first
    pub count: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, count: usize) -> Self {
        Self { name, count }
    }

    /// Only columns seen in more than one header may act as join keys
    pub fn is_shared(&self) -> bool {
        self.count > 0
    }
}

/// The harmonized output schema: every distinct source column, ranked.
///
/// The schema is fixed before the first row is merged and never changes
/// during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Columns in output order
    pub columns: Vec<Column>,
}

impl Schema {
    /// Build the schema from tallied frequencies.
    ///
    /// Columns are ordered by occurrence count descending, ties broken by
    /// name descending. The reverse-alphabetical tie-break is part of the
    /// output contract: it is the order that keeps reruns byte-identical.
    pub fn from_frequencies(frequencies: &ColumnFrequencies) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptySchema);
        }

        let mut columns: Vec<Column> = frequencies
            .counts
            .iter()
            .map(|(name, &count)| Column::new(name.clone(), count))
            .collect();

        columns.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.name.cmp(&a.name)));

        Ok(Self { columns })
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column in the output order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in output order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
