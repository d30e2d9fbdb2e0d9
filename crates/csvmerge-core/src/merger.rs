//! Merge engine: row matching and insert-vs-update over the accumulating table

use crate::error::{Error, Result};
use crate::parser::Source;
use crate::schema::{column_frequencies, Schema};
use crate::table::{Predicate, Record, Table};
use serde::{Deserialize, Serialize};

/// What became of a single merged row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row created a new record
    Inserted,
    /// The row updated every record its predicate matched
    Merged,
}

/// Final result of a merge run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    /// The accumulated table, records in insertion order
    pub table: Table,
    /// Rows that created a new record
    pub inserted: usize,
    /// Rows that updated existing records
    pub merged: usize,
}

/// Drives source rows into the accumulating table.
///
/// Effects apply immediately: a row can match a record inserted by an
/// earlier row, even one from the same source.
#[derive(Debug)]
pub struct MergeEngine {
    table: Table,
    inserted: usize,
    merged: usize,
}

impl MergeEngine {
    /// Engine over an empty table with the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            table: Table::new(schema),
            inserted: 0,
            merged: 0,
        }
    }

    /// The accumulating table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Rows that created a new record so far
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Rows that updated existing records so far
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// Merge one data row given under its source header: update every
    /// record matched on the row's shared columns, or insert a new one.
    pub fn merge_row(&mut self, header: &[String], values: &[String]) -> Result<RowOutcome> {
        if header.len() != values.len() {
            return Err(Error::RowShape {
                expected: header.len(),
                found: values.len(),
            });
        }

        let mapping = row_mapping(header, values);

        // Only columns shared between headers may participate in matching;
        // source-specific columns must never cause or prevent a join
        let mut predicate = Predicate::new();
        for (column, value) in &mapping {
            let shared = self
                .table
                .schema
                .find_column(column)
                .is_some_and(|c| c.is_shared());
            if shared {
                predicate.push(column.as_str(), value.as_str());
            }
        }

        if !predicate.is_empty() {
            let matches = self.table.find_all(&predicate);
            if !matches.is_empty() {
                // Update every match, not just the first
                for index in matches {
                    self.table.update_fields(index, &mapping);
                }
                self.merged += 1;
                return Ok(RowOutcome::Merged);
            }
        }

        let mut record = Record::empty(self.table.column_count());
        for (column, value) in &mapping {
            if let Some(position) = self.table.schema.position(column) {
                record.set(position, value.clone());
            }
        }
        self.table.insert(record);
        self.inserted += 1;
        Ok(RowOutcome::Inserted)
    }

    /// Merge every data row of one source, in file order.
    ///
    /// Ragged rows are reported as malformed-row errors with the source
    /// path and 1-based row number.
    pub fn merge_source(&mut self, source: &Source) -> Result<()> {
        for (index, values) in source.rows.iter().enumerate() {
            self.merge_row(&source.header, values).map_err(|e| match e {
                Error::RowShape { expected, found } => Error::MalformedRow {
                    path: source.path.clone(),
                    row: index + 1,
                    expected,
                    found,
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Consume the engine into the final merge result
    pub fn into_result(self) -> MergeResult {
        MergeResult {
            table: self.table,
            inserted: self.inserted,
            merged: self.merged,
        }
    }
}

/// Merge all sources, in order, into a single table.
///
/// The schema is fixed from every header before any row merges.
pub fn merge_sources(sources: &[Source]) -> Result<MergeResult> {
    let headers: Vec<&[String]> = sources.iter().map(|s| s.header.as_slice()).collect();
    let frequencies = column_frequencies(&headers);
    let schema = Schema::from_frequencies(&frequencies)?;

    let mut engine = MergeEngine::new(schema);
    for source in sources {
        engine.merge_source(source)?;
    }

    Ok(engine.into_result())
}

/// Pair a header with one row's values into an ordered column to value
/// mapping. Columns keep first-seen order; a repeated column keeps its
/// place and takes the later value.
fn row_mapping(header: &[String], values: &[String]) -> Vec<(String, String)> {
    let mut mapping: Vec<(String, String)> = Vec::with_capacity(header.len());
    for (column, value) in header.iter().zip(values) {
        match mapping.iter_mut().find(|(name, _)| name == column) {
            Some(entry) => entry.1 = value.clone(),
            None => mapping.push((column.clone(), value.clone())),
        }
    }
    mapping
}
