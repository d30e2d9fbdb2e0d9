//! csvmerge-core: Core library for merging CSV files into one table
//!
//! This library provides functionality to:
//! - Expand input paths into an ordered list of CSV files
//! - Parse CSV files into sources (a header plus raw text rows)
//! - Rank columns by how many sources share them and fix a harmonized
//!   output schema
//! - Merge rows one at a time, updating existing records matched on
//!   shared columns or inserting new ones
//! - Export the merged table as CSV or JSON

pub mod error;
pub mod export;
pub mod merger;
pub mod parser;
pub mod scanner;
pub mod schema;
pub mod table;

pub use error::{Error, Result};
pub use export::{write_csv, write_json};
pub use merger::{merge_sources, MergeEngine, MergeResult, RowOutcome};
pub use parser::{parse_csv, Source};
pub use scanner::expand_inputs;
pub use schema::{column_frequencies, Column, ColumnFrequencies, Schema};
pub use table::{Predicate, Record, Table};
