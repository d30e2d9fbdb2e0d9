//! CSV parser for merge input files

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// One input file: a header row plus its data rows as raw text.
///
/// Values are kept exactly as the file spelled them, untrimmed and without
/// type detection. Rows keep their own field counts; a row that disagrees
/// with the header is diagnosed during the merge, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Path the source was read from
    pub path: PathBuf,
    /// Ordered column names from the header row
    pub header: Vec<String>,
    /// Data rows as positional values, in file order
    pub rows: Vec<Vec<String>>,
}

impl Source {
    /// Get the number of header columns
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse a CSV file into a Source
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Source> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_source(BufReader::new(file), path.to_path_buf())
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<Source> {
    read_source(content.as_bytes(), PathBuf::from(source_name))
}

fn read_source<R: Read>(reader: R, path: PathBuf) -> Result<Source> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Ragged rows must survive parsing to be reported later
        .from_reader(reader);

    let header: Vec<String> = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?
        .iter()
        .map(|name| name.to_string())
        .collect();

    if header.is_empty() {
        return Err(Error::EmptyHeader { path });
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        rows.push(record.iter().map(|value| value.to_string()).collect());
    }

    Ok(Source { path, header, rows })
}
