//! Export of the merged table as CSV or JSON

use crate::error::Result;
use crate::table::Table;
use serde_json::json;
use std::io::Write;

/// Write the table as CSV: one header line with the schema column names,
/// then one line per record in insertion order. Absent fields render as
/// empty values; quoting and escaping are the csv crate's standard rules.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(writer: W, table: &Table) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.schema.names())?;
    for record in &table.records {
        csv_writer.write_record(
            record
                .fields
                .iter()
                .map(|field| field.as_deref().unwrap_or("")),
        )?;
    }
    csv_writer.flush()?;

    Ok(table.records.len())
}

/// Write the table as pretty JSON: an object with a "columns" array in
/// schema order and a "rows" array of value arrays, absent fields as null.
///
/// Returns the number of data rows written.
pub fn write_json<W: Write>(mut writer: W, table: &Table) -> Result<usize> {
    let payload = json!({
        "columns": table.schema.names(),
        "rows": table
            .records
            .iter()
            .map(|record| &record.fields)
            .collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&payload)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;

    Ok(table.records.len())
}
