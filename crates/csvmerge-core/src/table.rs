//! The accumulating output table: records, predicates, lookup and update

use crate::schema::Schema;
use serde::{Deserialize, Serialize};

/// One row of the unified output table.
///
/// `None` is absent, not empty: it renders as an empty value on export
/// but never satisfies an equality constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// One slot per schema column
    pub fields: Vec<Option<String>>,
}

impl Record {
    /// A record with every field absent
    pub fn empty(width: usize) -> Self {
        Self {
            fields: vec![None; width],
        }
    }

    /// Get a field value by schema position
    pub fn get(&self, position: usize) -> Option<&str> {
        self.fields.get(position).and_then(|field| field.as_deref())
    }

    /// Set a field value by schema position
    pub fn set(&mut self, position: usize, value: String) {
        if let Some(slot) = self.fields.get_mut(position) {
            *slot = Some(value);
        }
    }
}

/// Equality constraints used to find records to update.
///
/// The empty predicate matches every record; the merge engine checks
/// `is_empty` before looking anything up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    constraints: Vec<(String, String)>,
}

impl Predicate {
    /// An unconstrained predicate
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality constraint. A repeated column keeps its original
    /// place and takes the new value.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.constraints.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.constraints.push((column, value)),
        }
    }

    /// The (column, value) pairs, in insertion order
    pub fn constraints(&self) -> &[(String, String)] {
        &self.constraints
    }

    /// Number of constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when no constraint has been added
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// The in-memory table a merge run accumulates into.
///
/// Nothing is deleted during a run, so insertion order is the export order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Fixed output schema, set at construction
    pub schema: Schema,
    /// Records in insertion order
    pub records: Vec<Record>,
}

impl Table {
    /// Create an empty table over a fixed schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Get the number of records
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Get the number of schema columns
    pub fn column_count(&self) -> usize {
        self.schema.column_count()
    }

    /// Append a record, normalized to schema width
    pub fn insert(&mut self, mut record: Record) {
        record.fields.resize(self.schema.column_count(), None);
        self.records.push(record);
    }

    /// Indices of every record satisfying all of the predicate's
    /// constraints.
    ///
    /// Matching is exact, case-sensitive text equality; an absent field
    /// never matches, not even against the empty string.
    pub fn find_all(&self, predicate: &Predicate) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record, predicate))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches(&self, record: &Record, predicate: &Predicate) -> bool {
        predicate.constraints().iter().all(|(column, value)| {
            self.schema
                .position(column)
                .and_then(|position| record.get(position))
                .is_some_and(|field| field == value)
        })
    }

    /// Overwrite the named fields of one record; fields not named are left
    /// untouched. Columns outside the schema and indices out of range are
    /// ignored.
    pub fn update_fields(&mut self, index: usize, fields: &[(String, String)]) {
        if let Some(record) = self.records.get_mut(index) {
            for (column, value) in fields {
                if let Some(position) = self.schema.position(column) {
                    record.set(position, value.clone());
                }
            }
        }
    }

    /// Value of one cell by record index and column name; `None` when the
    /// field is absent or the coordinates do not exist
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let position = self.schema.position(column)?;
        self.records.get(row)?.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{column_frequencies, Schema};

    /// Schema over id (shared), name and email, in that output order
    fn test_schema() -> Schema {
        let a = ["id".to_string(), "name".to_string()];
        let b = ["id".to_string(), "email".to_string()];
        let frequencies = column_frequencies(&[a.as_slice(), b.as_slice()]);
        Schema::from_frequencies(&frequencies).unwrap()
    }

    fn record(schema: &Schema, values: &[(&str, &str)]) -> Record {
        let mut record = Record::empty(schema.column_count());
        for (column, value) in values {
            if let Some(position) = schema.position(column) {
                record.set(position, value.to_string());
            }
        }
        record
    }

    fn predicate(constraints: &[(&str, &str)]) -> Predicate {
        let mut predicate = Predicate::new();
        for (column, value) in constraints {
            predicate.push(*column, *value);
        }
        predicate
    }

    #[test]
    fn test_insert_preserves_order() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());

        table.insert(record(&schema, &[("id", "2")]));
        table.insert(record(&schema, &[("id", "1")]));

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, "id"), Some("2"));
        assert_eq!(table.value(1, "id"), Some("1"));
    }

    #[test]
    fn test_insert_normalizes_record_width() {
        let schema = test_schema();
        let mut table = Table::new(schema);

        table.insert(Record::empty(0));

        assert_eq!(table.records[0].fields.len(), 3);
    }

    #[test]
    fn test_find_all_exact_match() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1"), ("name", "Alice")]));
        table.insert(record(&schema, &[("id", "2"), ("name", "Bob")]));

        assert_eq!(table.find_all(&predicate(&[("id", "1")])), vec![0]);
        assert_eq!(table.find_all(&predicate(&[("id", "3")])), Vec::<usize>::new());
    }

    #[test]
    fn test_find_all_requires_every_constraint() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1"), ("name", "Alice")]));

        let found = table.find_all(&predicate(&[("id", "1"), ("name", "Bob")]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("name", "Alice")]));

        assert!(table.find_all(&predicate(&[("name", "alice")])).is_empty());
    }

    #[test]
    fn test_absent_field_never_matches() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1")]));

        // email was never populated; not even "" may match it
        assert!(table.find_all(&predicate(&[("email", "")])).is_empty());
    }

    #[test]
    fn test_empty_string_matches_empty_string() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1"), ("email", "")]));

        assert_eq!(table.find_all(&predicate(&[("email", "")])), vec![0]);
    }

    #[test]
    fn test_empty_predicate_matches_every_record() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1")]));
        table.insert(record(&schema, &[("id", "2")]));

        assert_eq!(table.find_all(&Predicate::new()), vec![0, 1]);
    }

    #[test]
    fn test_unknown_column_matches_nothing() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1")]));

        assert!(table.find_all(&predicate(&[("ghost", "1")])).is_empty());
    }

    #[test]
    fn test_update_fields_touches_only_named_columns() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("id", "1"), ("name", "Alice")]));

        table.update_fields(0, &[("name".to_string(), "Bob".to_string())]);

        assert_eq!(table.value(0, "id"), Some("1"));
        assert_eq!(table.value(0, "name"), Some("Bob"));
        assert_eq!(table.value(0, "email"), None);
    }

    #[test]
    fn test_update_fields_can_write_empty_strings() {
        let schema = test_schema();
        let mut table = Table::new(schema.clone());
        table.insert(record(&schema, &[("name", "Alice")]));

        table.update_fields(0, &[("name".to_string(), String::new())]);

        assert_eq!(table.value(0, "name"), Some(""));
    }

    #[test]
    fn test_predicate_push_last_value_wins() {
        let mut predicate = Predicate::new();
        predicate.push("id", "1");
        predicate.push("name", "Alice");
        predicate.push("id", "2");

        assert_eq!(predicate.len(), 2);
        assert_eq!(
            predicate.constraints(),
            &[
                ("id".to_string(), "2".to_string()),
                ("name".to_string(), "Alice".to_string()),
            ]
        );
    }
}
