//! Record metadata: the column layout a cursor produces.
//!
//! Metadata is built once per data source and then shared read-only
//! (usually behind an `Arc`) by every cursor the source opens.

use crate::types::ColumnType;
use serde::Serialize;
use std::collections::HashMap;

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column not found by name
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
}

/// Name and type of one column.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnMetadata {
    /// Create a new column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Ordered column layout of a record.
///
/// Column lookups by index return `Option` rather than panicking; lookups
/// by name are case-insensitive, as SQL identifiers are.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordMetadata {
    /// Column definitions, in output order
    columns: Vec<ColumnMetadata>,

    /// Lowercased name -> column index (not serialized)
    #[serde(skip)]
    column_map: HashMap<String, usize>,
}

impl RecordMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata from a list of columns.
    pub fn from_columns(columns: Vec<ColumnMetadata>) -> Result<Self, MetadataError> {
        let mut metadata = Self::new();
        for column in columns {
            metadata.add(column)?;
        }
        Ok(metadata)
    }

    /// Append a column. Names must be unique (case-insensitive).
    pub fn add(&mut self, column: ColumnMetadata) -> Result<(), MetadataError> {
        let key = column.name.to_lowercase();
        if self.column_map.contains_key(&key) {
            return Err(MetadataError::DuplicateColumn(column.name));
        }
        self.column_map.insert(key, self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> Result<Self, MetadataError> {
        self.add(ColumnMetadata::new(name, column_type))?;
        Ok(self)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column at `index`.
    pub fn column(&self, index: usize) -> Option<&ColumnMetadata> {
        self.columns.get(index)
    }

    /// Name of the column at `index`.
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.column(index).map(|c| c.name.as_str())
    }

    /// Type of the column at `index`.
    pub fn column_type(&self, index: usize) -> Option<ColumnType> {
        self.column(index).map(|c| c.column_type)
    }

    /// Index of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(&name.to_lowercase()).copied()
    }

    /// Index of the column called `name`, or an error naming it.
    pub fn require_column(&self, name: &str) -> Result<usize, MetadataError> {
        self.column_index(name)
            .ok_or_else(|| MetadataError::ColumnNotFound(name.to_string()))
    }

    /// Iterate over the columns in order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter()
    }

    /// All column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl From<ColumnMetadata> for RecordMetadata {
    fn from(column: ColumnMetadata) -> Self {
        let mut column_map = HashMap::new();
        column_map.insert(column.name.to_lowercase(), 0);
        Self {
            columns: vec![column],
            column_map,
        }
    }
}

impl PartialEq for RecordMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordMetadata {
        RecordMetadata::new()
            .with_column("x", ColumnType::Long)
            .unwrap()
            .with_column("Label", ColumnType::String)
            .unwrap()
    }

    #[test]
    fn test_lookup_by_index() {
        let metadata = sample();
        assert_eq!(metadata.column_count(), 2);
        assert_eq!(metadata.column_name(0), Some("x"));
        assert_eq!(metadata.column_type(1), Some(ColumnType::String));
        assert_eq!(metadata.column_name(2), None);
        assert_eq!(metadata.column_type(2), None);
    }

    #[test]
    fn test_lookup_by_name_is_case_insensitive() {
        let metadata = sample();
        assert_eq!(metadata.column_index("X"), Some(0));
        assert_eq!(metadata.column_index("label"), Some(1));
        assert!(matches!(
            metadata.require_column("missing"),
            Err(MetadataError::ColumnNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_single_column_from() {
        let metadata = RecordMetadata::from(ColumnMetadata::new("X", ColumnType::Long));
        assert_eq!(metadata.column_count(), 1);
        assert_eq!(metadata.column_index("x"), Some(0));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = sample().with_column("LABEL", ColumnType::Int);
        assert!(matches!(result, Err(MetadataError::DuplicateColumn(_))));
    }

    #[test]
    fn test_from_columns() {
        let metadata = RecordMetadata::from_columns(vec![
            ColumnMetadata::new("x", ColumnType::Long),
            ColumnMetadata::new("flag", ColumnType::Boolean),
        ])
        .unwrap();
        assert_eq!(metadata.column_names(), vec!["x", "flag"]);
        assert_eq!(metadata.column_type(1), Some(ColumnType::Boolean));
        assert_eq!(metadata.column_index("FLAG"), Some(1));

        let result = RecordMetadata::from_columns(vec![
            ColumnMetadata::new("x", ColumnType::Long),
            ColumnMetadata::new("X", ColumnType::Int),
        ]);
        assert!(matches!(result, Err(MetadataError::DuplicateColumn(name)) if name == "X"));
    }

    #[test]
    fn test_serialize_skips_lookup_map() {
        let yaml = serde_yaml::to_string(&sample()).unwrap();
        assert!(yaml.contains("name: x"));
        assert!(yaml.contains("type: long"));
        assert!(!yaml.contains("column_map"));
    }
}
