//! Canonical column ordering for the merged roster

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column names that always occupy the lowest output indices, in this order
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "id",
    "college id",
    "college name",
    "student id",
    "student name",
];

/// A column in the canonical output schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Output column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// The canonical, duplicate-free output column ordering
///
/// Computed once from the input headers and immutable afterwards; every
/// merge step reads it, none mutate it. Insertion order is the output
/// order, and a membership table keeps duplicate checks O(1) without
/// depending on hash iteration order.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnOrder {
    columns: Vec<Column>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl ColumnOrder {
    fn new() -> Self {
        Self {
            columns: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a name if it is not already present, assigning it the
    /// next available index. Names are compared exactly: case or
    /// whitespace variants count as distinct columns.
    fn register(&mut self, name: &str) {
        if self.by_name.contains_key(name) {
            return;
        }
        let index = self.columns.len();
        self.by_name.insert(name.to_string(), index);
        self.columns.push(Column::new(name.to_string(), index));
    }

    /// Get the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the order is empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column's output index by exact name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The columns in output order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column names in output order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Build the canonical column order from the subject list and all input headers
///
/// Registration order: the required prefix, then the subjects in their
/// extracted order, then every header token not already registered, in
/// header order within each file and file order across files.
pub fn plan_column_order(subjects: &[String], headers: &[Vec<String>]) -> ColumnOrder {
    let mut order = ColumnOrder::new();

    for name in REQUIRED_COLUMNS {
        order.register(name);
    }

    for subject in subjects {
        order.register(subject);
    }

    for header in headers {
        for name in header {
            order.register(name);
        }
    }

    order
}
