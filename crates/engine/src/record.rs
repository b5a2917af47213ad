use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cell::Cell;

static EMPTY: Cell = Cell::Empty;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Column names of a table, in header order, each mapped to the source grid
/// column it is read from. Shared by every record of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: IndexMap<String, usize>,
}

impl Schema {
    /// Build from `(name, grid column)` pairs. A repeated name keeps the
    /// position of its first occurrence and reads from its last column.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, col) in columns {
            map.insert(name.into(), col);
        }
        Self { columns: map }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Grid column each name reads from, in header order.
    pub fn source_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.values().copied()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One line item: an ordered mapping from column name to cell.
///
/// Values are stored positionally against a shared [`Schema`], so every
/// record of a table has exactly the table's key set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Cell>,
    source_row: usize,
}

impl Record {
    /// `values` is resized to the schema width, missing values become `Empty`.
    pub fn new(schema: Arc<Schema>, mut values: Vec<Cell>, source_row: usize) -> Self {
        values.resize(schema.len(), Cell::Empty);
        Self { schema, values, source_row }
    }

    /// Value of a column. Unknown columns read as `Empty`.
    pub fn get(&self, name: &str) -> &Cell {
        self.schema
            .position(name)
            .and_then(|i| self.values.get(i))
            .unwrap_or(&EMPTY)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schema.position(name).is_some()
    }

    /// Zero-based grid row this record was read from.
    pub fn source_row(&self) -> usize {
        self.source_row
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.schema.names().zip(self.values.iter())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Ordered records sharing one schema. Order is source-row order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    schema: Arc<Schema>,
    records: Vec<Record>,
}

/// An order-preserving selection of records borrowed from a [`Table`].
pub type Subset<'t> = Vec<&'t Record>;

impl Table {
    /// Build a table from positional rows. Each row is paired with the grid
    /// row index it came from.
    pub fn from_rows<I>(schema: Schema, rows: I) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<Cell>)>,
    {
        let schema = Arc::new(schema);
        let records = rows
            .into_iter()
            .map(|(source_row, values)| Record::new(Arc::clone(&schema), values, source_row))
            .collect();
        Self { schema, records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records satisfying `pred`, in table order.
    pub fn select<'t>(&'t self, pred: impl Fn(&Record) -> bool) -> Subset<'t> {
        self.records.iter().filter(|r| pred(r)).collect()
    }
}

impl<'t> IntoIterator for &'t Table {
    type Item = &'t Record;
    type IntoIter = std::slice::Iter<'t, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
