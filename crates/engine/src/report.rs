use indexmap::IndexMap;

use crate::cell::Cell;
use crate::record::Subset;

/// Hard limit on worksheet titles imposed by the xlsx format.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Straight prefix cut to [`MAX_SHEET_NAME_CHARS`] characters. Two names
/// sharing a prefix truncate to the same title; nothing here detects that.
pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Report set
// ---------------------------------------------------------------------------

/// Ordered mapping from category name to the records it flagged. Iteration
/// order is insertion order and is carried unchanged into the output.
#[derive(Debug, Clone, Default)]
pub struct ReportSet<'t> {
    categories: IndexMap<String, Subset<'t>>,
}

impl<'t> ReportSet<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category. Re-inserting a name replaces its records and
    /// keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, records: Subset<'t>) {
        self.categories.insert(name.into(), records);
    }

    pub fn get(&self, name: &str) -> Option<&Subset<'t>> {
        self.categories.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Subset<'t>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'t, S: Into<String>> FromIterator<(S, Subset<'t>)> for ReportSet<'t> {
    fn from_iter<I: IntoIterator<Item = (S, Subset<'t>)>>(iter: I) -> Self {
        let mut set = ReportSet::new();
        for (name, records) in iter {
            set.insert(name, records);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Sheet payloads
// ---------------------------------------------------------------------------

/// Content of one output sheet, ready for a tabular writer.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetBody {
    /// A header row of column names followed by one row per record.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
    /// A single cell holding a marker text.
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetPayload {
    pub name: String,
    pub body: SheetBody,
}

impl SheetPayload {
    /// Sheet from flat records; columns are the first record's columns.
    pub fn from_records(name: &str, records: &[&crate::record::Record]) -> Self {
        let columns = records
            .first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default();
        let rows = records.iter().map(|r| r.values().to_vec()).collect();
        Self {
            name: truncate_sheet_name(name),
            body: SheetBody::Rows { columns, rows },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, SheetBody::Placeholder(_))
    }

    /// Number of data rows (0 for a placeholder).
    pub fn row_count(&self) -> usize {
        match &self.body {
            SheetBody::Rows { rows, .. } => rows.len(),
            SheetBody::Placeholder(_) => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Turns a [`ReportSet`] into sheet payloads: one sheet per category, in
/// order, names truncated, empty categories replaced by a marker sheet.
#[derive(Debug, Clone)]
pub struct ReportAssembler<'c> {
    placeholder: &'c str,
}

impl<'c> ReportAssembler<'c> {
    pub fn new(placeholder: &'c str) -> Self {
        Self { placeholder }
    }

    pub fn assemble(&self, report: &ReportSet<'_>) -> Vec<SheetPayload> {
        report
            .iter()
            .map(|(name, records)| {
                if records.is_empty() {
                    SheetPayload {
                        name: truncate_sheet_name(name),
                        body: SheetBody::Placeholder(self.placeholder.to_string()),
                    }
                } else {
                    SheetPayload::from_records(name, records)
                }
            })
            .collect()
    }
}
