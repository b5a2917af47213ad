use chrono::{DateTime, Utc};

/// Per-run state handed to the extractor and the report: which source is
/// being processed and when the run started. Created once per run, never
/// shared across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub source_name: String,
    pub started_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self::at(source_name, Utc::now())
    }

    pub fn at(source_name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            source_name: source_name.into(),
            started_at,
        }
    }

    /// Compact UTC stamp used in artifact names, e.g. `20261018T093005`.
    pub fn timestamp_tag(&self) -> String {
        self.started_at.format("%Y%m%dT%H%M%S").to_string()
    }

    /// `<prefix>_<stamp>.xlsx`
    pub fn artifact_name(&self, prefix: &str) -> String {
        format!("{prefix}_{}.xlsx", self.timestamp_tag())
    }
}
