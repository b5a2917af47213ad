use std::collections::HashSet;

use serde::Serialize;

use crate::record::Table;
use crate::report::ReportSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total_records: usize,
    /// Categories with at least one record.
    pub flagged_categories: usize,
    /// Distinct records appearing in any category.
    pub flagged_records: usize,
    /// Per-category counts, in report order.
    pub categories: Vec<CategoryCount>,
}

impl AuditSummary {
    pub fn has_anomalies(&self) -> bool {
        self.flagged_records > 0
    }
}

/// Compute summary statistics for a report built from `table`.
pub fn compute_summary(table: &Table, report: &ReportSet<'_>) -> AuditSummary {
    let mut flagged: HashSet<usize> = HashSet::new();
    let mut categories = Vec::with_capacity(report.len());

    for (name, records) in report.iter() {
        flagged.extend(records.iter().map(|r| r.source_row()));
        categories.push(CategoryCount {
            name: name.to_string(),
            records: records.len(),
        });
    }

    AuditSummary {
        total_records: table.len(),
        flagged_categories: categories.iter().filter(|c| c.records > 0).count(),
        flagged_records: flagged.len(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::record::Schema;

    #[test]
    fn summary_counts() {
        let schema = Schema::new([("Cantidad", 1)]);
        let t = Table::from_rows(
            schema,
            (0..4).map(|i| (13 + i, vec![Cell::number(i as f64)])),
        );
        let r = t.records();
        let report: ReportSet = [
            ("a", vec![&r[0], &r[1]]),
            ("b", vec![&r[1]]),
            ("c", vec![]),
        ]
        .into_iter()
        .collect();

        let summary = compute_summary(&t, &report);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.flagged_categories, 2);
        assert_eq!(summary.flagged_records, 2);
        assert_eq!(summary.categories[1], CategoryCount { name: "b".into(), records: 1 });
        assert!(summary.has_anomalies());
    }

    #[test]
    fn empty_report() {
        let t = Table::empty();
        let summary = compute_summary(&t, &ReportSet::new());
        assert_eq!(summary.total_records, 0);
        assert!(!summary.has_anomalies());
        assert!(summary.categories.is_empty());
    }
}
