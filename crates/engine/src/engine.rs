use chrono::SecondsFormat;
use indexmap::IndexMap;
use serde::Serialize;

use crate::category::Category;
use crate::config::AuditConfig;
use crate::context::RunContext;
use crate::extract::TableExtractor;
use crate::groups::GroupAnomalyDetector;
use crate::record::{Subset, Table};
use crate::report::{ReportAssembler, ReportSet, SheetPayload};
use crate::rules::RuleEngine;
use crate::summary::{compute_summary, AuditSummary};

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub source: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Everything one run produces. Borrows the table it was computed from.
#[derive(Debug, Clone)]
pub struct AuditOutcome<'t> {
    pub meta: AuditMeta,
    pub summary: AuditSummary,
    pub report: ReportSet<'t>,
}

/// Serializable view of an outcome (no record payloads).
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport<'a> {
    pub meta: &'a AuditMeta,
    pub summary: &'a AuditSummary,
}

impl AuditOutcome<'_> {
    pub fn to_report(&self) -> AuditReport<'_> {
        AuditReport {
            meta: &self.meta,
            summary: &self.summary,
        }
    }

    /// Sheet payloads for the output workbook.
    pub fn sheets(&self, config: &AuditConfig) -> Vec<SheetPayload> {
        ReportAssembler::new(&config.report.placeholder).assemble(&self.report)
    }
}

/// Decode-side half of a run: grid to table.
pub fn extract(config: &AuditConfig, ctx: &RunContext, grid: &[Vec<crate::cell::Cell>]) -> Table {
    TableExtractor::new(config.layout.clone()).extract(ctx, grid)
}

/// Run every rule and group check over `table` and collect the results in
/// report order.
pub fn audit<'t>(config: &AuditConfig, ctx: &RunContext, table: &'t Table) -> AuditOutcome<'t> {
    let mut found: IndexMap<Category, Subset<'t>> = RuleEngine::new(config).evaluate(table);
    found.extend(GroupAnomalyDetector::new(config).evaluate(table));

    let report: ReportSet<'t> = Category::REPORT_ORDER
        .iter()
        .map(|category| {
            let records = found.swap_remove(category).unwrap_or_default();
            (category.label(), records)
        })
        .collect();

    for (name, records) in report.iter() {
        log::debug!("{name}: {} record(s)", records.len());
    }

    let summary = compute_summary(table, &report);
    log::info!(
        "{}: {} record(s) checked, {} flagged across {} categor{}",
        ctx.source_name,
        summary.total_records,
        summary.flagged_records,
        summary.flagged_categories,
        if summary.flagged_categories == 1 { "y" } else { "ies" }
    );

    AuditOutcome {
        meta: AuditMeta {
            source: ctx.source_name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: ctx.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        summary,
        report,
    }
}
