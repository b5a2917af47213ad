//! `procaudit-engine`: procurement line-item extraction and data-quality checks.
//!
//! Pure engine crate: receives a decoded grid, returns flagged records and
//! sheet payloads. No file or spreadsheet I/O.

pub mod category;
pub mod cell;
pub mod config;
pub mod context;
pub mod debug;
pub mod engine;
pub mod error;
pub mod extract;
pub mod groups;
pub mod record;
pub mod report;
pub mod rules;
pub mod summary;

pub use category::Category;
pub use cell::Cell;
pub use config::AuditConfig;
pub use context::RunContext;
pub use engine::{audit, extract, AuditOutcome};
pub use error::AuditError;
pub use extract::{Grid, TableExtractor};
pub use groups::GroupAnomalyDetector;
pub use record::{Record, Schema, Subset, Table};
pub use report::{ReportAssembler, ReportSet, SheetBody, SheetPayload};
pub use rules::RuleEngine;
pub use summary::AuditSummary;
