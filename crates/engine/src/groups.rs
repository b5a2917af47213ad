use std::collections::{HashMap, HashSet};

use crate::category::Category;
use crate::cell::Cell;
use crate::config::{AuditConfig, Field};
use crate::record::{Subset, Table};

/// A cross-record consistency check: records sharing `group_by` must agree
/// on `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCheck {
    pub category: Category,
    pub group_by: Field,
    pub value: Field,
}

pub const STANDARD_GROUP_CHECKS: [GroupCheck; 2] = [
    GroupCheck {
        category: Category::PriceMismatchByDescription,
        group_by: Field::Description,
        value: Field::UnitPrice,
    },
    GroupCheck {
        category: Category::PriceMismatchByTag,
        group_by: Field::Tag,
        value: Field::UnitPrice,
    },
];

/// Every record whose `group_by` group holds more than one distinct
/// `value`, in table order.
///
/// Records with a blank group key never form or join a group. Values are
/// compared exactly, type included: `10` and `"10"` are two prices. The whole
/// group is reported, not only the records that differ from the majority.
pub fn find_inconsistent_groups<'t>(table: &'t Table, group_by: &str, value: &str) -> Subset<'t> {
    let mut groups: HashMap<&Cell, HashSet<&Cell>> = HashMap::new();
    for record in table {
        let key = record.get(group_by);
        if key.is_blank() {
            continue;
        }
        groups.entry(key).or_default().insert(record.get(value));
    }

    let inconsistent: HashSet<&Cell> = groups
        .into_iter()
        .filter(|(_, values)| values.len() > 1)
        .map(|(key, _)| key)
        .collect();

    if inconsistent.is_empty() {
        return Vec::new();
    }

    log::debug!(
        "{} '{group_by}' group(s) disagree on '{value}'",
        inconsistent.len()
    );

    table.select(|r| inconsistent.contains(r.get(group_by)))
}

/// Runs a fixed list of [`GroupCheck`]s against a table.
#[derive(Debug, Clone)]
pub struct GroupAnomalyDetector<'c> {
    config: &'c AuditConfig,
    checks: &'c [GroupCheck],
}

impl<'c> GroupAnomalyDetector<'c> {
    pub fn new(config: &'c AuditConfig) -> Self {
        Self::with_checks(config, &STANDARD_GROUP_CHECKS)
    }

    pub fn with_checks(config: &'c AuditConfig, checks: &'c [GroupCheck]) -> Self {
        Self { config, checks }
    }

    pub fn checks(&self) -> &[GroupCheck] {
        self.checks
    }

    pub fn detect<'t>(&self, table: &'t Table, check: &GroupCheck) -> Subset<'t> {
        let columns = &self.config.columns;
        find_inconsistent_groups(table, columns.name(check.group_by), columns.name(check.value))
    }

    /// One subset per check, in check order.
    pub fn evaluate<'t>(&self, table: &'t Table) -> Vec<(Category, Subset<'t>)> {
        self.checks
            .iter()
            .map(|check| (check.category, self.detect(table, check)))
            .collect()
    }
}
