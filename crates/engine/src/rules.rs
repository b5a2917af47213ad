use indexmap::IndexMap;

use crate::category::Category;
use crate::config::{AuditConfig, ColumnsConfig, Field};
use crate::record::{Record, Subset, Table};

/// A single-record check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Field holds numeric zero.
    Zero(Field),
    /// Field holds empty text. An absent column or a cell past the end of
    /// its row is `Empty`, not empty text, and does not match.
    Blank(Field),
    /// On-site delivery whose at-site total differs from the materials
    /// subtotal, with no item type.
    AtSiteWithLogistics,
    /// Off-site delivery whose at-site total equals the materials subtotal,
    /// with no item type.
    MissingLogistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub category: Category,
    pub predicate: Predicate,
}

/// Declaration order of the scalar rules; also the order of
/// [`RuleEngine::evaluate`] output.
pub const STANDARD_RULES: [Rule; 9] = [
    Rule { category: Category::MissingQuantity, predicate: Predicate::Zero(Field::Quantity) },
    Rule { category: Category::ZeroUnitPrice, predicate: Predicate::Zero(Field::UnitPrice) },
    Rule { category: Category::MissingValidity, predicate: Predicate::Zero(Field::Validity) },
    Rule {
        category: Category::MissingTechnicalEvaluation,
        predicate: Predicate::Blank(Field::TechnicalEvaluation),
    },
    Rule { category: Category::MissingDeliveryPlace, predicate: Predicate::Blank(Field::DeliveryPlace) },
    Rule { category: Category::MissingIncoterms, predicate: Predicate::Blank(Field::DeliveryCondition) },
    Rule { category: Category::MissingTransport, predicate: Predicate::Blank(Field::TransportMethod) },
    Rule { category: Category::AtSiteWithLogistics, predicate: Predicate::AtSiteWithLogistics },
    Rule { category: Category::MissingLogistics, predicate: Predicate::MissingLogistics },
];

/// Applies independent per-record rules to a table.
///
/// Rules share no state and never see each other's results; each one is a
/// single pass over the table producing the matching records in table order.
#[derive(Debug, Clone)]
pub struct RuleEngine<'c> {
    columns: &'c ColumnsConfig,
    at_site_value: &'c str,
    rules: &'c [Rule],
}

impl<'c> RuleEngine<'c> {
    pub fn new(config: &'c AuditConfig) -> Self {
        Self::with_rules(config, &STANDARD_RULES)
    }

    pub fn with_rules(config: &'c AuditConfig, rules: &'c [Rule]) -> Self {
        Self {
            columns: &config.columns,
            at_site_value: &config.at_site_value,
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        self.rules
    }

    /// Matching records per rule, in rule declaration order.
    pub fn evaluate<'t>(&self, table: &'t Table) -> IndexMap<Category, Subset<'t>> {
        self.rules
            .iter()
            .map(|rule| (rule.category, table.select(|r| self.matches(rule.predicate, r))))
            .collect()
    }

    pub fn matches(&self, predicate: Predicate, record: &Record) -> bool {
        match predicate {
            Predicate::Zero(field) => self.field(record, field).is_zero(),
            Predicate::Blank(field) => self.field(record, field).is_empty_text(),
            Predicate::AtSiteWithLogistics => {
                self.is_at_site(record)
                    && self.field(record, Field::TotalAtSite)
                        != self.field(record, Field::SubtotalMaterials)
                    && self.field(record, Field::ItemType).is_empty_text()
            }
            Predicate::MissingLogistics => {
                !self.is_at_site(record)
                    && self.field(record, Field::TotalAtSite)
                        == self.field(record, Field::SubtotalMaterials)
                    && self.field(record, Field::ItemType).is_empty_text()
            }
        }
    }

    fn field<'r>(&self, record: &'r Record, field: Field) -> &'r crate::cell::Cell {
        record.get(self.columns.name(field))
    }

    fn is_at_site(&self, record: &Record) -> bool {
        self.field(record, Field::DeliveryPlace).as_text() == Some(self.at_site_value)
    }
}
