use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Audit settings. Every section has a default matching the standard
/// quotation template, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Delivery-place value that marks an on-site line item.
    pub at_site_value: String,
    pub layout: LayoutConfig,
    pub columns: ColumnsConfig,
    pub report: ReportConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            at_site_value: "AT-SITE".into(),
            layout: LayoutConfig::default(),
            columns: ColumnsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Positional layout of the source sheet. All indices are zero-based grid rows.
///
/// The header is found by position, never by content: row 13 of the sheet
/// (`header_row = 12`) names the columns, data starts on the following row,
/// and the last `footer_rows` rows are totals that are always discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub header_row: usize,
    pub data_start_row: usize,
    pub footer_rows: usize,
    /// Leading columns holding row labels rather than data.
    pub label_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_row: 12,
            data_start_row: 13,
            footer_rows: 1,
            label_columns: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// A logical field the checks read. Resolved to a header text through
/// [`ColumnsConfig::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Quantity,
    UnitPrice,
    Validity,
    TechnicalEvaluation,
    DeliveryPlace,
    DeliveryCondition,
    TransportMethod,
    TotalAtSite,
    SubtotalMaterials,
    ItemType,
    Description,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsConfig {
    pub quantity: String,
    pub unit_price: String,
    pub validity: String,
    pub technical_evaluation: String,
    pub delivery_place: String,
    pub delivery_condition: String,
    pub transport_method: String,
    pub total_at_site: String,
    pub subtotal_materials: String,
    pub item_type: String,
    pub description: String,
    pub tag: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            quantity: "Cantidad".into(),
            unit_price: "Precio Unitario".into(),
            validity: "Validez".into(),
            technical_evaluation: "Evaluación Técnica".into(),
            delivery_place: "Lugar de entrega".into(),
            delivery_condition: "Condición de entrega".into(),
            transport_method: "Medio de transporte".into(),
            total_at_site: "Total AT SITE".into(),
            subtotal_materials: "Subtotal materiales".into(),
            item_type: "TIPO DE ITEM".into(),
            description: "Descripción Item".into(),
            tag: "Código TAG".into(),
        }
    }
}

impl ColumnsConfig {
    /// Header text for a logical field.
    pub fn name(&self, field: Field) -> &str {
        match field {
            Field::Quantity => &self.quantity,
            Field::UnitPrice => &self.unit_price,
            Field::Validity => &self.validity,
            Field::TechnicalEvaluation => &self.technical_evaluation,
            Field::DeliveryPlace => &self.delivery_place,
            Field::DeliveryCondition => &self.delivery_condition,
            Field::TransportMethod => &self.transport_method,
            Field::TotalAtSite => &self.total_at_site,
            Field::SubtotalMaterials => &self.subtotal_materials,
            Field::ItemType => &self.item_type,
            Field::Description => &self.description,
            Field::Tag => &self.tag,
        }
    }

    /// `(key, header text)` for every configured column.
    pub fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("quantity", &self.quantity),
            ("unit_price", &self.unit_price),
            ("validity", &self.validity),
            ("technical_evaluation", &self.technical_evaluation),
            ("delivery_place", &self.delivery_place),
            ("delivery_condition", &self.delivery_condition),
            ("transport_method", &self.transport_method),
            ("total_at_site", &self.total_at_site),
            ("subtotal_materials", &self.subtotal_materials),
            ("item_type", &self.item_type),
            ("description", &self.description),
            ("tag", &self.tag),
        ]
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Marker written into the single cell of a category with no records.
    pub placeholder: String,
    pub file_prefix: String,
    pub debug_file_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            placeholder: "Sin resultados".into(),
            file_prefix: "resultado".into(),
            debug_file_prefix: "DEBUG_dataframe".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, AuditError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| AuditError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let input = std::fs::read_to_string(path).map_err(|source| AuditError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        let layout = &self.layout;
        if layout.data_start_row <= layout.header_row {
            return Err(AuditError::ConfigValidation(format!(
                "layout.data_start_row ({}) must come after layout.header_row ({})",
                layout.data_start_row, layout.header_row
            )));
        }

        for (key, name) in self.columns.entries() {
            if name.trim().is_empty() {
                return Err(AuditError::ConfigValidation(format!(
                    "columns.{key} must not be blank"
                )));
            }
        }

        if self.at_site_value.is_empty() {
            return Err(AuditError::ConfigValidation(
                "at_site_value must not be blank".into(),
            ));
        }

        if self.report.placeholder.is_empty() {
            return Err(AuditError::ConfigValidation(
                "report.placeholder must not be blank".into(),
            ));
        }

        for (key, prefix) in [
            ("file_prefix", &self.report.file_prefix),
            ("debug_file_prefix", &self.report.debug_file_prefix),
        ] {
            if prefix.is_empty() || prefix.contains(['/', '\\']) {
                return Err(AuditError::ConfigValidation(format!(
                    "report.{key} must be a non-empty file name prefix"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
