use serde::Serialize;

/// Every anomaly category the audit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MissingQuantity,
    ZeroUnitPrice,
    MissingValidity,
    MissingTechnicalEvaluation,
    MissingDeliveryPlace,
    MissingIncoterms,
    MissingTransport,
    AtSiteWithLogistics,
    MissingLogistics,
    PriceMismatchByDescription,
    PriceMismatchByTag,
}

impl Category {
    /// Sheet order of the assembled report.
    pub const REPORT_ORDER: [Category; 11] = [
        Category::MissingIncoterms,
        Category::MissingTechnicalEvaluation,
        Category::MissingValidity,
        Category::ZeroUnitPrice,
        Category::MissingQuantity,
        Category::PriceMismatchByDescription,
        Category::PriceMismatchByTag,
        Category::MissingTransport,
        Category::MissingDeliveryPlace,
        Category::MissingLogistics,
        Category::AtSiteWithLogistics,
    ];

    /// Report name, used verbatim as the sheet title (before truncation).
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingQuantity => "Sin Cantidad",
            Self::ZeroUnitPrice => "Precios Unitarios en 0",
            Self::MissingValidity => "Sin Validez",
            Self::MissingTechnicalEvaluation => "Analisis de oferta Nulos",
            Self::MissingDeliveryPlace => "Sin Lugar de Entrega",
            Self::MissingIncoterms => "Incoterms Nulos",
            Self::MissingTransport => "Sin medio de transporte",
            Self::AtSiteWithLogistics => "AT SITE CON LOGISTICA CARGADA",
            Self::MissingLogistics => "Sin logistica cargada",
            Self::PriceMismatchByDescription => "PU Distinto según descripción",
            Self::PriceMismatchByTag => "PU Distinto según TAG",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn report_order_lists_every_category_once() {
        let unique: HashSet<_> = Category::REPORT_ORDER.iter().collect();
        assert_eq!(unique.len(), Category::REPORT_ORDER.len());
    }

    #[test]
    fn labels_fit_a_sheet_name() {
        for c in Category::REPORT_ORDER {
            assert!(c.label().chars().count() <= 31, "{c}");
        }
    }
}
