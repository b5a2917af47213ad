//! Diagnostic dump of an extracted table: the raw records, a per-value type
//! breakdown of the first rows, and overall shape statistics.

use crate::cell::Cell;
use crate::record::{Record, Table};
use crate::report::{SheetBody, SheetPayload};

/// Rows covered by the type breakdown sheet.
pub const TYPE_SAMPLE_ROWS: usize = 10;

pub const SHEET_RECORDS: &str = "Datos Originales";
pub const SHEET_TYPES: &str = "Análisis de Tipos";
pub const SHEET_STATS: &str = "Estadísticas";

pub fn build_debug_sheets(table: &Table) -> Vec<SheetPayload> {
    let records: Vec<&Record> = table.iter().collect();
    vec![
        SheetPayload::from_records(SHEET_RECORDS, &records),
        type_sheet(table),
        stats_sheet(table),
    ]
}

/// `Fila`, then for each column `K`: `K`, `K_TIPO`, `K_VACIO`.
fn type_sheet(table: &Table) -> SheetPayload {
    let mut columns = vec!["Fila".to_string()];
    for name in table.columns() {
        columns.push(name.to_string());
        columns.push(format!("{name}_TIPO"));
        columns.push(format!("{name}_VACIO"));
    }

    let rows = table
        .iter()
        .take(TYPE_SAMPLE_ROWS)
        .enumerate()
        .map(|(i, record)| {
            let mut row = vec![Cell::from((i + 1) as i64)];
            for value in record.values() {
                row.push(value.clone());
                row.push(Cell::text(value.type_name()));
                row.push(Cell::text(if value.is_falsy() { "SÍ" } else { "NO" }));
            }
            row
        })
        .collect();

    SheetPayload {
        name: SHEET_TYPES.to_string(),
        body: SheetBody::Rows { columns, rows },
    }
}

fn stats_sheet(table: &Table) -> SheetPayload {
    let names: Vec<&str> = table.columns().collect();
    SheetPayload {
        name: SHEET_STATS.to_string(),
        body: SheetBody::Rows {
            columns: vec![
                "Total de Filas".into(),
                "Total de Columnas".into(),
                "Columnas".into(),
            ],
            rows: vec![vec![
                Cell::from(table.len() as i64),
                Cell::from(names.len() as i64),
                Cell::text(names.join(", ")),
            ]],
        },
    }
}
