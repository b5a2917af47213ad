use crate::cell::Cell;
use crate::config::LayoutConfig;
use crate::context::RunContext;
use crate::record::{Schema, Table};

/// Raw decoded sheet: rows of cells, row 0 is the first sheet row.
pub type Grid = Vec<Vec<Cell>>;

/// Turns a raw grid into a [`Table`] using a fixed positional layout.
///
/// Never fails. A grid with no data rows between the header and the footer
/// yields an empty table with no columns, and ragged rows read missing cells
/// as `Empty`.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    layout: LayoutConfig,
}

impl TableExtractor {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn extract(&self, ctx: &RunContext, grid: &[Vec<Cell>]) -> Table {
        let Some(header) = grid.get(self.layout.header_row) else {
            log::warn!(
                "{}: {} row(s), no header at row {}; nothing to check",
                ctx.source_name,
                grid.len(),
                self.layout.header_row + 1
            );
            return Table::empty();
        };

        let data = self.data_rows(grid);
        if data.is_empty() {
            log::warn!(
                "{}: {} row(s), no data rows between row {} and the footer; nothing to check",
                ctx.source_name,
                grid.len(),
                self.layout.data_start_row + 1
            );
            return Table::empty();
        }

        let schema = self.schema(header);
        let first_row = self.layout.data_start_row;

        log::debug!(
            "{}: header row {} -> {} column(s): {}",
            ctx.source_name,
            self.layout.header_row + 1,
            schema.len(),
            schema.names().collect::<Vec<_>>().join(", ")
        );

        let columns: Vec<usize> = schema.source_columns().collect();
        let rows = data.iter().enumerate().map(|(i, row)| {
            let values = columns
                .iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect();
            (first_row + i, values)
        });

        let table = Table::from_rows(schema, rows);
        log::info!("{}: extracted {} record(s)", ctx.source_name, table.len());
        table
    }

    /// Named header cells after the label columns, in column order.
    fn schema(&self, header: &[Cell]) -> Schema {
        Schema::new(
            header
                .iter()
                .enumerate()
                .skip(self.layout.label_columns)
                .filter_map(|(col, cell)| cell.header_name().map(|name| (name, col))),
        )
    }

    /// Rows from the data start up to, not including, the footer.
    fn data_rows<'g>(&self, grid: &'g [Vec<Cell>]) -> &'g [Vec<Cell>] {
        let end = grid.len().saturating_sub(self.layout.footer_rows);
        grid.get(self.layout.data_start_row..end).unwrap_or(&[])
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RunContext {
        RunContext::new("test.xlsx")
    }

    /// 12 preamble rows, then `header`, then `rows`, then a totals row.
    fn grid(header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Grid {
        let mut g: Grid = (0..12).map(|i| vec![Cell::text(format!("preamble {i}"))]).collect();
        g.push(header);
        g.extend(rows);
        g.push(vec![Cell::text("TOTAL"), Cell::number(999.0)]);
        g
    }

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::text(*v)).collect()
    }

    #[test]
    fn header_row_and_footer_convention() {
        let g = grid(
            cells(&["#", "Cantidad", "Precio Unitario"]),
            vec![
                vec![Cell::number(1.0), Cell::number(2.0), Cell::number(10.0)],
                vec![Cell::number(2.0), Cell::number(3.0), Cell::number(20.0)],
            ],
        );
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert_eq!(table.columns().collect::<Vec<_>>(), vec!["Cantidad", "Precio Unitario"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].get("Cantidad"), &Cell::number(2.0));
        assert_eq!(table.records()[0].source_row(), 13);
        assert_eq!(table.records()[1].get("Precio Unitario"), &Cell::number(20.0));
    }

    #[test]
    fn label_column_is_dropped_even_when_named() {
        let g = grid(cells(&["Item", "Cantidad"]), vec![vec![Cell::number(7.0), Cell::number(1.0)]]);
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert!(!table.records()[0].contains("Item"));
        assert_eq!(table.schema().len(), 1);
    }

    #[test]
    fn blank_header_cells_drop_their_column() {
        let g = grid(
            vec![Cell::text("#"), Cell::text("Cantidad"), Cell::Empty, Cell::text("Validez")],
            vec![vec![Cell::number(1.0), Cell::number(4.0), Cell::text("ignored"), Cell::number(30.0)]],
        );
        let table = TableExtractor::default().extract(&ctx(), &g);
        let r = &table.records()[0];
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["Cantidad", "Validez"]);
        assert_eq!(r.get("Validez"), &Cell::number(30.0));
    }

    #[test]
    fn short_row_reads_empty() {
        let g = grid(cells(&["#", "Cantidad", "Validez"]), vec![vec![Cell::number(1.0), Cell::number(4.0)]]);
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert_eq!(table.records()[0].get("Validez"), &Cell::Empty);
    }

    #[test]
    fn thirteen_rows_yield_no_records() {
        let mut g: Grid = (0..12).map(|_| vec![Cell::Empty]).collect();
        g.push(cells(&["#", "Cantidad"]));
        assert_eq!(g.len(), 13);
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert!(table.is_empty());
        assert!(table.schema().is_empty());
    }

    #[test]
    fn header_and_footer_only_yield_no_columns() {
        let g = grid(cells(&["#", "Cantidad", "Precio Unitario"]), vec![]);
        assert_eq!(g.len(), 14);
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert!(table.is_empty());
        assert_eq!(table.columns().count(), 0);
    }

    #[test]
    fn fewer_than_header_rows_yield_empty_table() {
        let g: Grid = (0..5).map(|_| vec![Cell::text("x")]).collect();
        let table = TableExtractor::default().extract(&ctx(), &g);
        assert!(table.is_empty());
        assert!(table.schema().is_empty());
        assert!(TableExtractor::default().extract(&ctx(), &[]).is_empty());
    }

    #[test]
    fn custom_layout() {
        let layout = LayoutConfig {
            header_row: 0,
            data_start_row: 1,
            footer_rows: 0,
            label_columns: 0,
        };
        let g: Grid = vec![
            cells(&["Cantidad"]),
            vec![Cell::number(5.0)],
            vec![Cell::number(6.0)],
        ];
        let table = TableExtractor::new(layout).extract(&ctx(), &g);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].get("Cantidad"), &Cell::number(6.0));
    }
}
