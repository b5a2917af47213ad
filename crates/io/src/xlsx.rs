// Excel grid import (xlsx, xls) and sheet-payload export (xlsx only)
//
// Import: first worksheet only, decoded to a raw grid of typed cells. Grid
//         row/col 0 is sheet cell A1 regardless of where the used range begins.
// Export: one worksheet per payload, header row then values, or a single
//         marker cell for placeholder sheets.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Range, Reader};
use procaudit_engine::report::{SheetBody, SheetPayload};
use procaudit_engine::{Cell, Grid};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};

use crate::error::IoError;

/// Extensions accepted as input, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Result of decoding a workbook into a grid
#[derive(Debug, Clone)]
pub struct ImportedGrid {
    /// Name of the worksheet the grid was read from
    pub sheet_name: String,
    pub grid: Grid,
    /// Sheets in the workbook that were not read
    pub skipped_sheets: usize,
    pub import_duration_ms: u128,
}

/// Result of writing sheet payloads to a workbook
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub placeholder_sheets: usize,
    /// Data rows written, header rows excluded
    pub rows_exported: usize,
}

pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ACCEPTED_EXTENSIONS.iter().any(|a| e.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Decode the first worksheet of an Excel file into a grid.
pub fn import_grid(path: &Path) -> Result<ImportedGrid, IoError> {
    let start_time = Instant::now();

    if !is_accepted_file(path) {
        return Err(IoError::UnsupportedFile { path: path.to_path_buf() });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(IoError::NoSheets { path: path.to_path_buf() });
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::ReadSheet {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let grid = range_to_grid(&range);
    log::debug!(
        "read '{}' from {}: {} row(s) x {} col(s)",
        sheet_name,
        path.display(),
        grid.len(),
        grid.first().map_or(0, Vec::len)
    );

    Ok(ImportedGrid {
        sheet_name,
        grid,
        skipped_sheets: sheet_names.len() - 1,
        import_duration_ms: start_time.elapsed().as_millis(),
    })
}

/// Lay a calamine range out from A1. Rows and columns before the used
/// range, and blank cells within it, read as empty text.
///
/// Grid indices are sheet coordinates, not offsets from the used range's
/// origin, so the configured header row is a sheet row even when column A or
/// the top rows are blank.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let width = start_col + range.width();

    let mut grid: Grid = Vec::with_capacity(start_row + range.height());
    for _ in 0..start_row {
        grid.push(vec![Cell::text(""); width]);
    }
    for row in range.rows() {
        let mut cells = Vec::with_capacity(width);
        cells.resize(start_col, Cell::text(""));
        cells.extend(row.iter().map(data_to_cell));
        grid.push(cells);
    }
    grid
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::String(s) => Cell::text(s.as_str()),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => Cell::number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Error(e) => Cell::text(e.to_string()),
        Data::Empty => Cell::text(""),
    }
}

/// Write sheet payloads to an xlsx file, one worksheet each, in order.
///
/// Fails without writing if two payloads share a name.
pub fn export_sheets(sheets: &[SheetPayload], path: &Path) -> Result<ExportResult, IoError> {
    let mut seen = HashSet::new();
    for sheet in sheets {
        if !seen.insert(sheet.name.to_lowercase()) {
            return Err(IoError::DuplicateSheetName(sheet.name.clone()));
        }
    }

    let mut result = ExportResult::default();
    let mut xlsx_workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = xlsx_workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| write_err(&sheet.name, e))?;

        match &sheet.body {
            SheetBody::Placeholder(marker) => {
                worksheet
                    .write_string(0, 0, marker)
                    .map_err(|e| write_err(&sheet.name, e))?;
                result.placeholder_sheets += 1;
            }
            SheetBody::Rows { columns, rows } => {
                for (col, name) in columns.iter().enumerate() {
                    worksheet
                        .write_string_with_format(0, col as u16, name, &header_format)
                        .map_err(|e| write_err(&sheet.name, e))?;
                }
                for (i, row) in rows.iter().enumerate() {
                    write_row(worksheet, (i + 1) as u32, row).map_err(|e| write_err(&sheet.name, e))?;
                }
                result.rows_exported += rows.len();
            }
        }
        result.sheets_exported += 1;
    }

    xlsx_workbook.save(path).map_err(|e| IoError::Save {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("wrote {} sheet(s) to {}", result.sheets_exported, path.display());
    Ok(result)
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[Cell]) -> Result<(), rust_xlsxwriter::XlsxError> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Number(n) => {
                worksheet.write_number(row, col, n.0)?;
            }
            Cell::Text(s) if !s.is_empty() => {
                worksheet.write_string(row, col, s)?;
            }
            Cell::Text(_) | Cell::Empty => {}
        }
    }
    Ok(())
}

fn write_err(sheet: &str, e: rust_xlsxwriter::XlsxError) -> IoError {
    IoError::WriteSheet {
        sheet: sheet.to_string(),
        message: e.to_string(),
    }
}
