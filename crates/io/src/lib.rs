// Workbook and report file I/O

pub mod error;
pub mod json;
pub mod xlsx;

pub use error::IoError;
pub use xlsx::{export_sheets, import_grid, is_accepted_file, ExportResult, ImportedGrid};
