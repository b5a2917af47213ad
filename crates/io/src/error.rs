use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// Input is not an Excel workbook by extension.
    #[error("{}: not an Excel file (expected .xlsx or .xls)", path.display())]
    UnsupportedFile { path: PathBuf },
    /// The workbook could not be opened or decoded.
    #[error("failed to open Excel file {}: {message}", path.display())]
    Open { path: PathBuf, message: String },
    #[error("{}: workbook contains no sheets", path.display())]
    NoSheets { path: PathBuf },
    #[error("failed to read sheet '{sheet}': {message}")]
    ReadSheet { sheet: String, message: String },
    /// Two output sheets share a title (e.g. after truncation).
    #[error("duplicate sheet name '{0}'")]
    DuplicateSheetName(String),
    #[error("failed to write sheet '{sheet}': {message}")]
    WriteSheet { sheet: String, message: String },
    #[error("failed to save {}: {message}", path.display())]
    Save { path: PathBuf, message: String },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fs(#[from] std::io::Error),
}
