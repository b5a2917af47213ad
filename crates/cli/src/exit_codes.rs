//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success (report written, anomalies or not)                |
//! | 1    | Anomalies found and `--fail-on-anomalies` was given       |
//! | 2    | Usage error (bad arguments, unsupported input file)       |
//! | 3    | Input could not be read or decoded                        |
//! | 4    | Configuration file missing, unparsable, or invalid        |
//! | 5    | Output workbook or summary could not be written           |

use procaudit_engine::AuditError;
use procaudit_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Anomalies were found and the caller asked to treat them as failure.
/// Like `diff(1)`, exit 1 means "something differs," not "crashed."
pub const EXIT_ANOMALIES: u8 = 1;

/// Usage error - bad arguments, input that is not an Excel file.
pub const EXIT_USAGE: u8 = 2;

/// Input workbook could not be opened or decoded.
pub const EXIT_READ: u8 = 3;

/// Configuration could not be loaded or failed validation.
pub const EXIT_CONFIG: u8 = 4;

/// Output could not be written (including duplicate sheet names).
pub const EXIT_WRITE: u8 = 5;

/// Map an I/O-layer error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnsupportedFile { .. } => EXIT_USAGE,
        IoError::Open { .. } | IoError::NoSheets { .. } | IoError::ReadSheet { .. } => EXIT_READ,
        IoError::DuplicateSheetName(_)
        | IoError::WriteSheet { .. }
        | IoError::Save { .. }
        | IoError::Json(_)
        | IoError::Fs(_) => EXIT_WRITE,
    }
}

/// Every configuration failure is a configuration exit.
pub fn config_exit_code(_err: &AuditError) -> u8 {
    EXIT_CONFIG
}
