use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors. The data path (extract, rules, groups, report) has no
/// failure modes of its own.
#[derive(Debug, Error)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (bad layout, blank column name, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// The config file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
