// procaudit CLI - audit supplier quotation workbooks for missing or inconsistent data

mod exit_codes;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use procaudit_engine::debug::build_debug_sheets;
use procaudit_engine::engine::AuditReport;
use procaudit_engine::{audit, extract, AuditConfig, AuditError, RunContext};
use procaudit_io::{export_sheets, import_grid, json::export_summary, IoError};

use exit_codes::{config_exit_code, io_exit_code, EXIT_ANOMALIES, EXIT_SUCCESS, EXIT_USAGE, EXIT_WRITE};

#[derive(Parser)]
#[command(name = "procaudit")]
#[command(about = "Flag incomplete or inconsistent line items in supplier quotations")]
#[command(version)]
#[command(long_version = long_version())]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a quotation workbook and write one sheet per anomaly category
    #[command(after_help = "\
Examples:
  procaudit run cotizacion.xlsx
  procaudit run cotizacion.xlsx --out-dir reports --json
  procaudit run cotizacion.xlsx --config plantilla.toml --fail-on-anomalies
  procaudit run cotizacion.xlsx --debug-dump --summary-json resumen.json")]
    Run {
        /// Quotation workbook (.xlsx or .xls)
        input: PathBuf,

        /// TOML config (layout, column names, report settings)
        #[arg(long, short = 'c', env = "PROCAUDIT_CONFIG")]
        config: Option<PathBuf>,

        /// Directory for the report workbook (created if missing)
        #[arg(long, short = 'o', default_value = ".")]
        out_dir: PathBuf,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Also write the run summary as JSON to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Write a second workbook with the extracted table and type breakdown
        #[arg(long)]
        debug_dump: bool,

        /// Exit 1 when any category has records
        #[arg(long)]
        fail_on_anomalies: bool,
    },

    /// Load and validate a config file
    CheckConfig {
        /// TOML config file
        path: PathBuf,

        /// Print the resolved config (defaults filled in) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode and extract a workbook without running checks
    Inspect {
        /// Quotation workbook (.xlsx or .xls)
        input: PathBuf,

        #[arg(long, short = 'c', env = "PROCAUDIT_CONFIG")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("PROCAUDIT_COMMIT"), ")",
        "\nbuild:   ", env!("PROCAUDIT_PROFILE"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            input,
            config,
            out_dir,
            json,
            summary_json,
            debug_dump,
            fail_on_anomalies,
        } => cmd_run(RunArgs {
            input,
            config,
            out_dir,
            json,
            summary_json,
            debug_dump,
            fail_on_anomalies,
        }),
        Commands::CheckConfig { path, json } => cmd_check_config(path, json),
        Commands::Inspect { input, config, json } => cmd_inspect(input, config, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self { code: EXIT_WRITE, message: msg.into(), hint: None }
    }

    /// Exit 1 with nothing printed; the summary line already said why.
    pub fn anomalies() -> Self {
        Self { code: EXIT_ANOMALIES, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        let hint = match &err {
            IoError::UnsupportedFile { .. } => Some("save the quotation as .xlsx or .xls".to_string()),
            IoError::DuplicateSheetName(_) => {
                Some("two category names are identical after truncation to 31 characters".to_string())
            }
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<AuditError> for CliError {
    fn from(err: AuditError) -> Self {
        let hint = match &err {
            AuditError::ConfigParse(_) => {
                Some("known keys: at_site_value, [layout], [columns], [report]".to_string())
            }
            _ => None,
        };
        Self { code: config_exit_code(&err), message: err.to_string(), hint }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<AuditConfig, CliError> {
    match path {
        Some(path) => {
            let config = AuditConfig::load(path)?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(AuditConfig::default()),
    }
}

fn require_file(path: &Path) -> Result<(), CliError> {
    if !path.is_file() {
        return Err(CliError::args(format!("file not found: {}", path.display()))
            .with_hint("pass the path of an .xlsx or .xls quotation"));
    }
    Ok(())
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::write(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// run
// ============================================================================

struct RunArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    out_dir: PathBuf,
    json: bool,
    summary_json: Option<PathBuf>,
    debug_dump: bool,
    fail_on_anomalies: bool,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    report: AuditReport<'a>,
    output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug_output: Option<PathBuf>,
}

fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    require_file(&args.input)?;

    let ctx = RunContext::new(source_name(&args.input));
    let imported = import_grid(&args.input)?;
    tracing::info!(
        "decoded sheet '{}' ({} row(s), {} other sheet(s) ignored) in {} ms",
        imported.sheet_name,
        imported.grid.len(),
        imported.skipped_sheets,
        imported.import_duration_ms
    );

    let table = extract(&config, &ctx, &imported.grid);
    let outcome = audit(&config, &ctx, &table);

    std::fs::create_dir_all(&args.out_dir)
        .map_err(|e| CliError::write(format!("{}: {}", args.out_dir.display(), e)))?;

    let output = args.out_dir.join(ctx.artifact_name(&config.report.file_prefix));
    let written = export_sheets(&outcome.sheets(&config), &output)?;
    tracing::info!(
        "wrote {} ({} sheet(s), {} empty)",
        output.display(),
        written.sheets_exported,
        written.placeholder_sheets
    );

    let debug_output = if args.debug_dump {
        let path = args.out_dir.join(ctx.artifact_name(&config.report.debug_file_prefix));
        export_sheets(&build_debug_sheets(&table), &path)?;
        tracing::info!("wrote debug dump {}", path.display());
        Some(path)
    } else {
        None
    };

    if let Some(path) = &args.summary_json {
        export_summary(&outcome.to_report(), path)?;
        tracing::info!("wrote summary {}", path.display());
    }

    let summary = &outcome.summary;
    eprintln!(
        "{}: {} record(s), {} flagged in {} of {} categories -> {}",
        ctx.source_name,
        summary.total_records,
        summary.flagged_records,
        summary.flagged_categories,
        summary.categories.len(),
        output.display()
    );

    if args.json {
        print_json(&RunOutput {
            report: outcome.to_report(),
            output: output.clone(),
            debug_output,
        })?;
    }

    if args.fail_on_anomalies && summary.has_anomalies() {
        return Err(CliError::anomalies());
    }
    Ok(())
}

// ============================================================================
// check-config
// ============================================================================

fn cmd_check_config(path: PathBuf, json: bool) -> Result<(), CliError> {
    let config = AuditConfig::load(&path)?;

    if json {
        return print_json(&config);
    }

    println!("ok: {}", path.display());
    println!(
        "  header row {}, data from row {}, {} footer row(s), {} label column(s)",
        config.layout.header_row + 1,
        config.layout.data_start_row + 1,
        config.layout.footer_rows,
        config.layout.label_columns
    );
    println!("  at-site value: {}", config.at_site_value);
    println!("  report: {}_<timestamp>.xlsx", config.report.file_prefix);
    Ok(())
}

// ============================================================================
// inspect
// ============================================================================

#[derive(Serialize)]
struct InspectOutput {
    source: String,
    sheet: String,
    grid_rows: usize,
    columns: Vec<String>,
    records: usize,
    /// Configured column names that the header does not contain
    missing_columns: Vec<String>,
}

fn cmd_inspect(input: PathBuf, config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    require_file(&input)?;

    let ctx = RunContext::new(source_name(&input));
    let imported = import_grid(&input)?;
    let table = extract(&config, &ctx, &imported.grid);

    let columns: Vec<String> = table.columns().map(str::to_string).collect();
    let missing_columns = config
        .columns
        .entries()
        .into_iter()
        .filter(|(_, name)| table.schema().position(name).is_none())
        .map(|(_, name)| name.to_string())
        .collect();

    let out = InspectOutput {
        source: ctx.source_name,
        sheet: imported.sheet_name,
        grid_rows: imported.grid.len(),
        columns,
        records: table.len(),
        missing_columns,
    };

    if json {
        return print_json(&out);
    }

    println!("{} [{}]: {} grid row(s), {} record(s)", out.source, out.sheet, out.grid_rows, out.records);
    println!("columns ({}):", out.columns.len());
    for name in &out.columns {
        println!("  {}", name);
    }
    if !out.missing_columns.is_empty() {
        println!("not found in header:");
        for name in &out.missing_columns {
            println!("  {}", name);
        }
    }
    Ok(())
}
