// Integration tests for the `procaudit` binary: exit codes, artifacts, JSON output.
// Run with: cargo test -p procaudit-cli --test cli_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::Command;

use rust_xlsxwriter::Workbook;

fn procaudit() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_procaudit"));
    cmd.env_remove("RUST_LOG").env_remove("PROCAUDIT_CONFIG");
    cmd
}

/// Minimal quotation on the standard template: header on sheet row 13,
/// one line item with quantity 0, totals row.
fn write_quotation(dir: &Path, quantity: f64) -> PathBuf {
    let path = dir.join("cotizacion.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "COTIZACIÓN").unwrap();

    let header = [
        "#",
        "Descripción Item",
        "Código TAG",
        "Cantidad",
        "Precio Unitario",
        "Validez",
        "Evaluación Técnica",
        "Lugar de entrega",
        "Condición de entrega",
        "Medio de transporte",
        "Subtotal materiales",
        "Total AT SITE",
        "TIPO DE ITEM",
    ];
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(12, col as u16, *name).unwrap();
    }
    sheet.write_number(13, 0, 1.0).unwrap();
    sheet.write_string(13, 1, "Válvula").unwrap();
    sheet.write_string(13, 2, "V-1").unwrap();
    sheet.write_number(13, 3, quantity).unwrap();
    sheet.write_number(13, 4, 10.0).unwrap();
    sheet.write_number(13, 5, 30.0).unwrap();
    sheet.write_string(13, 6, "OK").unwrap();
    sheet.write_string(13, 7, "PLANTA").unwrap();
    sheet.write_string(13, 8, "DAP").unwrap();
    sheet.write_string(13, 9, "Camión").unwrap();
    sheet.write_number(13, 10, 10.0).unwrap();
    sheet.write_number(13, 11, 15.0).unwrap();
    sheet.write_string(14, 0, "TOTAL").unwrap();

    workbook.save(&path).unwrap();
    path
}

fn xlsx_files(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy().into_owned();
            name.starts_with(prefix) && name.ends_with(".xlsx")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_writes_report_and_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 0.0);
    let out_dir = dir.path().join("reports");

    let output = procaudit()
        .args(["run", input.to_str().unwrap(), "--out-dir", out_dir.to_str().unwrap(), "--json"])
        .output()
        .expect("procaudit run");

    assert!(output.status.success(), "exit code was {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["meta"]["source"], "cotizacion.xlsx");
    assert_eq!(value["summary"]["total_records"], 1);
    assert_eq!(value["summary"]["flagged_records"], 1);
    assert_eq!(value["summary"]["categories"].as_array().unwrap().len(), 11);

    let reports = xlsx_files(&out_dir, "resultado_");
    assert_eq!(reports.len(), 1);
    assert_eq!(value["output"], reports[0].to_str().unwrap());
}

#[test]
fn fail_on_anomalies_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 0.0);

    let status = procaudit()
        .args(["run", input.to_str().unwrap(), "--out-dir", dir.path().to_str().unwrap(), "--fail-on-anomalies"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn clean_quotation_passes_fail_on_anomalies() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 2.0);

    let status = procaudit()
        .args(["run", input.to_str().unwrap(), "--out-dir", dir.path().to_str().unwrap(), "--fail-on-anomalies"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));
}

#[test]
fn debug_dump_and_summary_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 0.0);
    let summary = dir.path().join("resumen.json");

    let status = procaudit()
        .args([
            "run",
            input.to_str().unwrap(),
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--debug-dump",
            "--summary-json",
            summary.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(xlsx_files(dir.path(), "DEBUG_dataframe_").len(), 1);
    let text = std::fs::read_to_string(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["summary"]["total_records"], 1);
}

#[test]
fn non_excel_input_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("datos.csv");
    std::fs::write(&input, "a,b\n1,2\n").unwrap();

    let output = procaudit().args(["run", input.to_str().unwrap()]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an Excel file"), "stderr: {stderr}");
}

#[test]
fn corrupt_workbook_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("roto.xlsx");
    std::fs::write(&input, b"definitely not a workbook").unwrap();

    let status = procaudit()
        .args(["run", input.to_str().unwrap(), "--out-dir", dir.path().to_str().unwrap()])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(3));
}

#[test]
fn invalid_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 1.0);
    let config = dir.path().join("plantilla.toml");
    std::fs::write(&config, "[layout]\nheader_row = 5\ndata_start_row = 5\n").unwrap();

    let status = procaudit()
        .args(["run", input.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(4));
}

// ---------------------------------------------------------------------------
// check-config / inspect
// ---------------------------------------------------------------------------

#[test]
fn check_config_prints_resolved_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plantilla.toml");
    std::fs::write(&config, "at_site_value = \"EN OBRA\"\n").unwrap();

    let output = procaudit()
        .args(["check-config", config.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["at_site_value"], "EN OBRA");
    assert_eq!(value["layout"]["header_row"], 12);
    assert_eq!(value["columns"]["quantity"], "Cantidad");
}

#[test]
fn check_config_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plantilla.toml");
    std::fs::write(&config, "[layout]\nheader = 3\n").unwrap();

    let status = procaudit().args(["check-config", config.to_str().unwrap()]).status().unwrap();
    assert_eq!(status.code(), Some(4));
}

#[test]
fn inspect_lists_columns_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_quotation(dir.path(), 1.0);

    let output = procaudit()
        .current_dir(dir.path())
        .args(["inspect", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"], 1);
    assert_eq!(value["columns"][0], "Descripción Item");
    assert_eq!(value["columns"].as_array().unwrap().len(), 12);
    assert!(value["missing_columns"].as_array().unwrap().is_empty());
    assert!(xlsx_files(dir.path(), "resultado_").is_empty());
}
