//! Runs the `ecotruck` binary against a temporary store
//!
//! HOME and XDG_CONFIG_HOME point into the temp dir so the user's real
//! configuration is never read.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ecotruck"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run ecotruck")
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let output = run(home, args);
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn scenario() -> String {
    fixtures_dir()
        .join("two_retreads.toml")
        .display()
        .to_string()
}

#[test]
fn test_calculate_then_query() {
    let home = TempDir::new().unwrap();
    let gains = fixtures_dir().join("gains.json").display().to_string();

    let record = run_json(
        home.path(),
        &[
            "calculate", &scenario(), "--session", "s-1", "--user", "Paula", "--gains", &gains,
            "-f", "json",
        ],
    );
    let id = record["id"].as_str().unwrap().to_string();
    let total = record["result"]["itemizedSavings"]["total"].as_f64().unwrap();
    assert!((total - 23911.360946745564).abs() < 1e-6);
    assert_eq!(record["form"]["retreadingCycles"], "2");

    let page = run_json(home.path(), &["list", "-f", "json"]);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], id.as_str());

    let last = run_json(home.path(), &["last", "s-1", "-f", "json"]);
    assert_eq!(last["id"], id.as_str());

    let report = run(home.path(), &["report", &id[..8]]);
    assert!(report.status.success());
    let text = String::from_utf8(report.stdout).unwrap();
    assert!(text.contains("Rodofrio Logística"));
    assert!(text.contains("Fonte: Histórico de recapagens 2024"));
    assert!(text.contains("R$ 1.550,50"));

    let stats = run_json(home.path(), &["stats", "-f", "json"]);
    assert_eq!(stats["total_calculations"], 1);
    assert_eq!(stats["unique_companies"], 1);
}

#[test]
fn test_dry_run_does_not_store() {
    let home = TempDir::new().unwrap();
    let result = run_json(home.path(), &["calculate", &scenario(), "--dry-run", "-f", "json"]);
    assert!((result["tireCycle"]["total"].as_f64().unwrap() - 19.5).abs() < 1e-9);

    let page = run_json(home.path(), &["list", "-f", "json"]);
    assert_eq!(page["total"], 0);
}

#[test]
fn test_invalid_scenario_reports_fields() {
    let home = TempDir::new().unwrap();
    let bad = home.path().join("bad.json");
    std::fs::write(
        &bad,
        r#"{
            "companyName": "",
            "tirePressureCheck": "semanal",
            "fleetSize": 0,
            "totalTires": 10,
            "fuelConsumption": 2.0,
            "fuelPrice": 5.0,
            "monthlyMileage": 1000,
            "tireLifespan": 50000,
            "tirePrice": 1000,
            "retreadPrice": 300,
            "retreadingCycles": "1"
        }"#,
    )
    .unwrap();

    let output = run(home.path(), &["calculate", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Validation failed"));
    assert!(stderr.contains("fleetSize"));
    assert!(stderr.contains("r1TireLifespan"));
}

#[test]
fn test_export_csv() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["calculate", &scenario(), "-f", "json"]);

    let out = home.path().join("out.csv");
    let output = run(home.path(), &["export", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("ID,Empresa,Frota,Pneus"));
    assert!(lines.next().unwrap().ends_with("Usuário não identificado"));
}

#[test]
fn test_config_store_dir_flag() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("custom-store");
    run_json(
        home.path(),
        &["calculate", &scenario(), "--store-dir", store.to_str().unwrap(), "-f", "json"],
    );
    assert!(store.join("calculations.json").exists());
}
