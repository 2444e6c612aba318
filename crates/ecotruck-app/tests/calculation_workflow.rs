//! End-to-end workflow over a file-backed store

use chrono::{Duration, TimeZone, Utc};
use tempfile::tempdir;

use ecotruck_app::app::{
    CalculationFilter, CalculationService, Period, QueryService, SubmitOptions,
};
use ecotruck_app::config::Config;
use ecotruck_app::export::{export_calculations, generate_calculation_report};
use ecotruck_app::repository::open_calculation_repo;
use ecotruck_domain::model::{default_additional_gains, CalculatorForm};
use ecotruck_types::ExportFormat;

const FORM: &str = r#"{
    "companyName": "Rodoviário Campos",
    "tirePressureCheck": "quinzenal",
    "fleetSize": 50,
    "totalTires": 300,
    "fuelConsumption": 2.5,
    "fuelPrice": 5.79,
    "monthlyMileage": 10000,
    "tireLifespan": 80000,
    "tirePrice": 2800,
    "retreadPrice": 600,
    "retreadingCycles": "2",
    "r1TireLifespan": 60000,
    "r2TireLifespan": 55000,
    "carcassSavingsPercentage": 15,
    "vehiclesWithTracking": 20,
    "trackingCostPerVehicle": 89.9,
    "carcassSavingsSource": "Histórico da frota"
}"#;

#[test]
fn test_submit_list_compare_export() {
    let dir = tempdir().unwrap();
    let config = Config {
        store_dir: Some(dir.path().join("store")),
        ..Config::default()
    };
    let repo = open_calculation_repo(&config).unwrap();
    let calculator = CalculationService::new(&repo, config.percentage_defaults);
    let queries = QueryService::new(&repo);

    let form: CalculatorForm = serde_json::from_str(FORM).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap();

    let mut gains = default_additional_gains();
    gains[0].value = 1500.0;
    let first = calculator
        .submit_at(
            form.clone(),
            SubmitOptions::new()
                .with_session("sess-42".to_string())
                .with_additional_gains(gains),
            now - Duration::days(2),
        )
        .unwrap();
    assert!((first.total_savings() - 25709.360946745564).abs() < 1e-6);
    assert!((first.additional_gains_total() - 1500.0).abs() < 1e-9);

    let mut cheaper = form.clone();
    cheaper.input.fleet_size = 40;
    let second = calculator
        .submit_at(
            cheaper,
            SubmitOptions::new().with_session("sess-42".to_string()),
            now - Duration::hours(1),
        )
        .unwrap();

    let last = queries.last_for_session("sess-42").unwrap().unwrap();
    assert_eq!(last.id, second.id);

    let today = queries
        .list(
            &CalculationFilter {
                period: Period::Today,
                ..CalculationFilter::default()
            },
            now,
        )
        .unwrap();
    assert_eq!(today.total, 1);

    let comparison = queries.compare(&[second.id, first.id]).unwrap();
    assert_eq!(comparison.calculations[0].id, first.id);
    let fleet = comparison
        .rows
        .iter()
        .find(|r| r.label == "Fleet size")
        .unwrap();
    assert!(fleet.differs);

    let csv_path = dir.path().join("export.csv");
    let all = queries
        .list(&CalculationFilter::default(), now)
        .unwrap()
        .items;
    export_calculations(&all, ExportFormat::Csv, &csv_path).unwrap();
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 3);

    let report = generate_calculation_report(&first);
    assert!(report.contains("Fonte: Histórico da frota"));
    assert!(report.contains("2ª recapagem"));
}

#[test]
fn test_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let config = Config {
        store_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let form: CalculatorForm = serde_json::from_str(FORM).unwrap();

    let id = {
        let repo = open_calculation_repo(&config).unwrap();
        CalculationService::new(&repo, config.percentage_defaults)
            .submit(form, SubmitOptions::new())
            .unwrap()
            .id
    };

    let repo = open_calculation_repo(&config).unwrap();
    let record = QueryService::new(&repo).get(&id).unwrap();
    assert_eq!(record.company_name(), "Rodoviário Campos");
    assert!((record.result.savings_per_tire_per_month - 85.69786982248522).abs() < 1e-6);
}
