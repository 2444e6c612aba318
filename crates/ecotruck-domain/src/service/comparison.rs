//! Side-by-side comparison of stored calculations

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::format::{format_brl, format_decimal, format_thousands, truncate_str};
use crate::model::CalculationRecord;

/// Typed value of one compared field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(Option<u32>),
    Money(Option<f64>),
    Percent(f64),
    Km(Option<u32>),
    KmPerLiter(f64),
}

impl FieldValue {
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Count(Some(n)) => format_thousands(u64::from(*n)),
            FieldValue::Money(Some(v)) => format_brl(*v),
            FieldValue::Percent(p) => format!("{}%", format_decimal(*p, 1)),
            FieldValue::Km(Some(km)) => format!("{} km", format_thousands(u64::from(*km))),
            FieldValue::KmPerLiter(v) => format!("{} km/l", format_decimal(*v, 2)),
            FieldValue::Count(None) | FieldValue::Money(None) | FieldValue::Km(None) => {
                "-".to_string()
            }
        }
    }
}

/// One compared field across every selected calculation
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<FieldValue>,
    /// True when not all calculations share the same value
    pub differs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparedCalculation {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub calculations: Vec<ComparedCalculation>,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn differing_rows(&self) -> impl Iterator<Item = &ComparisonRow> {
        self.rows.iter().filter(|r| r.differs)
    }
}

fn row<F>(label: &'static str, records: &[CalculationRecord], extract: F) -> ComparisonRow
where
    F: Fn(&CalculationRecord) -> FieldValue,
{
    let values: Vec<FieldValue> = records.iter().map(extract).collect();
    let differs = values.windows(2).any(|pair| pair[0] != pair[1]);
    ComparisonRow {
        label,
        values,
        differs,
    }
}

/// Build the comparison table, keeping the order of `records`
pub fn compare_calculations(records: &[CalculationRecord]) -> Comparison {
    let calculations = records
        .iter()
        .map(|r| ComparedCalculation {
            id: r.id,
            submitted_at: r.submitted_at,
        })
        .collect();

    let rows = vec![
        row("Company", records, |r| FieldValue::Text(r.form.company_name.clone())),
        row("User", records, |r| {
            FieldValue::Text(r.user_name.clone().unwrap_or_else(|| "N/A".to_string()))
        }),
        row("Fleet size", records, |r| FieldValue::Count(Some(r.form.input.fleet_size))),
        row("Total tires", records, |r| FieldValue::Count(Some(r.form.input.total_tires))),
        row("Fuel consumption", records, |r| {
            FieldValue::KmPerLiter(r.form.input.fuel_consumption)
        }),
        row("Fuel price", records, |r| FieldValue::Money(Some(r.form.input.fuel_price))),
        row("Monthly mileage", records, |r| FieldValue::Km(Some(r.form.input.monthly_mileage))),
        row("Tire lifespan", records, |r| FieldValue::Km(Some(r.form.input.tire_lifespan))),
        row("Tire price", records, |r| FieldValue::Money(Some(r.form.input.tire_price))),
        row("Retread price", records, |r| FieldValue::Money(Some(r.form.input.retread_price))),
        row("Pressure check", records, |r| {
            FieldValue::Text(r.form.tire_pressure_check.label().to_string())
        }),
        row("Retreading cycles", records, |r| {
            FieldValue::Text(r.form.input.retreading_cycles.to_string())
        }),
        row("Vehicles with tracking", records, |r| {
            FieldValue::Count(r.form.input.vehicles_with_tracking)
        }),
        row("Tracking cost", records, |r| {
            FieldValue::Money(r.form.input.tracking_cost_per_vehicle)
        }),
        row("Fuel savings %", records, |r| FieldValue::Percent(r.percentages.fuel_savings)),
        row("CPK improvement %", records, |r| {
            FieldValue::Percent(r.percentages.cpk_improvement)
        }),
        row("Carcass savings %", records, |r| {
            FieldValue::Percent(r.percentages.carcass_savings)
        }),
        row("R1 lifespan", records, |r| FieldValue::Km(r.form.input.r1_tire_lifespan)),
        row("R2 lifespan", records, |r| FieldValue::Km(r.form.input.r2_tire_lifespan)),
        row("Savings/tire/month", records, |r| {
            FieldValue::Money(Some(r.result.savings_per_tire_per_month))
        }),
        row("Total savings", records, |r| FieldValue::Money(Some(r.total_savings()))),
    ];

    Comparison { calculations, rows }
}

/// Plain-text table of a comparison; differing rows are marked with `*`
pub fn generate_comparison_report(comparison: &Comparison) -> String {
    let label_width: usize = 24;
    let column_width: usize = 18;

    let mut report = String::new();
    report.push_str(&format!(
        "Comparing {} calculations\n",
        comparison.calculations.len()
    ));
    let width = label_width + 2 + (column_width + 1) * comparison.calculations.len();
    report.push_str(&"-".repeat(width));
    report.push('\n');

    report.push_str(&format!("  {:<label_width$}", "Field"));
    for calc in &comparison.calculations {
        let id = calc.id.simple().to_string();
        report.push_str(&format!(" {:>column_width$}", format!("#{}", &id[..8])));
    }
    report.push('\n');
    report.push_str(&format!("  {:<label_width$}", "Submitted"));
    for calc in &comparison.calculations {
        report.push_str(&format!(
            " {:>column_width$}",
            calc.submitted_at.format("%d/%m/%Y").to_string()
        ));
    }
    report.push('\n');
    report.push_str(&"-".repeat(width));
    report.push('\n');

    for row in &comparison.rows {
        let marker = if row.differs { '*' } else { ' ' };
        report.push_str(&format!("{} {:<label_width$}", marker, row.label));
        for value in &row.values {
            report.push_str(&format!(
                " {:>column_width$}",
                truncate_str(&value.display(), column_width)
            ));
        }
        report.push('\n');
    }
    report.push_str(&"-".repeat(width));
    report.push('\n');
    report.push_str("* values differ between calculations\n");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CalculationInput, CalculatorForm, PercentageDefaults, RetreadingCycles, TirePressureCheck,
    };
    use crate::service::savings_calculator::compute;
    use chrono::TimeZone;

    fn record(fleet_size: u32, user: Option<&str>) -> CalculationRecord {
        let input = CalculationInput {
            fleet_size,
            total_tires: 120,
            fuel_consumption: 2.5,
            fuel_price: 5.79,
            monthly_mileage: 10000,
            tire_lifespan: 80000,
            tire_price: 2800.0,
            retread_price: 600.0,
            retreading_cycles: RetreadingCycles::Zero,
            r1_tire_lifespan: None,
            r2_tire_lifespan: None,
            vehicles_with_tracking: None,
            tracking_cost_per_vehicle: None,
            fuel_savings_percentage: None,
            cpk_improvement_percentage: None,
            carcass_savings_percentage: None,
        };
        let defaults = PercentageDefaults::default();
        let percentages = input.percentages(&defaults);
        let result = compute(&input, &defaults);
        let form = CalculatorForm {
            company_name: "Viação Central".to_string(),
            tire_pressure_check: TirePressureCheck::Monthly,
            input,
            fuel_savings_source: None,
            cpk_improvement_source: None,
            carcass_savings_source: None,
        };
        let mut rec = CalculationRecord::new(
            form,
            percentages,
            result,
            Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap(),
        );
        rec.user_name = user.map(str::to_string);
        rec
    }

    fn find<'a>(comparison: &'a Comparison, label: &str) -> &'a ComparisonRow {
        comparison.rows.iter().find(|r| r.label == label).unwrap()
    }

    #[test]
    fn test_flags_differing_fields() {
        let records = vec![record(40, Some("Ana Souza")), record(55, Some("Ana Souza"))];
        let comparison = compare_calculations(&records);

        assert_eq!(comparison.calculations.len(), 2);
        assert!(find(&comparison, "Fleet size").differs);
        assert!(find(&comparison, "Total savings").differs);
        assert!(!find(&comparison, "Company").differs);
        assert!(!find(&comparison, "User").differs);
        assert!(!find(&comparison, "Tire price").differs);
    }

    #[test]
    fn test_single_calculation_never_differs() {
        let comparison = compare_calculations(&[record(40, None)]);
        assert_eq!(comparison.differing_rows().count(), 0);
        assert_eq!(find(&comparison, "User").values[0].display(), "N/A");
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Km(Some(80000)).display(), "80.000 km");
        assert_eq!(FieldValue::Money(Some(2800.0)).display(), "R$ 2.800,00");
        assert_eq!(FieldValue::Money(None).display(), "-");
        assert_eq!(FieldValue::Percent(5.0).display(), "5,0%");
        assert_eq!(FieldValue::KmPerLiter(2.5).display(), "2,50 km/l");
    }

    #[test]
    fn test_report_marks_differences() {
        let records = vec![record(40, None), record(55, None)];
        let report = generate_comparison_report(&compare_calculations(&records));
        assert!(report.contains("Comparing 2 calculations"));
        assert!(report.contains("* Fleet size"));
        assert!(report.contains("  Company"));
    }
}
