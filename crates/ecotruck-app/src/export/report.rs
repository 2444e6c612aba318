//! Plain-text report of one stored calculation

use ecotruck_domain::format::{format_brl, format_decimal, format_thousands, truncate_str};
use ecotruck_domain::model::CalculationRecord;

use super::csv::DATE_FORMAT;
use super::user_label;

const RULE_WIDTH: usize = 60;

fn rule(report: &mut String, c: char) {
    report.push_str(&c.to_string().repeat(RULE_WIDTH));
    report.push('\n');
}

fn line(report: &mut String, label: &str, value: &str) {
    report.push_str(&format!("  {:<34} {:>22}\n", label, value));
}

fn months(value: f64) -> String {
    format!("{} meses", format_decimal(value, 1))
}

/// Render the stored record; values come from the record, nothing is recomputed
pub fn generate_calculation_report(record: &CalculationRecord) -> String {
    let form = &record.form;
    let input = &form.input;
    let result = &record.result;
    let items = &result.itemized_savings;

    let mut report = String::new();
    rule(&mut report, '=');
    report.push_str("            EcoTruck - Relatório de Economia\n");
    rule(&mut report, '=');
    report.push('\n');
    line(&mut report, "Empresa", &truncate_str(record.company_name(), 22));
    line(&mut report, "Usuário", &truncate_str(user_label(record), 22));
    line(
        &mut report,
        "Data",
        &record.submitted_at.format(DATE_FORMAT).to_string(),
    );
    line(&mut report, "ID", &record.short_id());
    report.push('\n');

    report.push_str("[Resumo]\n");
    line(
        &mut report,
        "Economia por pneu/mês",
        &format_brl(result.savings_per_tire_per_month),
    );
    line(&mut report, "Economia mensal", &format_brl(items.total));
    line(
        &mut report,
        "Ganhos adicionais/mês",
        &format_brl(record.additional_gains_total()),
    );
    line(
        &mut report,
        "Total mensal",
        &format_brl(record.monthly_total_with_gains()),
    );
    line(
        &mut report,
        "Economia anual",
        &format_brl(record.annual_total_with_gains()),
    );
    report.push('\n');

    report.push_str("[Economia detalhada]\n");
    rule(&mut report, '-');
    line(&mut report, "Melhoria de CPK", &format_brl(items.cpk_improvement));
    line(&mut report, "Economia de combustível", &format_brl(items.fuel_savings));
    line(&mut report, "Economia de carcaça", &format_brl(items.carcass_savings));
    if result.tracking.vehicles_with_tracking > 0 {
        line(
            &mut report,
            &format!(
                "Rastreamento ({} veículos)",
                result.tracking.vehicles_with_tracking
            ),
            &format_brl(result.tracking.tracking_total_cost),
        );
    }
    rule(&mut report, '-');
    line(&mut report, "Total", &format_brl(items.total));
    report.push('\n');

    let gains: Vec<_> = record
        .additional_gains
        .iter()
        .filter(|g| g.counts())
        .collect();
    if !gains.is_empty() {
        report.push_str("[Ganhos adicionais]\n");
        for gain in gains {
            line(&mut report, &truncate_str(&gain.name, 34), &format_brl(gain.value));
        }
        report.push('\n');
    }

    report.push_str("[Ciclo de vida do pneu]\n");
    line(&mut report, "Pneu novo", &months(result.tire_cycle.new_tire));
    if input.retreading_cycles.count() >= 1 {
        line(&mut report, "1ª recapagem", &months(result.tire_cycle.r1));
    }
    if input.retreading_cycles.count() >= 2 {
        line(&mut report, "2ª recapagem", &months(result.tire_cycle.r2));
    }
    line(&mut report, "Total", &months(result.tire_cycle.total));
    report.push('\n');

    report.push_str("[Parâmetros]\n");
    line(&mut report, "Tamanho da frota", &format_thousands(u64::from(input.fleet_size)));
    line(&mut report, "Total de pneus", &format_thousands(u64::from(input.total_tires)));
    line(
        &mut report,
        "Consumo de combustível",
        &format!("{} km/l", format_decimal(input.fuel_consumption, 2)),
    );
    line(&mut report, "Preço do combustível", &format_brl(input.fuel_price));
    line(
        &mut report,
        "Quilometragem mensal",
        &format!("{} km", format_thousands(u64::from(input.monthly_mileage))),
    );
    line(
        &mut report,
        "Vida útil do pneu",
        &format!("{} km", format_thousands(u64::from(input.tire_lifespan))),
    );
    line(&mut report, "Preço do pneu", &format_brl(input.tire_price));
    line(&mut report, "Preço da recapagem", &format_brl(input.retread_price));
    line(
        &mut report,
        "Ciclos de recapagem",
        input.retreading_cycles.as_str(),
    );
    if let Some(km) = input.r1_tire_lifespan.filter(|_| input.r1_km() > 0) {
        line(
            &mut report,
            "Vida útil R1",
            &format!("{} km", format_thousands(u64::from(km))),
        );
    }
    if let Some(km) = input.r2_tire_lifespan.filter(|_| input.r2_km() > 0) {
        line(
            &mut report,
            "Vida útil R2",
            &format!("{} km", format_thousands(u64::from(km))),
        );
    }
    line(
        &mut report,
        "Calibragem",
        form.tire_pressure_check.label_pt(),
    );
    report.push('\n');

    report.push_str("[Variáveis do cálculo]\n");
    variable(
        &mut report,
        "Economia de combustível",
        record.percentages.fuel_savings,
        form.fuel_savings_source.as_deref(),
    );
    variable(
        &mut report,
        "Melhoria de CPK",
        record.percentages.cpk_improvement,
        form.cpk_improvement_source.as_deref(),
    );
    variable(
        &mut report,
        "Economia de carcaça",
        record.percentages.carcass_savings,
        form.carcass_savings_source.as_deref(),
    );
    rule(&mut report, '=');
    report
}

fn variable(report: &mut String, label: &str, percentage: f64, source: Option<&str>) {
    line(report, label, &format!("{}%", format_decimal(percentage, 1)));
    if let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) {
        report.push_str(&format!("    Fonte: {}\n", source));
    }
}
