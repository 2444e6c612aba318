//! Output formatting module

use serde::Serialize;

use ecotruck_app::app::{CalculationPage, DashboardStats};
use ecotruck_domain::format::{format_brl, format_decimal, truncate_str};
use ecotruck_domain::model::{AdditionalGain, CalculationRecord, SavingsResult};
use ecotruck_domain::Percentages;
use ecotruck_types::{OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

/// Print a freshly computed result
pub fn output_result(
    output_format: OutputFormat,
    result: &SavingsResult,
    percentages: &Percentages,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(result);
    }

    let items = &result.itemized_savings;
    println!("\nSavings Result");
    println!("==============");
    println!(
        "Per tire/month:     {}",
        format_brl(result.savings_per_tire_per_month)
    );
    println!("Monthly total:      {}", format_brl(items.total));
    println!("Annual total:       {}", format_brl(items.total * 12.0));

    println!("\n--- Itemized ---");
    println!(
        "CPK improvement:    {:>16}  ({}%)",
        format_brl(items.cpk_improvement),
        format_decimal(percentages.cpk_improvement, 1)
    );
    println!(
        "Fuel savings:       {:>16}  ({}%)",
        format_brl(items.fuel_savings),
        format_decimal(percentages.fuel_savings, 1)
    );
    println!(
        "Carcass savings:    {:>16}  ({}%)",
        format_brl(items.carcass_savings),
        format_decimal(percentages.carcass_savings, 1)
    );
    if result.tracking.vehicles_with_tracking > 0 {
        println!(
            "Tracking:           {:>16}  ({} vehicles)",
            format_brl(result.tracking.tracking_total_cost),
            result.tracking.vehicles_with_tracking
        );
    }

    println!("\n--- Tire cycle (months) ---");
    println!("New:                {}", format_decimal(result.tire_cycle.new_tire, 1));
    println!("R1:                 {}", format_decimal(result.tire_cycle.r1, 1));
    println!("R2:                 {}", format_decimal(result.tire_cycle.r2, 1));
    println!("Total:              {}", format_decimal(result.tire_cycle.total, 1));

    Ok(())
}

pub fn output_records(output_format: OutputFormat, page: &CalculationPage) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(page);
    }

    println!("Calculations");
    println!("============");
    println!(
        "Total: {} (page {} of {})",
        page.total,
        page.page,
        page.total_pages.max(1)
    );
    println!();

    if page.items.is_empty() {
        println!("No calculations found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<28} {:>6} {:>7} {:>16} {:>17}",
        "ID", "Company", "Fleet", "Tires", "Total/month", "Date"
    );
    println!("{}", "-".repeat(89));
    for record in &page.items {
        println!(
            "{:<10} {:<28} {:>6} {:>7} {:>16} {:>17}",
            record.short_id(),
            truncate_str(record.company_name(), 27),
            record.form.input.fleet_size,
            record.form.input.total_tires,
            format_brl(record.total_savings()),
            record.submitted_at.format("%d/%m/%Y %H:%M").to_string()
        );
    }

    if page.page < page.total_pages {
        println!();
        println!("... use --page {} for more", page.page + 1);
    }

    Ok(())
}

pub fn output_record(
    output_format: OutputFormat,
    record: &CalculationRecord,
    report: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(record);
    }
    print!("{}", report);
    Ok(())
}

pub fn output_stats(output_format: OutputFormat, stats: &DashboardStats) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(stats);
    }

    println!("Dashboard");
    println!("=========");
    println!("Total calculations:   {}", stats.total_calculations);
    println!("Calculations today:   {}", stats.calculations_today);
    println!("Unique companies:     {}", stats.unique_companies);

    if !stats.companies.is_empty() {
        println!();
        println!("{:<40} {:>8}", "Company", "Count");
        println!("{}", "-".repeat(49));
        for company in &stats.companies {
            println!(
                "{:<40} {:>8}",
                truncate_str(&company.company_name, 39),
                company.count
            );
        }
    }

    Ok(())
}

pub fn output_gains(output_format: OutputFormat, gains: &[AdditionalGain]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(gains);
    }

    println!("{:<4} {}", "ID", "Additional gain");
    println!("{}", "-".repeat(72));
    for gain in gains {
        println!("{:<4} {}", gain.id, gain.name);
    }
    Ok(())
}
