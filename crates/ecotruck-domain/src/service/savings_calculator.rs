//! Monthly savings calculation for a tire fleet
//!
//! One implementation serves both the preview path and the persisted path.
//! All arithmetic is `f64` and nothing is rounded here; formatting belongs to
//! the renderers. Inputs must have passed the form validator: a zero
//! `monthly_mileage` or `fuel_consumption` is not guarded against.

use tracing::debug;

use crate::model::{
    CalculationInput, ItemizedSavings, PercentageDefaults, Percentages, SavingsResult, TireCycle,
    TrackingSummary,
};

/// Compute itemized monthly savings and the tire lifecycle breakdown
pub fn compute(input: &CalculationInput, defaults: &PercentageDefaults) -> SavingsResult {
    let pct = input.percentages(defaults);
    compute_with_percentages(input, &pct)
}

/// Same as [`compute`] with the percentages already resolved
pub fn compute_with_percentages(input: &CalculationInput, pct: &Percentages) -> SavingsResult {
    let monthly_mileage = f64::from(input.monthly_mileage);
    let total_tires = f64::from(input.total_tires);

    let fuel_savings = fuel_savings(input, pct.fuel_savings);

    let total_km = input.total_km();
    let total_cycle_months = total_km / monthly_mileage;

    let cpk_improvement = cpk_improvement(input, pct.cpk_improvement, total_km, total_cycle_months);

    let carcass_savings = if input.retreading_cycles.has_retreads() {
        carcass_savings(input, pct.carcass_savings, total_km)
    } else {
        0.0
    };

    let tracking = tracking_summary(input);

    let total = fuel_savings + cpk_improvement + carcass_savings + tracking.tracking_total_cost;
    let savings_per_tire_per_month = if input.total_tires > 0 {
        total / total_tires
    } else {
        0.0
    };

    let tire_cycle = TireCycle {
        new_tire: f64::from(input.tire_lifespan) / monthly_mileage,
        r1: retread_months(input, input.r1_tire_lifespan),
        r2: retread_months(input, input.r2_tire_lifespan),
        total: total_cycle_months,
    };

    SavingsResult {
        savings_per_tire_per_month,
        itemized_savings: ItemizedSavings {
            cpk_improvement,
            fuel_savings,
            carcass_savings,
            total,
        },
        tire_cycle,
        tracking,
    }
}

/// Months a retread lasts, shown whenever any retreading is done
///
/// Unlike `total`, this is not gated per cycle: with one cycle a filled-in
/// R2 lifespan still shows up here.
fn retread_months(input: &CalculationInput, lifespan: Option<u32>) -> f64 {
    if !input.retreading_cycles.has_retreads() {
        return 0.0;
    }
    lifespan.map_or(0.0, |km| f64::from(km) / f64::from(input.monthly_mileage))
}

/// Share of the fleet's monthly fuel spend saved
fn fuel_savings(input: &CalculationInput, percentage: f64) -> f64 {
    let liters_per_vehicle = f64::from(input.monthly_mileage) / input.fuel_consumption;
    liters_per_vehicle * input.fuel_price * f64::from(input.fleet_size) * (percentage / 100.0)
}

/// Tire cost plus one retread price per retreading cycle
fn tire_total_cost(input: &CalculationInput) -> f64 {
    input.tire_price + f64::from(input.retreading_cycles.count()) * input.retread_price
}

/// Value of the extra kilometers gained over the cycle, spread per month
fn cpk_improvement(
    input: &CalculationInput,
    percentage: f64,
    total_km: f64,
    total_cycle_months: f64,
) -> f64 {
    let cost_per_km = if total_km > 0.0 {
        tire_total_cost(input) / total_km
    } else {
        0.0
    };
    let km_gain_total = total_km * (percentage / 100.0);
    let km_gain_per_month = km_gain_total / total_cycle_months;
    km_gain_per_month * cost_per_km * f64::from(input.total_tires)
}

/// Carcass savings for retreaded fleets
///
/// The percentage enters twice, directly in the first factor and through the
/// reduction factor in the second. Do not fold the two together.
fn carcass_savings(input: &CalculationInput, percentage: f64, total_km: f64) -> f64 {
    let num_recaps = f64::from(input.retreading_cycles.count());
    let total_life_months = total_km / f64::from(input.monthly_mileage);
    let retreadings_per_month = (12.0 / (total_life_months / num_recaps)) / 12.0;

    let first_part = (percentage / 100.0) * retreadings_per_month * f64::from(input.total_tires);

    let cost_per_km = tire_total_cost(input) / total_km;
    let reduction_factor = 1.0 - percentage / 100.0;
    let km_difference = f64::from(input.r1_km()) + f64::from(input.r2_km());
    let second_part = cost_per_km * reduction_factor * km_difference;

    let savings = first_part * second_part;
    debug!(
        total_life_months,
        retreadings_per_month,
        first_part,
        cost_per_km,
        reduction_factor,
        km_difference,
        second_part,
        savings,
        "carcass savings factors"
    );
    savings
}

fn tracking_summary(input: &CalculationInput) -> TrackingSummary {
    let vehicles = input.vehicles_with_tracking.unwrap_or(0);
    let cost_per_vehicle = input.tracking_cost_per_vehicle.unwrap_or(0.0);
    TrackingSummary {
        vehicles_with_tracking: vehicles,
        tracking_cost_per_vehicle: cost_per_vehicle,
        tracking_total_cost: f64::from(vehicles) * cost_per_vehicle,
    }
}
