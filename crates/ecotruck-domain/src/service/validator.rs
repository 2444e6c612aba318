//! Field-level validation of calculator submissions
//!
//! The savings calculation is only defined over forms that pass here.

use ecotruck_types::ValidationErrors;

use crate::model::{CalculatorForm, RetreadingCycles};

const MIN_FUEL_CONSUMPTION: f64 = 0.1;
const MIN_FUEL_PRICE: f64 = 0.1;
const MIN_PRICE: f64 = 1.0;

/// Check every field of `form`, collecting all failures
pub fn validate(form: &CalculatorForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let input = &form.input;

    if form.company_name.trim().is_empty() {
        errors.push("companyName", "company name is required");
    }

    check_min_count(&mut errors, "fleetSize", input.fleet_size);
    check_min_count(&mut errors, "totalTires", input.total_tires);
    check_min_count(&mut errors, "monthlyMileage", input.monthly_mileage);
    check_min_count(&mut errors, "tireLifespan", input.tire_lifespan);

    check_min_real(&mut errors, "fuelConsumption", input.fuel_consumption, MIN_FUEL_CONSUMPTION);
    check_min_real(&mut errors, "fuelPrice", input.fuel_price, MIN_FUEL_PRICE);
    check_min_real(&mut errors, "tirePrice", input.tire_price, MIN_PRICE);
    check_min_real(&mut errors, "retreadPrice", input.retread_price, MIN_PRICE);

    let cycles = input.retreading_cycles;
    if cycles.count() >= 1 {
        check_required_lifespan(&mut errors, "r1TireLifespan", input.r1_tire_lifespan);
    }
    if cycles == RetreadingCycles::Two {
        check_required_lifespan(&mut errors, "r2TireLifespan", input.r2_tire_lifespan);
    }

    if let Some(cost) = input.tracking_cost_per_vehicle {
        if !cost.is_finite() || cost < 0.0 {
            errors.push("trackingCostPerVehicle", "must be zero or positive");
        }
    }

    check_percentage(&mut errors, "fuelSavingsPercentage", input.fuel_savings_percentage);
    check_percentage(&mut errors, "cpkImprovementPercentage", input.cpk_improvement_percentage);
    check_percentage(&mut errors, "carcassSavingsPercentage", input.carcass_savings_percentage);

    errors.into_result()
}

fn check_min_count(errors: &mut ValidationErrors, field: &str, value: u32) {
    if value < 1 {
        errors.push(field, "must be at least 1");
    }
}

fn check_min_real(errors: &mut ValidationErrors, field: &str, value: f64, min: f64) {
    if !value.is_finite() {
        errors.push(field, "must be a finite number");
    } else if value < min {
        errors.push(field, format!("must be at least {}", min));
    }
}

fn check_required_lifespan(errors: &mut ValidationErrors, field: &str, value: Option<u32>) {
    match value {
        None => errors.push(field, "required for the selected retreading cycles"),
        Some(km) if km < 1 => errors.push(field, "must be at least 1"),
        Some(_) => {}
    }
}

fn check_percentage(errors: &mut ValidationErrors, field: &str, value: Option<f64>) {
    if let Some(pct) = value {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            errors.push(field, "must be between 0 and 100");
        }
    }
}
