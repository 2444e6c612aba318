//! Calculator input records

use serde::{Deserialize, Serialize};

use super::retreading::{RetreadingCycles, TirePressureCheck};

pub const DEFAULT_FUEL_SAVINGS_PERCENTAGE: f64 = 1.0;
pub const DEFAULT_CPK_IMPROVEMENT_PERCENTAGE: f64 = 5.0;
pub const DEFAULT_CARCASS_SAVINGS_PERCENTAGE: f64 = 10.0;

/// Percentages used when the submission leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageDefaults {
    #[serde(default = "default_fuel_savings")]
    pub fuel_savings: f64,
    #[serde(default = "default_cpk_improvement")]
    pub cpk_improvement: f64,
    #[serde(default = "default_carcass_savings")]
    pub carcass_savings: f64,
}

fn default_fuel_savings() -> f64 {
    DEFAULT_FUEL_SAVINGS_PERCENTAGE
}

fn default_cpk_improvement() -> f64 {
    DEFAULT_CPK_IMPROVEMENT_PERCENTAGE
}

fn default_carcass_savings() -> f64 {
    DEFAULT_CARCASS_SAVINGS_PERCENTAGE
}

impl Default for PercentageDefaults {
    fn default() -> Self {
        Self {
            fuel_savings: DEFAULT_FUEL_SAVINGS_PERCENTAGE,
            cpk_improvement: DEFAULT_CPK_IMPROVEMENT_PERCENTAGE,
            carcass_savings: DEFAULT_CARCASS_SAVINGS_PERCENTAGE,
        }
    }
}

/// Percentages actually applied to one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Percentages {
    pub fuel_savings: f64,
    pub cpk_improvement: f64,
    pub carcass_savings: f64,
}

/// Fleet, tire and fuel parameters consumed by the savings calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub fleet_size: u32,
    pub total_tires: u32,
    /// Kilometers per liter
    pub fuel_consumption: f64,
    pub fuel_price: f64,
    /// Kilometers per vehicle per month
    pub monthly_mileage: u32,
    /// Kilometers a new tire lasts
    pub tire_lifespan: u32,
    pub tire_price: f64,
    pub retread_price: f64,
    pub retreading_cycles: RetreadingCycles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r1_tire_lifespan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2_tire_lifespan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles_with_tracking: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_cost_per_vehicle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_savings_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpk_improvement_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carcass_savings_percentage: Option<f64>,
}

impl CalculationInput {
    /// Resolve the optional percentages against `defaults`
    pub fn percentages(&self, defaults: &PercentageDefaults) -> Percentages {
        Percentages {
            fuel_savings: self.fuel_savings_percentage.unwrap_or(defaults.fuel_savings),
            cpk_improvement: self
                .cpk_improvement_percentage
                .unwrap_or(defaults.cpk_improvement),
            carcass_savings: self
                .carcass_savings_percentage
                .unwrap_or(defaults.carcass_savings),
        }
    }

    /// R1 kilometers counted by the current cycle count
    pub fn r1_km(&self) -> u32 {
        if self.retreading_cycles.count() >= 1 {
            self.r1_tire_lifespan.unwrap_or(0)
        } else {
            0
        }
    }

    /// R2 kilometers counted by the current cycle count
    pub fn r2_km(&self) -> u32 {
        if self.retreading_cycles.count() >= 2 {
            self.r2_tire_lifespan.unwrap_or(0)
        } else {
            0
        }
    }

    /// Kilometers of the whole carcass life (new + counted retreads)
    pub fn total_km(&self) -> f64 {
        f64::from(self.tire_lifespan) + f64::from(self.r1_km()) + f64::from(self.r2_km())
    }
}

/// Full submission of the multi-step calculator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorForm {
    pub company_name: String,
    pub tire_pressure_check: TirePressureCheck,
    #[serde(flatten)]
    pub input: CalculationInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_savings_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpk_improvement_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carcass_savings_source: Option<String>,
}
