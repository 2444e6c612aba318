//! Savings calculation output

use serde::{Deserialize, Serialize};

/// Monthly savings per category, in currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemizedSavings {
    pub cpk_improvement: f64,
    pub fuel_savings: f64,
    pub carcass_savings: f64,
    pub total: f64,
}

/// Monthly tracking cost of the fleet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSummary {
    pub vehicles_with_tracking: u32,
    pub tracking_cost_per_vehicle: f64,
    pub tracking_total_cost: f64,
}

/// Tire lifecycle durations, in months
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireCycle {
    #[serde(rename = "new")]
    pub new_tire: f64,
    pub r1: f64,
    pub r2: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    pub savings_per_tire_per_month: f64,
    pub itemized_savings: ItemizedSavings,
    pub tire_cycle: TireCycle,
    pub tracking: TrackingSummary,
}
