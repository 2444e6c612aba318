//! Domain model types

pub mod additional_gain;
pub mod calculation_input;
pub mod calculation_record;
pub mod retreading;
pub mod savings_result;

pub use additional_gain::{default_additional_gains, total_additional_gains, AdditionalGain};
pub use calculation_input::{
    CalculationInput, CalculatorForm, PercentageDefaults, Percentages,
    DEFAULT_CARCASS_SAVINGS_PERCENTAGE, DEFAULT_CPK_IMPROVEMENT_PERCENTAGE,
    DEFAULT_FUEL_SAVINGS_PERCENTAGE,
};
pub use calculation_record::CalculationRecord;
pub use retreading::{RetreadingCycles, TirePressureCheck};
pub use savings_result::{ItemizedSavings, SavingsResult, TireCycle, TrackingSummary};
