//! Domain layer for the ecotruck savings calculator
//!
//! Holds the model types, the savings calculation shared by the preview and
//! persisted paths, the form validator, and the repository traits.

pub mod format;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{
    AdditionalGain, CalculationInput, CalculationRecord, CalculatorForm, PercentageDefaults,
    Percentages, RetreadingCycles, SavingsResult, TirePressureCheck,
};
pub use service::savings_calculator::compute;
pub use service::validator::validate;
