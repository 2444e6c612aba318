//! Domain services

pub mod comparison;
pub mod savings_calculator;
pub mod validator;

pub use comparison::{compare_calculations, generate_comparison_report, Comparison, ComparisonRow};
pub use savings_calculator::{compute, compute_with_percentages};
pub use validator::validate;
