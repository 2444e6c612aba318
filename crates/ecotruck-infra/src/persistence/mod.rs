//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_calculation_repo;

pub use file_calculation_repo::FileCalculationRepository;
