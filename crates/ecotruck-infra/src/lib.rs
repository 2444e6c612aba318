//! Infrastructure layer - persistence implementations, scenario loaders

pub mod persistence;
pub mod scenario_loader;
